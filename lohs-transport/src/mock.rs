//! Scripted transport for tests
//!
//! Plays back a fixed read script and records every byte the code under
//! test writes, so exchanges can be asserted byte-exact without a device on
//! the line. Clones share state, letting a test keep a handle to the script
//! and write log after moving the transport into the code under test.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::BytesMut;

use crate::{error::*, Transport};

/// A read-script step: a chunk of bytes, or a deliberate timeout
#[derive(Debug, Clone)]
enum Step {
    Chunk(Vec<u8>),
    Timeout,
}

#[derive(Debug, Default)]
struct Inner {
    script: VecDeque<Step>,
    written: Vec<u8>,
    discards: usize,
}

/// In-memory transport driven by a read script
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lohs_transport::{MockTransport, Transport};
///
/// let mut mock = MockTransport::new().with_read([0x06]);
/// let byte = mock.read(1, Duration::from_secs(5)).unwrap();
/// assert_eq!(byte.as_ref(), &[0x06]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk the next read will yield
    pub fn with_read(self, chunk: impl Into<Vec<u8>>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back(Step::Chunk(chunk.into()));
        self
    }

    /// Append a deliberate timeout step
    pub fn with_read_timeout(self) -> Self {
        self.inner.lock().unwrap().script.push_back(Step::Timeout);
        self
    }

    /// Everything written so far, in order
    pub fn written(&self) -> Vec<u8> {
        self.inner.lock().unwrap().written.clone()
    }

    /// Number of `discard_input` calls observed
    pub fn discards(&self) -> usize {
        self.inner.lock().unwrap().discards
    }

    /// True when the read script has been fully consumed
    pub fn script_exhausted(&self) -> bool {
        self.inner.lock().unwrap().script.is_empty()
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.lock().unwrap().written.extend_from_slice(data);
        Ok(())
    }

    fn read(&mut self, max: usize, _timeout: Duration) -> Result<BytesMut> {
        let mut inner = self.inner.lock().unwrap();
        match inner.script.pop_front() {
            // An exhausted script behaves like an idle line
            None | Some(Step::Timeout) => Err(Error::ReadTimeout),
            Some(Step::Chunk(mut chunk)) => {
                if chunk.len() > max {
                    let rest = chunk.split_off(max);
                    inner.script.push_front(Step::Chunk(rest));
                }
                Ok(BytesMut::from(chunk.as_slice()))
            }
        }
    }

    fn discard_input(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.discards += 1;
        inner.script.clear();
        Ok(())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TIMEOUT: Duration = Duration::from_millis(10);

    #[test]
    fn scripted_reads_in_order() {
        let mut mock = MockTransport::new().with_read([1, 2]).with_read([3]);

        assert_eq!(mock.read(8, TIMEOUT).unwrap().as_ref(), &[1, 2]);
        assert_eq!(mock.read(8, TIMEOUT).unwrap().as_ref(), &[3]);
        assert!(mock.script_exhausted());
    }

    #[test]
    fn oversized_chunk_is_split() {
        let mut mock = MockTransport::new().with_read([1, 2, 3, 4]);

        assert_eq!(mock.read(3, TIMEOUT).unwrap().as_ref(), &[1, 2, 3]);
        assert_eq!(mock.read(3, TIMEOUT).unwrap().as_ref(), &[4]);
    }

    #[test]
    fn timeout_step_and_exhaustion() {
        let mut mock = MockTransport::new().with_read_timeout();

        assert!(matches!(mock.read(1, TIMEOUT), Err(Error::ReadTimeout)));
        assert!(matches!(mock.read(1, TIMEOUT), Err(Error::ReadTimeout)));
    }

    #[test]
    fn records_writes_and_discards() {
        let mut mock = MockTransport::new().with_read([9]);

        mock.write(&[0x02, 0x06]).unwrap();
        mock.write(&[0x03]).unwrap();
        mock.discard_input().unwrap();

        assert_eq!(mock.written(), vec![0x02, 0x06, 0x03]);
        assert_eq!(mock.discards(), 1);
        // Discard also drops the pending script, like flushing the OS buffer
        assert!(mock.script_exhausted());
    }

    #[test]
    fn clones_share_state() {
        let handle = MockTransport::new().with_read([7]);
        let mut moved = handle.clone();

        moved.write(&[1, 2]).unwrap();
        moved.read(1, TIMEOUT).unwrap();

        assert_eq!(handle.written(), vec![1, 2]);
        assert!(handle.script_exhausted());
    }
}
