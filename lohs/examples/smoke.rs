//! Smoke sequence against a reader on a real serial line
//!
//! Point `LOHS_PORT` at the device (default `/dev/ttyS0`).

use lohs::Reader;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::var("LOHS_PORT").unwrap_or_else(|_| "/dev/ttyS0".to_string());

    println!("Opening {path}...");
    let mut reader = Reader::open(&path)?;

    println!("Configuring defaults...");
    reader.set_defaults()?;

    println!("Beep...");
    reader.beep()?;

    println!("Querying version...");
    let version = reader.query_version()?;
    println!("{version}");

    Ok(())
}
