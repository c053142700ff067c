//! Card data block
//!
//! The reader transmits swiped card data as a `<stx><size><F1><text><etx>`
//! frame whose text field bit-packs the two card lines. The pack layout in
//! the vendor notes is ambiguous and still has to be validated against
//! captures from a real device, so decoding is not wired up yet; this type
//! fixes the shape the decoder will produce.

use std::fmt;

/// Decoded card block: the two lines of a swiped card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardData {
    pub line1: Vec<u8>,
    pub line2: Vec<u8>,
}

impl fmt::Display for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CardData[line1: {} bytes, line2: {} bytes]",
            self.line1.len(),
            self.line2.len()
        )
    }
}
