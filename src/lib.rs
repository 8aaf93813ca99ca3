//! # Backward LZ77 Compression
//!
//! `blz77` produces the backward LZ77 container found in many console archive
//! and texture formats. Block data is laid out so that a decoder starts at the
//! end of the file and works toward the front, filling its output buffer back
//! to front. An 8-byte footer records the padding and size information the
//! decoder needs.
//!
//! Compression is split in two stages:
//!
//! 1. [`OptimalParser`] picks the cheapest sequence of matches using a
//!    caller-supplied [`MatchFinder`] and [`PriceCalculator`].
//! 2. [`BackwardEncoder`] serializes the input and those matches.
//!
//! [`compress`] runs both stages on a byte slice.
//!
//! ## Example
//!
//! ```rust
//! use blz77::{ByteOrder, Footer, Match, MatchFinder, PriceCalculator, compress};
//!
//! /// Finds nothing, so everything is stored as literals.
//! struct NoMatches;
//!
//! impl MatchFinder for NoMatches {
//!     fn min_match_size(&self) -> usize {
//!         3
//!     }
//!
//!     fn find_all_matches(&mut self, _buffer: &[u8], _position: usize) -> Vec<Match> {
//!         Vec::new()
//!     }
//! }
//!
//! struct Bits;
//!
//! impl PriceCalculator for Bits {
//!     fn literal_price(&self, _value: u8) -> u32 {
//!         9
//!     }
//!
//!     fn match_price(&self, _candidate: &Match) -> u32 {
//!         17
//!     }
//! }
//!
//! let packed = compress(b"Hello", NoMatches, Bits, ByteOrder::LittleEndian).unwrap();
//!
//! // 1 control byte + 5 literals, 2 bytes of padding, 8-byte footer.
//! assert_eq!(packed.len(), 16);
//! assert_eq!(&packed[..6], b"Hello\x00");
//!
//! let footer = Footer::from_container(&packed, ByteOrder::LittleEndian).unwrap();
//! assert_eq!(footer.original_size(), 5);
//! ```

#![forbid(unsafe_code)]

pub mod encoder;
pub mod error;
pub mod footer;
pub mod matches;
pub mod parser;
pub mod reverse;

use std::io::Cursor;

pub use encoder::{BackwardEncoder, content_length};
pub use error::{CompressionError, Result};
pub use footer::{ByteOrder, Footer};
pub use matches::{
    MAX_DISPLACEMENT, MAX_MATCH_LENGTH, MIN_DISPLACEMENT, MIN_MATCH_LENGTH, Match,
};
pub use parser::{MatchFinder, OptimalParser, PriceCalculator};
pub use reverse::ReverseStream;

/// Compresses `input` into a complete backward container.
///
/// The parser runs over the reversed input, because that is the order in which
/// the encoder consumes it and the decoder reproduces it. `finder` sees the
/// reversed buffer as well.
///
/// # Errors
/// Propagates [`CompressionError::InvalidMatchCandidate`] from a misbehaving finder.
pub fn compress<F, C>(
    input: &[u8],
    finder: F,
    calculator: C,
    byte_order: ByteOrder,
) -> Result<Vec<u8>>
where
    F: MatchFinder,
    C: PriceCalculator,
{
    let reversed: Vec<u8> = input.iter().rev().copied().collect();
    let matches = OptimalParser::new(finder, calculator).parse(&reversed, 0)?;

    let mut output = Cursor::new(Vec::with_capacity(input.len() + input.len() / 8 + 12));
    BackwardEncoder::new(byte_order).encode(&mut Cursor::new(input), &mut output, &matches)?;
    Ok(output.into_inner())
}
