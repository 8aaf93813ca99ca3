#![no_main]

#[path = "../../tests/common/mod.rs"]
mod common;

use blz77::{ByteOrder, Footer, compress};
use common::{BitPrices, HashChainFinder, decode};
use libfuzzer_sys::fuzz_target;

/// Verifies that the footer describes the container it terminates.
///
/// # Invariant
/// The container is 4-byte aligned, its recorded compressed size equals its
/// length, and its recorded original size equals the input length.
fn verify_footer(data: &[u8], packed: &[u8], byte_order: ByteOrder) {
    let footer = Footer::from_container(packed, byte_order)
        .unwrap_or_else(|e| panic!("Unreadable footer: {e:?}\nInput len: {}", data.len()));

    assert_eq!(packed.len() % 4, 0, "Container not aligned");
    assert_eq!(footer.compressed_size as usize, packed.len());
    assert_eq!(footer.original_size() as usize, data.len());
}

/// Verifies the lossless round-trip property.
///
/// # Invariant
/// `decode(compress(data)) == data`
///
/// # Panics
/// Panics if compression fails with well-behaved collaborators or if the
/// decoded output does not bit-match the input.
fn verify_round_trip(data: &[u8], byte_order: ByteOrder) {
    let packed = match compress(data, HashChainFinder::new(16), BitPrices, byte_order) {
        Ok(packed) => packed,
        Err(e) => panic!(
            "Compression rejected a valid parse.\nError: {e:?}\nInput len: {}",
            data.len()
        ),
    };

    verify_footer(data, &packed, byte_order);

    let decoded = decode(&packed, byte_order);
    if decoded != data {
        panic!(
            "Round-trip mismatch!\nInput len: {}\nCompressed len: {}\nDecompressed len: {}",
            data.len(),
            packed.len(),
            decoded.len()
        );
    }
}

fuzz_target!(|data: &[u8]| {
    let byte_order = if data.first().is_some_and(|b| b & 1 == 1) {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    verify_round_trip(data, byte_order);
});
