//! Collaborators and a reference decoder shared by the integration tests.

#![allow(dead_code)]

use std::io::Cursor;

use blz77::{
    ByteOrder, Footer, MAX_DISPLACEMENT, MAX_MATCH_LENGTH, MIN_DISPLACEMENT, MIN_MATCH_LENGTH,
    Match, MatchFinder, PriceCalculator, ReverseStream,
};
use blz77::footer::PADDING_BYTE;
use byteorder::ReadBytesExt;

// --- Match finders ---

/// Never reports a match.
pub struct NoMatches;

impl MatchFinder for NoMatches {
    fn min_match_size(&self) -> usize {
        MIN_MATCH_LENGTH
    }

    fn find_all_matches(&mut self, _buffer: &[u8], _position: usize) -> Vec<Match> {
        Vec::new()
    }
}

/// Reports, for every displacement in range, the longest match at that displacement.
///
/// Quadratic, but exhaustive. Only suitable for small inputs.
pub struct ExhaustiveFinder;

impl MatchFinder for ExhaustiveFinder {
    fn min_match_size(&self) -> usize {
        MIN_MATCH_LENGTH
    }

    fn find_all_matches(&mut self, buffer: &[u8], position: usize) -> Vec<Match> {
        let max_len = MAX_MATCH_LENGTH.min(buffer.len() - position);
        (MIN_DISPLACEMENT..=MAX_DISPLACEMENT.min(position))
            .filter_map(|displacement| {
                let length = common_prefix_len(buffer, position - displacement, position, max_len);
                (length >= MIN_MATCH_LENGTH).then(|| Match::new(position, displacement, length))
            })
            .collect()
    }
}

const EMPTY_ENTRY: usize = usize::MAX;
const HASH_MASK: usize = 0xFFF;

/// Hash-chain finder reporting matches of strictly increasing length, nearest first.
pub struct HashChainFinder {
    head: Vec<usize>,
    next: Vec<usize>,
    inserted: usize,
    max_depth: usize,
}

impl HashChainFinder {
    pub fn new(max_depth: usize) -> Self {
        Self {
            head: vec![EMPTY_ENTRY; HASH_MASK + 1],
            next: Vec::new(),
            inserted: 0,
            max_depth,
        }
    }

    fn insert_up_to(&mut self, buffer: &[u8], position: usize) {
        if self.next.len() < buffer.len() {
            self.next.resize(buffer.len(), EMPTY_ENTRY);
        }
        while self.inserted < position {
            let idx = self.inserted;
            if idx + MIN_MATCH_LENGTH <= buffer.len() {
                let h = hash_3_bytes(&buffer[idx..]);
                self.next[idx] = self.head[h];
                self.head[h] = idx;
            }
            self.inserted += 1;
        }
    }
}

impl MatchFinder for HashChainFinder {
    fn min_match_size(&self) -> usize {
        MIN_MATCH_LENGTH
    }

    fn find_all_matches(&mut self, buffer: &[u8], position: usize) -> Vec<Match> {
        self.insert_up_to(buffer, position);

        let max_len = MAX_MATCH_LENGTH.min(buffer.len() - position);
        let mut found = Vec::new();
        let mut best_len = MIN_MATCH_LENGTH - 1;

        let mut candidate = self.head[hash_3_bytes(&buffer[position..])];
        let mut depth = 0;
        while candidate != EMPTY_ENTRY && depth < self.max_depth {
            let displacement = position - candidate;
            if displacement > MAX_DISPLACEMENT {
                break;
            }

            if displacement >= MIN_DISPLACEMENT {
                let length = common_prefix_len(buffer, candidate, position, max_len);
                if length > best_len {
                    best_len = length;
                    found.push(Match::new(position, displacement, length));
                    if length == max_len {
                        break;
                    }
                }
            }

            candidate = self.next[candidate];
            depth += 1;
        }

        found
    }
}

fn hash_3_bytes(b: &[u8]) -> usize {
    let h = ((b[0] as usize) << 6) ^ ((b[1] as usize) << 3) ^ (b[2] as usize);
    h & HASH_MASK
}

/// Length of the common run starting at `from` and `at`, up to `max`.
/// `from < at`; the run may overlap `at`.
fn common_prefix_len(buffer: &[u8], from: usize, at: usize, max: usize) -> usize {
    let mut len = 0;
    while len < max && buffer[from + len] == buffer[at + len] {
        len += 1;
    }
    len
}

// --- Price models ---

/// Constant prices per literal and per match, regardless of content.
pub struct FlatPrices {
    pub literal: u32,
    pub matched: u32,
}

impl PriceCalculator for FlatPrices {
    fn literal_price(&self, _value: u8) -> u32 {
        self.literal
    }

    fn match_price(&self, _candidate: &Match) -> u32 {
        self.matched
    }
}

/// Bit cost of each unit in the container: a flag bit plus its payload.
pub struct BitPrices;

impl PriceCalculator for BitPrices {
    fn literal_price(&self, _value: u8) -> u32 {
        1 + 8
    }

    fn match_price(&self, _candidate: &Match) -> u32 {
        1 + 16
    }
}

// --- Reference decoder ---

/// Decodes a complete container, panicking on malformed data.
#[track_caller]
pub fn decode(container: &[u8], byte_order: ByteOrder) -> Vec<u8> {
    let footer = Footer::from_container(container, byte_order).expect("footer is readable");
    let compressed_size = footer.compressed_size as usize;
    assert_eq!(compressed_size, container.len(), "footer size mismatch");

    let content_len = compressed_size - footer.header_length() as usize;
    assert!(
        container[content_len..content_len + footer.padding as usize]
            .iter()
            .all(|&b| b == PADDING_BYTE),
        "padding must be 0xFF"
    );

    let mut content = ReverseStream::new(Cursor::new(&container[..content_len]), content_len as u64);
    let original_size = footer.original_size() as usize;
    let mut out = Vec::with_capacity(original_size);

    while out.len() < original_size {
        let control = content.read_u8().expect("control byte");
        for bit in 0..8 {
            if out.len() >= original_size {
                break;
            }

            if control & (0x80u8 >> bit) != 0 {
                let b1 = content.read_u8().expect("match byte 1") as usize;
                let b2 = content.read_u8().expect("match byte 2") as usize;
                let length = (b1 >> 4) + MIN_MATCH_LENGTH;
                let displacement = (((b1 & 0xF) << 8) | b2) + MIN_DISPLACEMENT;
                assert!(displacement <= out.len(), "displacement before start of output");
                for _ in 0..length {
                    out.push(out[out.len() - displacement]);
                }
            } else {
                out.push(content.read_u8().expect("literal"));
            }
        }
    }

    assert_eq!(content.position(), content.len(), "unused block data");
    out.reverse();
    out
}

// --- Data generators ---

/// Deterministic pseudo-random bytes (LCG, fixed seed).
pub fn generate_random(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0xDEAD_BEEF;
    (0..size)
        .map(|_| {
            seed = (seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) & 0xFFFF_FFFF;
            (seed >> 24) as u8
        })
        .collect()
}

pub fn generate_text(size: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}
