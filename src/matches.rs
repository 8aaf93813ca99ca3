/// Shortest back-reference the container can express (stored as `length - 3` in 4 bits).
pub const MIN_MATCH_LENGTH: usize = 3;

/// Longest back-reference the container can express.
pub const MAX_MATCH_LENGTH: usize = MIN_MATCH_LENGTH + 0xF;

/// Smallest displacement the container can express (stored as `displacement - 3` in 12 bits).
pub const MIN_DISPLACEMENT: usize = 3;

/// Largest displacement the container can express.
pub const MAX_DISPLACEMENT: usize = MIN_DISPLACEMENT + 0xFFF;

/// A back-reference copying `length` bytes from `displacement` bytes earlier.
///
/// `position` is the offset of the first covered byte in the buffer the match was found in.
/// For [`BackwardEncoder`](crate::BackwardEncoder) that buffer is the reversed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub position: usize,
    pub displacement: usize,
    pub length: usize,
}

impl Match {
    #[must_use]
    pub const fn new(position: usize, displacement: usize, length: usize) -> Self {
        Self {
            position,
            displacement,
            length,
        }
    }

    /// Offset one past the last byte covered by this match.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.position + self.length
    }

    /// Whether the match lies entirely inside a buffer of `len` bytes.
    ///
    /// Never overflows, unlike comparing [`Match::end`] against `len`.
    #[inline]
    #[must_use]
    pub const fn fits_within(&self, len: usize) -> bool {
        self.position <= len && self.length <= len - self.position
    }

    /// Whether length and displacement fit their bit fields, and the
    /// displacement does not reach before the start of the buffer.
    #[must_use]
    pub const fn is_representable(&self) -> bool {
        self.length >= MIN_MATCH_LENGTH
            && self.length <= MAX_MATCH_LENGTH
            && self.displacement >= MIN_DISPLACEMENT
            && self.displacement <= MAX_DISPLACEMENT
            && self.displacement <= self.position
    }

    /// Packs the match into its 2-byte token.
    ///
    /// Byte 0 holds `length - 3` in the high nibble and the top 4 bits of
    /// `displacement - 3` in the low nibble; byte 1 holds the low 8 bits.
    /// Callers must check [`Match::is_representable`] first.
    #[inline]
    pub(crate) const fn token(&self) -> [u8; 2] {
        let len_val = self.length - MIN_MATCH_LENGTH;
        let disp_val = self.displacement - MIN_DISPLACEMENT;
        [
            ((len_val << 4) | (disp_val >> 8)) as u8,
            (disp_val & 0xFF) as u8,
        ]
    }
}
