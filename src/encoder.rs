use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{CompressionError, Result};
use crate::footer::{ByteOrder, Footer};
use crate::matches::Match;
use crate::reverse::ReverseStream;

/// Number of units (literals or match tokens) described by one control byte.
const BLOCK_UNITS: usize = 8;

/// Collects up to 8 units behind a control byte.
///
/// Flag bits are assigned from the most significant bit down: 0 for a literal,
/// 1 for a match token.
struct BlockAccumulator {
    control: u8,
    unit_count: usize,
    buffer: [u8; BLOCK_UNITS * 2], // 8 match tokens of 2 bytes each
    buffer_len: usize,
}

impl BlockAccumulator {
    const fn new() -> Self {
        Self {
            control: 0,
            unit_count: 0,
            buffer: [0; BLOCK_UNITS * 2],
            buffer_len: 0,
        }
    }

    /// Adds a literal byte to the current block.
    fn push_literal<W: Write>(&mut self, byte: u8, output: &mut W) -> Result<()> {
        // Literal flag is 0, nothing to set.
        self.buffer[self.buffer_len] = byte;
        self.buffer_len += 1;
        self.commit_unit(output)
    }

    /// Adds a 2-byte match token to the current block and sets its flag bit.
    fn push_match<W: Write>(&mut self, token: [u8; 2], output: &mut W) -> Result<()> {
        self.control |= 0x80u8 >> self.unit_count;
        self.buffer[self.buffer_len..self.buffer_len + 2].copy_from_slice(&token);
        self.buffer_len += 2;
        self.commit_unit(output)
    }

    /// Counts the unit just buffered and flushes the block once it holds 8.
    fn commit_unit<W: Write>(&mut self, output: &mut W) -> Result<()> {
        self.unit_count += 1;
        if self.unit_count == BLOCK_UNITS {
            self.flush(output)?;
        }
        Ok(())
    }

    /// Writes the control byte and the buffered units, then resets.
    fn flush<W: Write>(&mut self, output: &mut W) -> Result<()> {
        if self.unit_count > 0 {
            output.write_u8(self.control)?;
            output.write_all(&self.buffer[..self.buffer_len])?;

            self.control = 0;
            self.unit_count = 0;
            self.buffer[..self.buffer_len].fill(0);
            self.buffer_len = 0;
        }
        Ok(())
    }
}

/// Serializes a parsed buffer into the backward container.
///
/// The input is consumed from its last byte to its first and the block data is
/// written from the end of its region toward offset 0, so a decoder can walk
/// both the container and its output buffer backwards. The block data is
/// followed by `0xFF` padding and an 8-byte [`Footer`].
///
/// Match positions and displacements are offsets into the *reversed* input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardEncoder {
    byte_order: ByteOrder,
}

impl BackwardEncoder {
    #[must_use]
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    /// Byte order used for the footer words.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Encodes all of `input` into `output`, starting at offset 0 of `output`.
    ///
    /// `matches` must be ascending, non-overlapping and representable; everything
    /// they do not cover is emitted as literals.
    ///
    /// # Errors
    /// * [`CompressionError::InvalidMatch`] if a match is out of range, out of order,
    ///   overlaps its predecessor, or runs past the end of the input. Nothing is
    ///   written in that case.
    /// * [`CompressionError::Io`] on any read, write or seek failure. Partially written
    ///   output is left as is.
    pub fn encode<R, W>(&self, input: &mut R, output: &mut W, matches: &[Match]) -> Result<()>
    where
        R: Read + Seek,
        W: Write + Seek,
    {
        let input_len = input.seek(SeekFrom::End(0))? as usize;
        validate_matches(input_len, matches)?;

        let content_len = block_data_length(input_len, matches);

        {
            let mut reader = ReverseStream::new(&mut *input, input_len as u64);
            let mut writer = ReverseStream::new(&mut *output, content_len as u64);
            let mut accumulator = BlockAccumulator::new();

            for m in matches {
                while reader.position() < m.position as u64 {
                    accumulator.push_literal(reader.read_u8()?, &mut writer)?;
                }

                accumulator.push_match(m.token(), &mut writer)?;
                reader.seek(SeekFrom::Current(m.length as i64))?;
            }

            while reader.position() < reader.len() {
                accumulator.push_literal(reader.read_u8()?, &mut writer)?;
            }

            accumulator.flush(&mut writer)?;
        }

        output.seek(SeekFrom::Start(content_len as u64))?;
        Footer::for_content(content_len, input_len).write_to(output, self.byte_order)?;
        output.flush()?;

        Ok(())
    }

    /// Convenience wrapper encoding a byte slice into a new vector.
    pub fn encode_to_vec(&self, input: &[u8], matches: &[Match]) -> Result<Vec<u8>> {
        let mut output = std::io::Cursor::new(Vec::new());
        self.encode(&mut std::io::Cursor::new(input), &mut output, matches)?;
        Ok(output.into_inner())
    }
}

/// Size of the block data (control bytes and units) for `input_len` bytes
/// split by `matches`. Excludes padding and footer.
///
/// # Errors
/// [`CompressionError::InvalidMatch`] under the same conditions as
/// [`BackwardEncoder::encode`].
pub fn content_length(input_len: usize, matches: &[Match]) -> Result<usize> {
    validate_matches(input_len, matches)?;
    Ok(block_data_length(input_len, matches))
}

/// [`content_length`] for matches that already passed [`validate_matches`].
fn block_data_length(input_len: usize, matches: &[Match]) -> usize {
    let mut cursor = 0;
    let mut bytes = 0;
    let mut units = 0;

    for m in matches {
        let literals = m.position - cursor;
        bytes += literals + 2;
        units += literals + 1;
        cursor = m.end();
    }

    let trailing = input_len - cursor;
    bytes += trailing;
    units += trailing;

    bytes + units.div_ceil(BLOCK_UNITS)
}

/// Rejects matches the container cannot express or that do not form an
/// ascending, disjoint cover of the input.
fn validate_matches(input_len: usize, matches: &[Match]) -> Result<()> {
    let mut cursor = 0;
    for m in matches {
        if !m.is_representable() || m.position < cursor || !m.fits_within(input_len) {
            return Err(CompressionError::InvalidMatch {
                position: m.position,
                displacement: m.displacement,
                length: m.length,
            });
        }
        cursor = m.end();
    }
    Ok(())
}
