//! Container trailer: `0xFF` padding to a 4-byte boundary, then two 32-bit words.
//!
//! * word 1: `((8 + padding) << 24) | (compressed_size & 0xFF_FFFF)`
//! * word 2: `original_size - compressed_size` (wrapping)
//!
//! `compressed_size` counts content, padding and the footer itself.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};

/// Size of the two footer words.
pub const FOOTER_SIZE: usize = 8;

/// Value written into alignment padding.
pub const PADDING_BYTE: u8 = 0xFF;

const ALIGNMENT: usize = 4;
const SIZE_MASK: u32 = 0x00FF_FFFF;

/// Byte order of the footer words. Must match what the consuming decoder expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Writes one footer word in this byte order.
    fn write_u32<W: Write>(self, writer: &mut W, value: u32) -> io::Result<()> {
        match self {
            Self::LittleEndian => writer.write_u32::<LittleEndian>(value),
            Self::BigEndian => writer.write_u32::<BigEndian>(value),
        }
    }

    /// Reads one footer word in this byte order.
    fn read_u32<R: Read>(self, reader: &mut R) -> io::Result<u32> {
        match self {
            Self::LittleEndian => reader.read_u32::<LittleEndian>(),
            Self::BigEndian => reader.read_u32::<BigEndian>(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer {
    /// Number of `0xFF` bytes between the content and the footer words (0-3).
    pub padding: u8,
    /// Content + padding + footer, truncated to 24 bits when serialized.
    pub compressed_size: u32,
    /// `original_size - compressed_size`, wrapping.
    pub size_delta: u32,
}

impl Footer {
    /// Builds the footer for `content_len` bytes of block data encoding `original_len` bytes.
    #[must_use]
    pub const fn for_content(content_len: usize, original_len: usize) -> Self {
        let padding = (ALIGNMENT - content_len % ALIGNMENT) % ALIGNMENT;
        let compressed_size = (content_len + padding + FOOTER_SIZE) as u32;
        Self {
            padding: padding as u8,
            compressed_size,
            size_delta: (original_len as u32).wrapping_sub(compressed_size),
        }
    }

    /// Padding plus footer words; the value stored in the top byte of word 1.
    #[inline]
    #[must_use]
    pub const fn header_length(&self) -> u8 {
        FOOTER_SIZE as u8 + self.padding
    }

    /// Size of the data once decoded.
    #[inline]
    #[must_use]
    pub const fn original_size(&self) -> u32 {
        self.size_delta.wrapping_add(self.compressed_size)
    }

    #[must_use]
    pub const fn words(&self) -> [u32; 2] {
        [
            ((self.header_length() as u32) << 24) | (self.compressed_size & SIZE_MASK),
            self.size_delta,
        ]
    }

    /// Writes the padding bytes followed by both words.
    pub fn write_to<W: Write>(&self, writer: &mut W, byte_order: ByteOrder) -> io::Result<()> {
        for _ in 0..self.padding {
            writer.write_u8(PADDING_BYTE)?;
        }

        let [top, bottom] = self.words();
        byte_order.write_u32(writer, top)?;
        byte_order.write_u32(writer, bottom)
    }

    /// Reads the two footer words (not the padding) from `reader`.
    ///
    /// The compressed size is only recovered modulo 2^24.
    pub fn read_from<R: Read>(reader: &mut R, byte_order: ByteOrder) -> io::Result<Self> {
        let top = byte_order.read_u32(reader)?;
        let bottom = byte_order.read_u32(reader)?;

        let header_length = (top >> 24) as u8;
        if !(FOOTER_SIZE as u8..FOOTER_SIZE as u8 + ALIGNMENT as u8).contains(&header_length) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "footer header length out of range",
            ));
        }

        Ok(Self {
            padding: header_length - FOOTER_SIZE as u8,
            compressed_size: top & SIZE_MASK,
            size_delta: bottom,
        })
    }

    /// Parses the footer from the last 8 bytes of a complete container.
    pub fn from_container(container: &[u8], byte_order: ByteOrder) -> io::Result<Self> {
        let Some(tail) = container.len().checked_sub(FOOTER_SIZE) else {
            return Err(io::ErrorKind::UnexpectedEof.into());
        };
        Self::read_from(&mut &container[tail..], byte_order)
    }
}
