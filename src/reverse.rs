//! Reverse addressing over a seekable stream.
//!
//! A [`ReverseStream`] presents the first `len` bytes of a stream back to front.
//! Logical offset `k` maps to physical offset `len - 1 - k`, so reading or
//! writing `n` bytes at logical `p` touches physical `[len - p - n, len - p)`
//! with the byte order flipped.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

pub struct ReverseStream<S> {
    inner: S,
    len: u64,
    position: u64,
}

impl<S: Seek> ReverseStream<S> {
    /// Wraps `inner`, treating its first `len` bytes as the logical stream.
    pub const fn new(inner: S, len: u64) -> Self {
        Self {
            inner,
            len,
            position: 0,
        }
    }

    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    #[inline]
    const fn remaining(&self) -> u64 {
        self.len - self.position
    }

    /// Seeks `inner` to the physical start of an `count`-byte run at the
    /// current logical position. `count` must not exceed [`Self::remaining`].
    fn seek_physical(&mut self, count: u64) -> io::Result<()> {
        let offset = self.len - self.position - count;
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }
}

impl<S: Read + Seek> Read for ReverseStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = (buf.len() as u64).min(self.remaining()) as usize;
        if count == 0 {
            return Ok(0);
        }

        self.seek_physical(count as u64)?;
        let chunk = &mut buf[..count];
        self.inner.read_exact(chunk)?;
        chunk.reverse();

        self.position += count as u64;
        Ok(count)
    }
}

impl<S: Write + Seek> Write for ReverseStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if buf.len() as u64 > self.remaining() {
            return Err(io::Error::new(
                ErrorKind::WriteZero,
                "write past the logical end of a reverse stream",
            ));
        }

        self.seek_physical(buf.len() as u64)?;
        let reversed: Vec<u8> = buf.iter().rev().copied().collect();
        self.inner.write_all(&reversed)?;

        self.position += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for ReverseStream<S> {
    /// Moves the logical position. Physical seeks happen lazily on the next read or write.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(delta) => self.len.checked_add_signed(delta),
        };

        match target {
            Some(target) if target <= self.len => {
                self.position = target;
                Ok(target)
            }
            _ => Err(io::Error::new(
                ErrorKind::InvalidInput,
                "seek outside the logical bounds of a reverse stream",
            )),
        }
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}
