//! Binary readers for fixed-layout file formats.
//!
//! [`BinaryReader`] walks a byte slice with a cursor and refuses to read
//! past the end; [`ReadExt`] adds exact-length reads to any
//! [`std::io::Read`] so short streams surface as
//! [`Error::UnexpectedEof`] instead of silently truncated buffers.

use std::io::Read;

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Upper bound on the buffer reserved before a stream read; larger reads grow as data arrives.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

/// A cursor over a byte slice with bounds-checked little-endian reads.
///
/// # Example
///
/// ```
/// use texel_common::BinaryReader;
///
/// let data = [b'D', b'D', b'S', b' ', 0x7C, 0x00, 0x00, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(&reader.read_array::<4>().unwrap(), b"DDS ");
/// assert_eq!(reader.remaining_bytes(), &[0x7C, 0x00, 0x00, 0x00]);
/// reader.read_bytes(4).unwrap();
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size byte array, such as a four-character code.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

/// Exact-length reads for byte streams.
pub trait ReadExt: Read {
    /// Read exactly `N` bytes into an array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_exact_vec(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    /// Read exactly `len` bytes into a freshly allocated buffer.
    ///
    /// A stream that ends early yields [`Error::UnexpectedEof`] carrying
    /// how many bytes were actually available.
    fn read_exact_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        Read::take(&mut *self, len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(Error::UnexpectedEof {
                needed: len,
                available: buf.len(),
            });
        }
        Ok(buf)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}
