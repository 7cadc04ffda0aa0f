//! DDS header structures.
//!
//! A DDS file starts with the 4-byte magic `"DDS "` followed by a 124-byte
//! header. All multi-byte fields are little-endian:
//!
//! | Offset | Field |
//! |---|---|
//! | 0 | magic |
//! | 12 | height |
//! | 16 | width |
//! | 28 | mipmap count |
//! | 84 | pixel format four-character code |
//! | 128 | pixel payload |

use std::fmt;

use texel_common::BinaryReader;
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{Error, Result, DDS_HEADER_LEN, DDS_MAGIC};

/// DDS file header, excluding the leading magic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: U32,
    /// Header flags.
    pub flags: U32,
    /// Image height.
    pub height: U32,
    /// Image width.
    pub width: U32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: U32,
    /// Depth (for volume textures).
    pub depth: U32,
    /// Number of mipmap levels.
    pub mipmap_count: U32,
    /// Reserved.
    pub reserved1: [U32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: U32,
    /// Surface capabilities 2.
    pub caps2: U32,
    /// Surface capabilities 3.
    pub caps3: U32,
    /// Surface capabilities 4.
    pub caps4: U32,
    /// Reserved.
    pub reserved2: U32,
}

impl DdsHeader {
    /// Expected value of the `size` field.
    pub const SIZE: u32 = 124;

    /// Parse the magic and header from the first [`DDS_HEADER_LEN`] bytes of a file.
    ///
    /// Fewer than [`DDS_HEADER_LEN`] bytes is an I/O error; a wrong magic is
    /// [`Error::InvalidMagic`]. No other field is validated here.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(bytes);
        let block = reader.read_bytes(DDS_HEADER_LEN)?;

        let mut reader = BinaryReader::new(block);
        let magic: [u8; 4] = reader.read_array()?;
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        Ok(reader.read_struct()?)
    }

    /// Reject headers whose `size` field is not 124.
    pub fn validate_size(&self) -> Result<()> {
        match self.size.get() {
            Self::SIZE => Ok(()),
            other => Err(Error::InvalidHeaderSize(other)),
        }
    }

    /// Width of mipmap level 0 in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Height of mipmap level 0 in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Mipmap count as written by the producer.
    #[inline]
    pub fn mipmap_count(&self) -> u32 {
        self.mipmap_count.get()
    }

    /// Pixel format four-character code.
    #[inline]
    pub fn four_cc(&self) -> FourCC {
        self.pixel_format.four_cc
    }

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }
}

/// DDS pixel format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: U32,
    /// Pixel format flags.
    pub flags: U32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: U32,
    /// Red bit mask.
    pub r_bit_mask: U32,
    /// Green bit mask.
    pub g_bit_mask: U32,
    /// Blue bit mask.
    pub b_bit_mask: U32,
    /// Alpha bit mask.
    pub a_bit_mask: U32,
}

/// Four-character code for compression type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    FromBytes,
    IntoBytes,
    Immutable,
    KnownLayout,
    Unaligned,
)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            self.0.iter().try_for_each(|&b| write!(f, "{}", b as char))
        } else {
            write!(f, "{:#010x}", u32::from_le_bytes(self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::DdsBuilder;

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<DdsHeader>(), 124);
        assert_eq!(std::mem::size_of::<DdsPixelFormat>(), 32);
    }

    #[test]
    fn test_parse_fixed_offsets() {
        let data = DdsBuilder::new(FourCC::DXT5, 640, 480).mip_count(7).build();
        let header = DdsHeader::parse(&data).unwrap();

        assert_eq!(header.height(), 480);
        assert_eq!(header.width(), 640);
        assert_eq!(header.mipmap_count(), 7);
        assert_eq!(header.four_cc(), FourCC::DXT5);
        assert_eq!(header.size.get(), DdsHeader::SIZE);
        assert!(!header.is_dx10());
    }

    #[test]
    fn test_parse_bad_magic() {
        let mut data = DdsBuilder::new(FourCC::DXT1, 4, 4).build();
        data[..4].copy_from_slice(b"\x89PNG");

        match DdsHeader::parse(&data) {
            Err(Error::InvalidMagic(magic)) => assert_eq!(&magic, b"\x89PNG"),
            other => panic!("expected InvalidMagic, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_short_header() {
        let data = DdsBuilder::new(FourCC::DXT1, 4, 4).build();
        let err = DdsHeader::parse(&data[..100]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
    }

    #[test]
    fn test_validate_size() {
        let data = DdsBuilder::new(FourCC::DXT1, 4, 4).header_size(100).build();
        let header = DdsHeader::parse(&data).unwrap();
        assert!(matches!(
            header.validate_size(),
            Err(Error::InvalidHeaderSize(100))
        ));
    }

    #[test]
    fn test_four_cc_display() {
        assert_eq!(FourCC::DXT1.to_string(), "DXT1");
        assert_eq!(FourCC([0, 0, 0, 0]).to_string(), "0x00000000");
    }
}
