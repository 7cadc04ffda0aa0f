//! Block-compression format dispatch.

use std::fmt;

use crate::header::FourCC;
use crate::{Error, Result};

/// `GL_COMPRESSED_RGBA_S3TC_DXT1_EXT`
pub const GL_COMPRESSED_RGBA_S3TC_DXT1_EXT: u32 = 0x83F1;
/// `GL_COMPRESSED_RGBA_S3TC_DXT3_EXT`
pub const GL_COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83F2;
/// `GL_COMPRESSED_RGBA_S3TC_DXT5_EXT`
pub const GL_COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83F3;

/// S3TC codec used by a DDS payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CompressionFormat {
    /// BC1, 8 bytes per 4x4 block.
    Dxt1,
    /// BC2, 16 bytes per 4x4 block.
    Dxt3,
    /// BC3, 16 bytes per 4x4 block.
    Dxt5,
}

impl CompressionFormat {
    /// Select the codec from a pixel-format four-character code.
    ///
    /// Only the first byte (`'D'`) and the fourth byte (`'1'`, `'3'`, `'5'`)
    /// are inspected. `DX10` and every non-DXT code are rejected with
    /// [`Error::UnsupportedFormat`].
    pub fn from_four_cc(code: FourCC) -> Result<Self> {
        match code.0 {
            [b'D', _, _, b'1'] => Ok(Self::Dxt1),
            [b'D', _, _, b'3'] => Ok(Self::Dxt3),
            [b'D', _, _, b'5'] => Ok(Self::Dxt5),
            // DX10 inserts an extended header before the pixels; not handled.
            _ => Err(Error::UnsupportedFormat(code)),
        }
    }

    /// Bytes per 4x4 block.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }

    /// Canonical four-character code.
    pub const fn four_cc(self) -> FourCC {
        match self {
            Self::Dxt1 => FourCC::DXT1,
            Self::Dxt3 => FourCC::DXT3,
            Self::Dxt5 => FourCC::DXT5,
        }
    }

    /// OpenGL compressed internal format for `glCompressedTexImage2D`.
    pub const fn gl_internal_format(self) -> u32 {
        match self {
            Self::Dxt1 => GL_COMPRESSED_RGBA_S3TC_DXT1_EXT,
            Self::Dxt3 => GL_COMPRESSED_RGBA_S3TC_DXT3_EXT,
            Self::Dxt5 => GL_COMPRESSED_RGBA_S3TC_DXT5_EXT,
        }
    }

    /// Short lowercase name, used for file extensions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dxt1 => "dxt1",
            Self::Dxt3 => "dxt3",
            Self::Dxt5 => "dxt5",
        }
    }
}

impl fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.four_cc())
    }
}
