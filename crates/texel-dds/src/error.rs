//! Error types for DDS handling.

use thiserror::Error;

use crate::header::FourCC;

/// Errors that can occur when decoding DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] texel_common::Error),

    /// Invalid DDS magic.
    #[error("not a DDS file: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Header size field is not 124 (strict mode only).
    #[error("invalid DDS header size: expected 124, got {0}")]
    InvalidHeaderSize(u32),

    /// Pixel format is not one of DXT1, DXT3 or DXT5.
    #[error("unsupported DDS pixel format: {0}")]
    UnsupportedFormat(FourCC),

    /// The mipmap chain declared by the header runs past the payload.
    #[error("truncated DDS payload: mipmaps need {needed} bytes but only {available} available")]
    Truncated { needed: usize, available: usize },

    /// The payload does not fit in memory on this platform.
    #[error("DDS payload of {0} bytes is too large")]
    PayloadTooLarge(u64),
}

/// Broad failure categories a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The source could not be opened or read to its expected length.
    Io,
    /// The source is not a DDS file.
    Format,
    /// A DDS file using a codec this crate does not decode.
    UnsupportedFormat,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_)
            | Error::Common(_)
            | Error::Truncated { .. }
            | Error::PayloadTooLarge(_) => ErrorKind::Io,
            Error::InvalidMagic(_) | Error::InvalidHeaderSize(_) => ErrorKind::Format,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
        }
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
