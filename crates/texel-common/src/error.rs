//! Error types for texel-common.

use thiserror::Error;

/// Common error type for Texel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of input reached while reading.
    #[error("unexpected end of input: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
