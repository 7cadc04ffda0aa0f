//! DDS texture decoding for block-compressed mipmap chains.
//!
//! A DDS file is a 128-byte header (magic plus 124 header bytes) followed by
//! the compressed pixel payload. This crate reads the header, selects the
//! S3TC codec from the pixel format's four-character code, and lays out the
//! mipmap chain as `(offset, len)` slices of the payload:
//!
//! - DXT1 - 8 bytes per 4x4 block
//! - DXT3 - 16 bytes per 4x4 block
//! - DXT5 - 16 bytes per 4x4 block
//!
//! DX10 extended headers, uncompressed formats, cube maps and volume
//! textures are rejected.
//!
//! # Example
//!
//! ```no_run
//! use texel_dds::load_dds;
//!
//! let texture = load_dds("path/to/texture.dds")?;
//! println!(
//!     "{} {}x{}, {} levels",
//!     texture.format(),
//!     texture.width(),
//!     texture.height(),
//!     texture.levels().len()
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decoder;
mod error;
mod format;
mod header;
mod mipmap;
mod texture;
mod upload;

#[cfg(test)]
mod fixture;

pub use decoder::{decode_dds, load_dds, DdsDecoder, DecodeOptions};
pub use error::{Error, ErrorKind, Result};
pub use format::{
    CompressionFormat, GL_COMPRESSED_RGBA_S3TC_DXT1_EXT, GL_COMPRESSED_RGBA_S3TC_DXT3_EXT,
    GL_COMPRESSED_RGBA_S3TC_DXT5_EXT,
};
pub use header::{DdsHeader, DdsPixelFormat, FourCC};
pub use mipmap::{extract_mip_chain, level_byte_len, MipChain, MipLevel};
pub use texture::{DecodedTexture, TextureSummary};
pub use upload::TextureSink;

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Magic plus header; the payload starts at this offset.
pub const DDS_HEADER_LEN: usize = 128;
