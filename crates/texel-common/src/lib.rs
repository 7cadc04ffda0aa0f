//! Common utilities for Texel.
//!
//! This crate provides the foundational reading primitives used by the
//! texture crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`ReadExt`] - Exact-length reads from `std::io::Read` streams

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::{BinaryReader, ReadExt};
