//! Mipmap chain layout.

use std::ops::Range;

use tracing::{debug, trace};

use crate::format::CompressionFormat;

/// One mipmap level's slice of the pixel payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MipLevel {
    /// Mip index, 0 being the full-size image.
    pub index: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Byte offset into the payload.
    pub offset: usize,
    /// Byte length of the compressed data.
    pub len: usize,
}

impl MipLevel {
    /// Byte range of this level within the payload.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Offset one past the last byte of this level.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }
}

/// The levels extracted from a header's declared mip count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipChain {
    /// Levels with real data, in order.
    pub levels: Vec<MipLevel>,
    /// Declared levels dropped because a dimension reached zero.
    pub skipped: u32,
}

impl MipChain {
    /// Zero-based index of the last level, `None` when the chain is empty.
    pub fn max_level(&self) -> Option<u32> {
        (self.levels.len() as u32).checked_sub(1)
    }

    /// Total payload bytes covered by the chain.
    pub fn byte_len(&self) -> usize {
        self.levels.last().map_or(0, MipLevel::end)
    }
}

/// Size in bytes of one block-compressed image.
pub fn level_byte_len(width: u32, height: u32, format: CompressionFormat) -> usize {
    let blocks_x = width.div_ceil(4) as usize;
    let blocks_y = height.div_ceil(4) as usize;
    blocks_x
        .saturating_mul(blocks_y)
        .saturating_mul(format.block_size())
}

/// Lay out `declared` mip levels starting from a `width` x `height` base.
///
/// Each level halves both dimensions (flooring). Once either dimension
/// reaches zero the level and every level after it is counted as skipped
/// and no further bytes are consumed. Byte ranges are contiguous from 0.
pub fn extract_mip_chain(
    width: u32,
    height: u32,
    declared: u32,
    format: CompressionFormat,
) -> MipChain {
    // At most 33 levels can have non-zero dimensions for u32 sizes.
    let mut levels = Vec::with_capacity(declared.min(33) as usize);
    let (mut w, mut h) = (width, height);
    let mut offset = 0usize;

    for index in 0..declared {
        if w == 0 || h == 0 {
            // Halving never recovers from zero, so the rest are degenerate too.
            trace!(index, declared, "discarding degenerate mip levels");
            break;
        }

        let len = level_byte_len(w, h, format);
        debug!(index, width = w, height = h, offset, len, "mip level");
        levels.push(MipLevel {
            index,
            width: w,
            height: h,
            offset,
            len,
        });

        offset = offset.saturating_add(len);
        w /= 2;
        h /= 2;
    }

    let skipped = declared - levels.len() as u32;
    MipChain { levels, skipped }
}
