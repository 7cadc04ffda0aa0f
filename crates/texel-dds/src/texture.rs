//! Decoded texture value.

use std::fmt;

use crate::format::CompressionFormat;
use crate::header::DdsHeader;
use crate::mipmap::{MipChain, MipLevel};

/// A fully decoded DDS file: codec, mip layout and owned pixel payload.
///
/// Immutable once built. Level slices are `(offset, len)` pairs into the
/// payload, so the value can be cloned or stored freely.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    header: DdsHeader,
    format: CompressionFormat,
    chain: MipChain,
    payload: Vec<u8>,
}

impl DecodedTexture {
    pub(crate) fn new(
        header: DdsHeader,
        format: CompressionFormat,
        chain: MipChain,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            header,
            format,
            chain,
            payload,
        }
    }

    /// The raw header the texture was decoded from.
    pub fn header(&self) -> &DdsHeader {
        &self.header
    }

    /// Block-compression codec.
    pub fn format(&self) -> CompressionFormat {
        self.format
    }

    /// Width of level 0.
    pub fn width(&self) -> u32 {
        self.header.width()
    }

    /// Height of level 0.
    pub fn height(&self) -> u32 {
        self.header.height()
    }

    /// Mip count written in the header.
    pub fn declared_mip_count(&self) -> u32 {
        self.header.mipmap_count()
    }

    /// Levels with real data, largest first.
    pub fn levels(&self) -> &[MipLevel] {
        &self.chain.levels
    }

    /// Level descriptor by index.
    pub fn level(&self, index: usize) -> Option<&MipLevel> {
        self.chain.levels.get(index)
    }

    /// Compressed bytes of one level.
    pub fn level_data(&self, index: usize) -> Option<&[u8]> {
        self.level(index).map(|level| &self.payload[level.range()])
    }

    /// Iterate over levels paired with their compressed bytes.
    pub fn iter(&self) -> impl Iterator<Item = (&MipLevel, &[u8])> + '_ {
        self.chain
            .levels
            .iter()
            .map(move |level| (level, &self.payload[level.range()]))
    }

    /// Zero-based index of the smallest level; a single-level texture has 0.
    pub fn max_level(&self) -> Option<u32> {
        self.chain.max_level()
    }

    /// Declared levels that were dropped because a dimension reached zero.
    pub fn skipped_levels(&self) -> u32 {
        self.chain.skipped
    }

    /// Everything after the 128-byte header.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Take ownership of the payload buffer.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Everything except the payload bytes.
    pub fn summary(&self) -> TextureSummary {
        TextureSummary {
            format: self.format,
            width: self.width(),
            height: self.height(),
            declared_mip_count: self.declared_mip_count(),
            max_level: self.max_level(),
            skipped_levels: self.skipped_levels(),
            payload_len: self.payload.len(),
            levels: self.chain.levels.clone(),
        }
    }
}

impl fmt::Debug for DecodedTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedTexture")
            .field("format", &self.format)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("levels", &self.chain.levels.len())
            .field("skipped", &self.chain.skipped)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// Payload-free description of a [`DecodedTexture`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextureSummary {
    /// Block-compression codec.
    pub format: CompressionFormat,
    /// Width of level 0.
    pub width: u32,
    /// Height of level 0.
    pub height: u32,
    /// Mip count written in the header.
    pub declared_mip_count: u32,
    /// Index of the smallest level, `None` without levels.
    pub max_level: Option<u32>,
    /// Declared levels dropped because a dimension reached zero.
    pub skipped_levels: u32,
    /// Bytes after the header.
    pub payload_len: usize,
    /// Level layout, largest first.
    pub levels: Vec<MipLevel>,
}

#[cfg(test)]
mod tests {
    use crate::fixture::DdsBuilder;
    use crate::header::FourCC;
    use crate::{decode_dds, CompressionFormat};

    #[test]
    fn test_level_data_slices() {
        let data = DdsBuilder::new(FourCC::DXT1, 8, 8).mip_count(4).build();
        let texture = decode_dds(&data).unwrap();

        assert_eq!(texture.levels().len(), 4);
        for (i, (level, bytes)) in texture.iter().enumerate() {
            assert_eq!(bytes.len(), level.len);
            // The fixture fills each level with its own index.
            assert!(bytes.iter().all(|&b| b == i as u8));
        }
        assert_eq!(texture.level_data(0).unwrap().len(), 32);
        assert!(texture.level_data(4).is_none());
    }

    #[test]
    fn test_summary_matches_texture() {
        let data = DdsBuilder::new(FourCC::DXT3, 16, 8).mip_count(5).build();
        let texture = decode_dds(&data).unwrap();
        let summary = texture.summary();

        assert_eq!(summary.format, CompressionFormat::Dxt3);
        assert_eq!((summary.width, summary.height), (16, 8));
        assert_eq!(summary.declared_mip_count, 5);
        assert_eq!(summary.levels.len(), 4);
        assert_eq!(summary.skipped_levels, 1);
        assert_eq!(summary.max_level, Some(3));
        assert_eq!(summary.payload_len, texture.payload().len());
    }

    #[test]
    fn test_debug_omits_payload() {
        let data = DdsBuilder::new(FourCC::DXT1, 4, 4).build();
        let texture = decode_dds(&data).unwrap();
        let debug = format!("{texture:?}");
        assert!(debug.contains("payload_len: 8"));
    }
}
