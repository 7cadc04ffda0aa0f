//! Hand-off of decoded levels to a graphics backend.

use crate::format::CompressionFormat;
use crate::mipmap::MipLevel;
use crate::texture::DecodedTexture;

/// Receiver for compressed mip levels, typically a GPU texture object.
///
/// A GL backend maps [`set_level_range`](Self::set_level_range) to
/// `GL_TEXTURE_BASE_LEVEL`/`GL_TEXTURE_MAX_LEVEL` and
/// [`upload_level`](Self::upload_level) to `glCompressedTexImage2D` with
/// [`CompressionFormat::gl_internal_format`].
pub trait TextureSink {
    /// Backend error type.
    type Error;

    /// Declare the inclusive range of mip indices that will be provided.
    fn set_level_range(&mut self, base: u32, max: u32) -> Result<(), Self::Error>;

    /// Receive one level's compressed blocks.
    fn upload_level(
        &mut self,
        format: CompressionFormat,
        level: &MipLevel,
        data: &[u8],
    ) -> Result<(), Self::Error>;
}

impl DecodedTexture {
    /// Push every level into `sink`, largest first.
    ///
    /// Does nothing for a texture without levels. Stops at the first sink error.
    pub fn upload<S: TextureSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        let Some(max) = self.max_level() else {
            return Ok(());
        };

        sink.set_level_range(0, max)?;
        for (level, data) in self.iter() {
            sink.upload_level(self.format(), level, data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_dds;
    use crate::fixture::DdsBuilder;
    use crate::header::FourCC;

    #[derive(Default)]
    struct RecordingSink {
        range: Option<(u32, u32)>,
        uploads: Vec<(u32, u32, u32, u32, usize)>,
        fail_at: Option<u32>,
    }

    impl TextureSink for RecordingSink {
        type Error = String;

        fn set_level_range(&mut self, base: u32, max: u32) -> Result<(), String> {
            self.range = Some((base, max));
            Ok(())
        }

        fn upload_level(
            &mut self,
            format: CompressionFormat,
            level: &MipLevel,
            data: &[u8],
        ) -> Result<(), String> {
            if self.fail_at == Some(level.index) {
                return Err(format!("level {} rejected", level.index));
            }
            self.uploads.push((
                format.gl_internal_format(),
                level.index,
                level.width,
                level.height,
                data.len(),
            ));
            Ok(())
        }
    }

    #[test]
    fn test_upload_all_levels() {
        let data = DdsBuilder::new(FourCC::DXT5, 3, 3).mip_count(3).build();
        let texture = decode_dds(&data).unwrap();

        let mut sink = RecordingSink::default();
        texture.upload(&mut sink).unwrap();

        assert_eq!(sink.range, Some((0, 1)));
        assert_eq!(
            sink.uploads,
            vec![(0x83F3, 0, 3, 3, 16), (0x83F3, 1, 1, 1, 16)]
        );
    }

    #[test]
    fn test_upload_stops_on_error() {
        let data = DdsBuilder::new(FourCC::DXT1, 16, 16).mip_count(5).build();
        let texture = decode_dds(&data).unwrap();

        let mut sink = RecordingSink {
            fail_at: Some(2),
            ..Default::default()
        };
        let err = texture.upload(&mut sink).unwrap_err();

        assert_eq!(err, "level 2 rejected");
        assert_eq!(sink.uploads.len(), 2);
    }

    #[test]
    fn test_upload_empty_texture() {
        let data = DdsBuilder::new(FourCC::DXT1, 0, 16).mip_count(2).build();
        let texture = decode_dds(&data).unwrap();

        let mut sink = RecordingSink::default();
        texture.upload(&mut sink).unwrap();
        assert!(sink.range.is_none());
        assert!(sink.uploads.is_empty());
    }
}
