//! DDS decoding entry points.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use texel_common::{BinaryReader, ReadExt};
use tracing::{debug, warn};

use crate::format::CompressionFormat;
use crate::header::DdsHeader;
use crate::mipmap::extract_mip_chain;
use crate::texture::DecodedTexture;
use crate::{Error, Result, DDS_HEADER_LEN};

/// Knobs for [`DdsDecoder`].
///
/// The defaults decode exactly what the header declares: no size check and
/// a declared mip count of 0 yields no levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject headers whose `size` field is not 124.
    pub strict_header: bool,
    /// Treat a declared mip count of 0 as a single level.
    pub zero_mip_count_as_single: bool,
}

impl DecodeOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`strict_header`](Self::strict_header).
    pub fn strict_header(mut self, strict: bool) -> Self {
        self.strict_header = strict;
        self
    }

    /// Set [`zero_mip_count_as_single`](Self::zero_mip_count_as_single).
    pub fn zero_mip_count_as_single(mut self, enabled: bool) -> Self {
        self.zero_mip_count_as_single = enabled;
        self
    }
}

/// Decoder for DXT1/DXT3/DXT5 DDS files.
///
/// Decoding is a single pass: the header is read and validated, the codec is
/// chosen, the payload is read in full and the mip chain is laid out over it.
/// Either a complete [`DecodedTexture`] is returned or an error, never a
/// partial result. The decoder holds no mutable state and can be shared
/// across threads.
///
/// # Example
///
/// ```no_run
/// use texel_dds::{DdsDecoder, DecodeOptions};
///
/// let decoder = DdsDecoder::with_options(DecodeOptions::new().strict_header(true));
/// let texture = decoder.open("textures/shannon-dxt1.dds")?;
/// for (level, bytes) in texture.iter() {
///     println!("mip {}: {}x{} ({} bytes)", level.index, level.width, level.height, bytes.len());
/// }
/// # Ok::<(), texel_dds::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DdsDecoder {
    options: DecodeOptions,
}

impl DdsDecoder {
    /// Create a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Active options.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode an in-memory DDS file.
    pub fn decode(&self, data: &[u8]) -> Result<DecodedTexture> {
        let mut reader = BinaryReader::new(data);
        let (header, format) = self.read_header(reader.read_bytes(DDS_HEADER_LEN)?)?;
        let payload = reader.remaining_bytes().to_vec();
        self.finish(header, format, payload)
    }

    /// Decode a DDS file from a seekable stream.
    ///
    /// The total length is found by seeking to the end; exactly
    /// `length - 128` payload bytes are then read after the header. A stream
    /// that yields fewer bytes is an I/O error.
    pub fn decode_reader<R: Read + Seek>(&self, mut reader: R) -> Result<DecodedTexture> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header_bytes: [u8; DDS_HEADER_LEN] = reader.read_array()?;
        let (header, format) = self.read_header(&header_bytes)?;

        let payload_len = file_len.saturating_sub(DDS_HEADER_LEN as u64);
        let payload_len =
            usize::try_from(payload_len).map_err(|_| Error::PayloadTooLarge(payload_len))?;
        let payload = reader.read_exact_vec(payload_len)?;

        self.finish(header, format, payload)
    }

    /// Open and decode a DDS file from disk.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<DecodedTexture> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening DDS file");
        let file = File::open(path)?;
        self.decode_reader(BufReader::new(file))
    }

    fn read_header(&self, bytes: &[u8]) -> Result<(DdsHeader, CompressionFormat)> {
        let header = DdsHeader::parse(bytes)?;
        if self.options.strict_header {
            header.validate_size()?;
        }

        let format = CompressionFormat::from_four_cc(header.four_cc()).map_err(|e| {
            if header.is_dx10() {
                debug!("DX10 extended header is not supported");
            }
            e
        })?;
        debug!(
            width = header.width(),
            height = header.height(),
            mipmap_count = header.mipmap_count(),
            format = %format,
            "parsed DDS header"
        );
        Ok((header, format))
    }

    fn finish(
        &self,
        header: DdsHeader,
        format: CompressionFormat,
        payload: Vec<u8>,
    ) -> Result<DecodedTexture> {
        let declared = header.mipmap_count();
        let requested = if declared == 0 && self.options.zero_mip_count_as_single {
            1
        } else {
            declared
        };

        let chain = extract_mip_chain(header.width(), header.height(), requested, format);
        if chain.byte_len() > payload.len() {
            return Err(Error::Truncated {
                needed: chain.byte_len(),
                available: payload.len(),
            });
        }

        if chain.skipped > 0 {
            warn!(
                declared,
                emitted = chain.levels.len(),
                "header declares more mip levels than the base size allows"
            );
        }

        Ok(DecodedTexture::new(header, format, chain, payload))
    }
}

/// Decode an in-memory DDS file with default options.
pub fn decode_dds(data: &[u8]) -> Result<DecodedTexture> {
    DdsDecoder::new().decode(data)
}

/// Open and decode a DDS file with default options.
pub fn load_dds<P: AsRef<Path>>(path: P) -> Result<DecodedTexture> {
    DdsDecoder::new().open(path)
}
