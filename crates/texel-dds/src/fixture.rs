//! Synthetic DDS files for tests.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::header::FourCC;
use crate::DDS_MAGIC;

const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_MIPMAPCOUNT: u32 = 0x20000;
const DDSD_LINEARSIZE: u32 = 0x80000;
const DDPF_FOURCC: u32 = 0x4;

/// Builds a DDS file whose level `i` is filled with the byte `i`.
#[derive(Debug, Clone)]
pub(crate) struct DdsBuilder {
    four_cc: FourCC,
    width: u32,
    height: u32,
    mip_count: u32,
    header_size: u32,
    payload: Option<Vec<u8>>,
}

impl DdsBuilder {
    pub(crate) fn new(four_cc: FourCC, width: u32, height: u32) -> Self {
        Self {
            four_cc,
            width,
            height,
            mip_count: 1,
            header_size: 124,
            payload: None,
        }
    }

    pub(crate) fn mip_count(mut self, mip_count: u32) -> Self {
        self.mip_count = mip_count;
        self
    }

    pub(crate) fn header_size(mut self, header_size: u32) -> Self {
        self.header_size = header_size;
        self
    }

    /// Replace the generated level data with explicit bytes.
    pub(crate) fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Byte size of each level with data, as a DDS writer lays them out.
    pub(crate) fn level_sizes(&self) -> Vec<usize> {
        let block = if self.four_cc.0[3] == b'1' { 8 } else { 16 };
        let (mut w, mut h) = (self.width as usize, self.height as usize);
        let mut sizes = Vec::new();
        for _ in 0..self.mip_count {
            if w == 0 || h == 0 {
                break;
            }
            sizes.push(w.div_ceil(4) * h.div_ceil(4) * block);
            w /= 2;
            h /= 2;
        }
        sizes
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let sizes = self.level_sizes();
        let mut out = Vec::new();

        out.extend_from_slice(DDS_MAGIC);
        out.write_u32::<LittleEndian>(self.header_size).unwrap();
        out.write_u32::<LittleEndian>(
            DDSD_CAPS
                | DDSD_HEIGHT
                | DDSD_WIDTH
                | DDSD_PIXELFORMAT
                | DDSD_MIPMAPCOUNT
                | DDSD_LINEARSIZE,
        )
        .unwrap();
        out.write_u32::<LittleEndian>(self.height).unwrap();
        out.write_u32::<LittleEndian>(self.width).unwrap();
        out.write_u32::<LittleEndian>(sizes.first().copied().unwrap_or(0) as u32)
            .unwrap();
        out.write_u32::<LittleEndian>(0).unwrap(); // depth
        out.write_u32::<LittleEndian>(self.mip_count).unwrap();
        for _ in 0..11 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }

        out.write_u32::<LittleEndian>(32).unwrap();
        out.write_u32::<LittleEndian>(DDPF_FOURCC).unwrap();
        out.extend_from_slice(&self.four_cc.0);
        for _ in 0..5 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }

        let caps = if self.mip_count > 1 { 0x401008 } else { 0x1000 };
        out.write_u32::<LittleEndian>(caps).unwrap();
        for _ in 0..4 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }
        assert_eq!(out.len(), 128);

        match &self.payload {
            Some(payload) => out.extend_from_slice(payload),
            None => {
                for (i, size) in sizes.iter().enumerate() {
                    out.extend(std::iter::repeat(i as u8).take(*size));
                }
            }
        }
        out
    }
}
