//! Codestream header parsing and generation
//!
//! The header carries everything `probe` reports: dimensions, bit depth,
//! channel layout, the declared color encoding, and the payload coding mode.
//! Parsing never touches entropy-coded data, so its cost is independent of
//! pixel count.

pub mod container;

use jxlcoder_bitstream::{BitReader, BitWriter, BitstreamResult};
use jxlcoder_core::consts::{MAX_ICC_SIZE, MAX_IMAGE_DIMENSION};
use jxlcoder_core::{
    ChannelLayout, CodecError, CodecResult, CodingMode, ColorEncoding, Dimensions,
    ImageDescriptor, Primaries, TransferFunction, WhitePoint,
};

pub use container::{
    is_recognized_container, resolve_codestream, Container, ContainerBox, ContainerSignature,
    BoxType, CODESTREAM_SIGNATURE, CONTAINER_SIGNATURE,
};

/// Codestream signature as a bit-packed value (bytes FF 0A on the wire)
const SIGNATURE_BITS: u64 = 0x0AFF;

/// Largest dimension expressible in the small size class
const SMALL_SIZE_LIMIT: u32 = 32;

fn truncated(err: jxlcoder_bitstream::BitstreamError) -> CodecError {
    CodecError::MalformedHeader(format!("truncated header: {err}"))
}

/// Parsed codestream header
#[derive(Debug, Clone, PartialEq)]
pub struct CodestreamHeader {
    pub dimensions: Dimensions,
    pub bit_depth: u8,
    pub channels: ChannelLayout,
    pub color: ColorEncoding,
    pub mode: CodingMode,
    /// Lossy distance in 1/16 steps; zero in modular mode
    pub quantizer: u8,
}

impl CodestreamHeader {
    /// Butteraugli-style distance encoded in the quantizer field
    pub fn distance(&self) -> f32 {
        self.quantizer as f32 / 16.0
    }

    pub fn descriptor(&self) -> ImageDescriptor {
        ImageDescriptor {
            width: self.dimensions.width,
            height: self.dimensions.height,
            bit_depth: self.bit_depth,
            channels: self.channels,
            color: self.color.clone(),
            mode: self.mode,
        }
    }

    /// Parse the header from the front of a codestream
    pub fn parse(reader: &mut BitReader) -> CodecResult<Self> {
        let signature = reader.read_bits(16).map_err(truncated)?;
        if signature != SIGNATURE_BITS {
            return Err(CodecError::MalformedHeader(
                "missing codestream signature".to_string(),
            ));
        }

        let size_class = reader.read_bits(8).map_err(truncated)?;
        let (width, height) = if size_class == 0 {
            let w = reader.read_bits(5).map_err(truncated)? as u32 + 1;
            let h = reader.read_bits(5).map_err(truncated)? as u32 + 1;
            (w, h)
        } else {
            let w = reader.read_u32(9).map_err(truncated)?;
            let h = reader.read_u32(9).map_err(truncated)?;
            (w, h)
        };
        if width == 0 || height == 0 {
            return Err(CodecError::MalformedHeader(format!(
                "zero dimension: {width}x{height}"
            )));
        }
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(CodecError::MalformedHeader(format!(
                "dimension exceeds maximum: {width}x{height}"
            )));
        }

        let bit_depth = match reader.read_bits(2).map_err(truncated)? {
            0 => 8,
            1 => 10,
            2 => 12,
            _ => reader.read_bits(6).map_err(truncated)? as u8 + 1,
        };
        if !matches!(bit_depth, 8 | 10 | 12 | 16) {
            return Err(CodecError::UnsupportedFeature(format!(
                "{bit_depth}-bit samples"
            )));
        }

        let channel_count = reader.read_bits(3).map_err(truncated)? as usize;
        let channels = ChannelLayout::from_count(channel_count).ok_or_else(|| {
            CodecError::MalformedHeader(format!(
                "channel count {channel_count} outside supported range 1-4"
            ))
        })?;

        let primaries = match reader.read_bits(2).map_err(truncated)? {
            0 => Primaries::Srgb,
            1 => Primaries::DisplayP3,
            2 => Primaries::Bt2020,
            other => {
                return Err(CodecError::UnsupportedFeature(format!(
                    "reserved primaries code {other}"
                )))
            }
        };
        let transfer = match reader.read_bits(2).map_err(truncated)? {
            0 => TransferFunction::Srgb,
            1 => TransferFunction::Linear,
            2 => TransferFunction::Pq,
            _ => TransferFunction::Hlg,
        };
        let white_point = match reader.read_bits(2).map_err(truncated)? {
            0 => WhitePoint::D65,
            1 => WhitePoint::Dci,
            other => {
                return Err(CodecError::UnsupportedFeature(format!(
                    "reserved white point code {other}"
                )))
            }
        };

        let mut color = ColorEncoding::new(primaries, transfer, white_point);
        if reader.read_bit().map_err(truncated)? {
            let icc_len = reader.read_u32(16).map_err(truncated)?;
            if icc_len == 0 || icc_len > MAX_ICC_SIZE {
                return Err(CodecError::MalformedHeader(format!(
                    "implausible ICC profile length {icc_len}"
                )));
            }
            let mut icc = Vec::with_capacity(icc_len as usize);
            for _ in 0..icc_len {
                icc.push(reader.read_bits(8).map_err(truncated)? as u8);
            }
            color.icc = Some(icc);
        }

        let mode = if reader.read_bit().map_err(truncated)? {
            CodingMode::Modular
        } else {
            CodingMode::VarDct
        };
        let quantizer = if mode == CodingMode::VarDct {
            reader.read_bits(8).map_err(truncated)? as u8
        } else {
            0
        };

        Ok(Self {
            dimensions: Dimensions::new(width, height),
            bit_depth,
            channels,
            color,
            mode,
            quantizer,
        })
    }

    /// Write the header; exact inverse of `parse`
    pub fn write(&self, writer: &mut BitWriter) -> BitstreamResult<()> {
        writer.write_bits(SIGNATURE_BITS, 16)?;

        let Dimensions { width, height } = self.dimensions;
        let small = width <= SMALL_SIZE_LIMIT && height <= SMALL_SIZE_LIMIT;
        writer.write_bits(if small { 0 } else { 1 }, 8)?;
        if small {
            writer.write_bits((width - 1) as u64, 5)?;
            writer.write_bits((height - 1) as u64, 5)?;
        } else {
            writer.write_u32(width, 9)?;
            writer.write_u32(height, 9)?;
        }

        match self.bit_depth {
            8 => writer.write_bits(0, 2)?,
            10 => writer.write_bits(1, 2)?,
            12 => writer.write_bits(2, 2)?,
            depth => {
                writer.write_bits(3, 2)?;
                writer.write_bits((depth - 1) as u64, 6)?;
            }
        }

        writer.write_bits(self.channels.count() as u64, 3)?;

        writer.write_bits(
            match self.color.primaries {
                Primaries::Srgb => 0,
                Primaries::DisplayP3 => 1,
                Primaries::Bt2020 => 2,
            },
            2,
        )?;
        writer.write_bits(
            match self.color.transfer {
                TransferFunction::Srgb => 0,
                TransferFunction::Linear => 1,
                TransferFunction::Pq => 2,
                TransferFunction::Hlg => 3,
            },
            2,
        )?;
        writer.write_bits(
            match self.color.white_point {
                WhitePoint::D65 => 0,
                WhitePoint::Dci => 1,
            },
            2,
        )?;

        match &self.color.icc {
            Some(icc) => {
                writer.write_bit(true)?;
                writer.write_u32(icc.len() as u32, 16)?;
                for &byte in icc {
                    writer.write_bits(byte as u64, 8)?;
                }
            }
            None => writer.write_bit(false)?,
        }

        writer.write_bit(self.mode == CodingMode::Modular)?;
        if self.mode == CodingMode::VarDct {
            writer.write_bits(self.quantizer as u64, 8)?;
        }

        Ok(())
    }
}

/// Probe a buffer for its image descriptor without decoding pixels.
///
/// Accepts both raw codestreams and boxed containers. Header-only: no pixel
/// memory is allocated and the cost does not depend on image size.
pub fn probe(bytes: &[u8]) -> CodecResult<ImageDescriptor> {
    let codestream = resolve_codestream(bytes)?;
    let mut reader = BitReader::new(&codestream);
    let header = CodestreamHeader::parse(&mut reader)?;
    Ok(header.descriptor())
}
