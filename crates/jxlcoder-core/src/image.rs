//! Decoded and to-be-encoded image buffers

use crate::consts::MAX_IMAGE_DIMENSION;
use crate::{
    ChannelLayout, CodecError, CodecResult, ColorEncoding, Dimensions, PixelFormat,
};

/// Borrowed sample data for an encode call. Read-only for the call duration.
#[derive(Debug, Clone, Copy)]
pub enum SampleSlice<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    F32(&'a [f32]),
}

impl SampleSlice<'_> {
    pub fn len(&self) -> usize {
        match self {
            SampleSlice::U8(s) => s.len(),
            SampleSlice::U16(s) => s.len(),
            SampleSlice::F32(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed view of a caller-owned image handed to the encoder.
///
/// Samples are interleaved in the declared channel layout, normalized to the
/// declared bit depth for integer slices and to [0, 1] for float slices.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    dimensions: Dimensions,
    channels: ChannelLayout,
    bit_depth: u8,
    color: &'a ColorEncoding,
    samples: SampleSlice<'a>,
}

impl<'a> ImageView<'a> {
    pub fn new(
        dimensions: Dimensions,
        channels: ChannelLayout,
        bit_depth: u8,
        color: &'a ColorEncoding,
        samples: SampleSlice<'a>,
    ) -> CodecResult<Self> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(CodecError::InvalidInput(format!(
                "zero dimension: {}x{}",
                dimensions.width, dimensions.height
            )));
        }
        if dimensions.width > MAX_IMAGE_DIMENSION || dimensions.height > MAX_IMAGE_DIMENSION {
            return Err(CodecError::InvalidInput(format!(
                "dimension exceeds maximum: {}x{}",
                dimensions.width, dimensions.height
            )));
        }
        let depth_ok = match samples {
            SampleSlice::U8(_) => bit_depth == 8,
            SampleSlice::U16(_) => matches!(bit_depth, 10 | 12 | 16),
            SampleSlice::F32(_) => matches!(bit_depth, 8 | 10 | 12 | 16),
        };
        if !depth_ok {
            return Err(CodecError::InvalidInput(format!(
                "bit depth {} does not match the sample slice type",
                bit_depth
            )));
        }
        let expected = dimensions.pixel_count() * channels.count();
        if samples.len() != expected {
            return Err(CodecError::InvalidInput(format!(
                "sample buffer length {} does not match {} pixels x {} channels",
                samples.len(),
                dimensions.pixel_count(),
                channels.count()
            )));
        }
        Ok(Self {
            dimensions,
            channels,
            bit_depth,
            color,
            samples,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn channels(&self) -> ChannelLayout {
        self.channels
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn color(&self) -> &ColorEncoding {
        self.color
    }

    pub fn samples(&self) -> SampleSlice<'a> {
        self.samples
    }
}

/// A decoded image. Exclusively owned by the caller; the core holds no
/// reference once decode returns.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Format actually produced after negotiation
    pub format: PixelFormat,
    /// Color encoding of the packed samples after conversion
    pub color: ColorEncoding,
    /// Packed pixel data, `width * height * format.bytes_per_pixel()` bytes
    pub data: Vec<u8>,
}

impl DecodedImage {
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn expected_len(&self) -> usize {
        self.pixel_count() * self.format.bytes_per_pixel()
    }
}
