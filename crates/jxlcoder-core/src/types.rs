//! Descriptor and color-encoding types

use num_traits::NumCast;

/// Image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Channel layout of the coded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelLayout {
    Gray = 1,
    GrayAlpha = 2,
    Rgb = 3,
    Rgba = 4,
}

impl ChannelLayout {
    pub fn count(&self) -> usize {
        *self as usize
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, ChannelLayout::GrayAlpha | ChannelLayout::Rgba)
    }

    pub fn is_gray(&self) -> bool {
        matches!(self, ChannelLayout::Gray | ChannelLayout::GrayAlpha)
    }

    /// Number of color channels, excluding alpha
    pub fn color_count(&self) -> usize {
        if self.is_gray() {
            1
        } else {
            3
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Gray),
            2 => Some(ChannelLayout::GrayAlpha),
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }
}

/// Color primaries of the coded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Primaries {
    Srgb,
    DisplayP3,
    Bt2020,
}

/// Transfer function of the coded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferFunction {
    Srgb,
    Linear,
    Pq,
    Hlg,
}

impl TransferFunction {
    /// PQ and HLG carry high dynamic range content
    pub fn is_hdr(&self) -> bool {
        matches!(self, TransferFunction::Pq | TransferFunction::Hlg)
    }
}

/// White point of the coded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WhitePoint {
    D65,
    Dci,
}

/// Declared color encoding: primaries, transfer function, white point, and
/// an optional embedded ICC profile carried opaquely.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorEncoding {
    pub primaries: Primaries,
    pub transfer: TransferFunction,
    pub white_point: WhitePoint,
    pub icc: Option<Vec<u8>>,
}

impl ColorEncoding {
    pub fn new(primaries: Primaries, transfer: TransferFunction, white_point: WhitePoint) -> Self {
        Self {
            primaries,
            transfer,
            white_point,
            icc: None,
        }
    }

    /// Standard sRGB encoding
    pub fn srgb() -> Self {
        Self::new(Primaries::Srgb, TransferFunction::Srgb, WhitePoint::D65)
    }

    /// Linear sRGB encoding
    pub fn linear_srgb() -> Self {
        Self::new(Primaries::Srgb, TransferFunction::Linear, WhitePoint::D65)
    }

    /// BT.2020 with the PQ transfer (HDR10-style)
    pub fn bt2020_pq() -> Self {
        Self::new(Primaries::Bt2020, TransferFunction::Pq, WhitePoint::D65)
    }

    pub fn is_hdr(&self) -> bool {
        self.transfer.is_hdr()
    }

    /// True when two encodings describe the same pixel values bit-for-bit
    /// (ICC payload excluded, it is carried opaquely).
    pub fn matches(&self, other: &ColorEncoding) -> bool {
        self.primaries == other.primaries
            && self.transfer == other.transfer
            && self.white_point == other.white_point
    }
}

/// Payload coding mode recorded in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodingMode {
    /// Block-transform lossy mode
    VarDct,
    /// Predictive lossless mode
    Modular,
}

/// Header-only description of a coded image. Produced by `probe` without
/// allocating pixel memory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub channels: ChannelLayout,
    pub color: ColorEncoding,
    pub mode: CodingMode,
}

impl ImageDescriptor {
    pub fn has_alpha(&self) -> bool {
        self.channels.has_alpha()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Image sample type
pub trait Sample: Copy + NumCast + PartialOrd {
    fn to_f32(self) -> f32;
    fn from_f32(value: f32) -> Self;
}

impl Sample for u8 {
    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    fn from_f32(value: f32) -> Self {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

impl Sample for u16 {
    fn to_f32(self) -> f32 {
        self as f32 / 65535.0
    }

    fn from_f32(value: f32) -> Self {
        (value * 65535.0).round().clamp(0.0, 65535.0) as u16
    }
}

impl Sample for f32 {
    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}
