//! Output pixel formats and capability-driven negotiation
//!
//! The platform tells the core what it can display through a `CapabilitySet`;
//! the core never queries the OS itself. Negotiation follows a fixed
//! precedence table and is surfaced to the caller through
//! `DecodedImage::format` instead of silently changing the contract.

/// Caller-selectable output pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// 8-bit truecolor with alpha
    Rgba8888,
    /// 16-bit float per channel, linear extended range
    RgbaF16,
    /// Packed 16-bit 5-6-5, no alpha
    Rgb565,
    /// Packed 10-bit color with 2-bit alpha
    Rgba1010102,
    /// Opaque platform bitmap; payload layout is RGBA8888, the platform
    /// layer wraps it into its hardware buffer type
    HardwareOpaque,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgba8888 => 4,
            PixelFormat::RgbaF16 => 8,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgba1010102 => 4,
            PixelFormat::HardwareOpaque => 4,
        }
    }
}

/// Platform capabilities furnished by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    /// Half-float bitmaps are available
    pub float16: bool,
    /// Packed 10-bit bitmaps are available
    pub rgba1010102: bool,
    /// Hardware bitmaps are available
    pub hardware: bool,
}

impl CapabilitySet {
    /// Every optional format available
    pub fn everything() -> Self {
        Self {
            float16: true,
            rgba1010102: true,
            hardware: true,
        }
    }

    /// Only the universally supported formats
    pub fn baseline() -> Self {
        Self::default()
    }
}

/// Resolve the format actually produced for a request.
///
/// Precedence: honor the exact request when the capability set supports it
/// and the source carries enough depth; otherwise downgrade along the fixed
/// chain (RGBA1010102 -> RGBA8888, RGBA_F16 -> RGBA8888, HardwareOpaque ->
/// RGBA8888). A request is never upgraded: formats wider than the source
/// bit depth fall back rather than synthesize precision.
pub fn negotiate(requested: PixelFormat, caps: &CapabilitySet, source_depth: u8) -> PixelFormat {
    match requested {
        PixelFormat::Rgba8888 | PixelFormat::Rgb565 => requested,
        PixelFormat::RgbaF16 => {
            if caps.float16 && source_depth > 8 {
                requested
            } else {
                PixelFormat::Rgba8888
            }
        }
        PixelFormat::Rgba1010102 => {
            if caps.rgba1010102 && source_depth > 8 {
                requested
            } else {
                PixelFormat::Rgba8888
            }
        }
        PixelFormat::HardwareOpaque => {
            if caps.hardware {
                requested
            } else {
                PixelFormat::Rgba8888
            }
        }
    }
}
