//! Logarithmic tone mapping for HDR content on SDR outputs
//!
//! Range compression is a luminance rescale: the output luminance follows
//! log(1 + L) normalized to the content peak, and the three channels are
//! scaled by the common ratio. Monotonic in L, so relative ordering of
//! luminance is preserved; hard clipping only happens at the final clamp to
//! the SDR white point.

use jxlcoder_core::TransferFunction;

/// Rec.709 luminance weights
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Nominal content peak relative to SDR reference white
pub fn content_peak(tf: TransferFunction) -> f32 {
    match tf {
        TransferFunction::Pq => 10_000.0 / 203.0,
        TransferFunction::Hlg => 1_000.0 / 203.0,
        TransferFunction::Srgb | TransferFunction::Linear => 1.0,
    }
}

/// Logarithmic luminance tone mapper
#[derive(Debug, Clone, Copy)]
pub struct LogToneMapper {
    scale: f32,
}

impl LogToneMapper {
    /// `peak` is the luminance that should map to SDR white, relative to
    /// the reference white (values at or below 1.0 disable compression).
    pub fn new(peak: f32) -> Self {
        let scale = if peak > 1.0 {
            1.0 / (1.0 + peak).ln()
        } else {
            0.0
        };
        Self { scale }
    }

    /// Map one linear RGB triple in place
    #[inline]
    pub fn map(&self, rgb: &mut [f32; 3]) {
        if self.scale == 0.0 {
            return;
        }
        let luma = LUMA_R * rgb[0] + LUMA_G * rgb[1] + LUMA_B * rgb[2];
        if luma <= 0.0 {
            return;
        }
        let mapped = (1.0 + luma).ln() * self.scale;
        let ratio = mapped / luma;
        for c in rgb.iter_mut() {
            *c = (*c * ratio).min(1.0);
        }
    }
}
