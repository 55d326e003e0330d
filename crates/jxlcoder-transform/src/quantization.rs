//! Distance-driven quantization for the lossy path
//!
//! Distance follows the butteraugli convention: 0 is
//! mathematically-lossless-adjacent (unit steps), 1 visually lossless, 15
//! maximally coarse. Chroma-like channels (X and B-Y) use a coarser table
//! than luma.

/// Quantization steps for one 8x8 block, zigzag-agnostic row-major order
pub type QuantTable = [u16; 64];

/// Coded samples are scaled into this range before the block transform so
/// the base table below applies at its designed magnitudes.
pub const CODING_SCALE: f32 = 255.0;

/// Base frequency weighting (JPEG-style, tuned for 255-range samples)
const BASE_TABLE: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69,
    56, 14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81,
    104, 113, 92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

/// Chroma channels tolerate coarser steps than luma
const CHROMA_SCALE: f32 = 1.5;

/// Per-channel tables for the decorrelated color space
#[derive(Debug, Clone)]
pub struct ChannelQuantTables {
    pub x: QuantTable,
    pub y: QuantTable,
    pub b: QuantTable,
}

impl ChannelQuantTables {
    /// Build the three tables for a lossy distance in [0, 15]
    pub fn for_distance(distance: f32) -> Self {
        let quality = (100.0 - distance.clamp(0.0, 15.0) * 6.25).clamp(1.0, 100.0);
        let scale = if quality < 50.0 {
            5000.0 / quality
        } else {
            200.0 - 2.0 * quality
        };

        Self {
            x: scaled_table(scale * CHROMA_SCALE),
            y: scaled_table(scale),
            b: scaled_table(scale * CHROMA_SCALE),
        }
    }

    pub fn for_channel(&self, channel: usize) -> &QuantTable {
        match channel {
            0 => &self.x,
            1 => &self.y,
            _ => &self.b,
        }
    }
}

fn scaled_table(scale: f32) -> QuantTable {
    let mut table = [0u16; 64];
    for (slot, &base) in table.iter_mut().zip(BASE_TABLE.iter()) {
        let q = (base as f32 * scale / 100.0 + 0.5).max(1.0);
        *slot = q.min(255.0) as u16;
    }
    table
}

/// Quantize one block of transform coefficients
pub fn quantize_block(coeffs: &[f32; 64], table: &QuantTable, output: &mut [i16; 64]) {
    for ((out, &c), &q) in output.iter_mut().zip(coeffs.iter()).zip(table.iter()) {
        *out = (c / q as f32).round() as i16;
    }
}

/// Reverse quantization of one block
pub fn dequantize_block(quantized: &[i16; 64], table: &QuantTable, output: &mut [f32; 64]) {
    for ((out, &c), &q) in output.iter_mut().zip(quantized.iter()).zip(table.iter()) {
        *out = c as f32 * q as f32;
    }
}
