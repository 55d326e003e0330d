//! Output packing into the negotiated pixel format
//!
//! Input is interleaved RGBA f32. Integer formats clamp to [0, 1]; the float
//! format keeps extended range. Rows are independent, so packing runs in
//! parallel per row.

use byteorder::{ByteOrder, LittleEndian};
use half::f16;
use jxlcoder_core::{Dimensions, PixelFormat, Sample};
use rayon::prelude::*;

/// Pack interleaved RGBA f32 samples into the output format
pub fn pack(rgba: &[f32], dims: Dimensions, format: PixelFormat) -> Vec<u8> {
    let width = dims.width as usize;
    let row_bytes = width * format.bytes_per_pixel();
    let mut out = vec![0u8; dims.pixel_count() * format.bytes_per_pixel()];

    out.par_chunks_mut(row_bytes)
        .zip(rgba.par_chunks(width * 4))
        .for_each(|(row_out, row_in)| pack_row(row_in, row_out, format));

    out
}

fn pack_row(row_in: &[f32], row_out: &mut [u8], format: PixelFormat) {
    match format {
        PixelFormat::Rgba8888 | PixelFormat::HardwareOpaque => {
            for (pixel, out) in row_in.chunks_exact(4).zip(row_out.chunks_exact_mut(4)) {
                for (o, &v) in out.iter_mut().zip(pixel) {
                    *o = u8::from_f32(v);
                }
            }
        }
        PixelFormat::RgbaF16 => {
            for (pixel, out) in row_in.chunks_exact(4).zip(row_out.chunks_exact_mut(8)) {
                for (i, &v) in pixel.iter().enumerate() {
                    let bits = f16::from_f32(v).to_bits();
                    LittleEndian::write_u16(&mut out[i * 2..i * 2 + 2], bits);
                }
            }
        }
        PixelFormat::Rgb565 => {
            for (pixel, out) in row_in.chunks_exact(4).zip(row_out.chunks_exact_mut(2)) {
                let r = quantize(pixel[0], 31);
                let g = quantize(pixel[1], 63);
                let b = quantize(pixel[2], 31);
                LittleEndian::write_u16(out, (r << 11) | (g << 5) | b);
            }
        }
        PixelFormat::Rgba1010102 => {
            for (pixel, out) in row_in.chunks_exact(4).zip(row_out.chunks_exact_mut(4)) {
                let r = quantize(pixel[0], 1023) as u32;
                let g = quantize(pixel[1], 1023) as u32;
                let b = quantize(pixel[2], 1023) as u32;
                let a = quantize(pixel[3], 3) as u32;
                LittleEndian::write_u32(out, r | (g << 10) | (b << 20) | (a << 30));
            }
        }
    }
}

#[inline]
fn quantize(v: f32, max: u16) -> u16 {
    (v.clamp(0.0, 1.0) * max as f32).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8888_packing() {
        let rgba = [0.0, 0.5, 1.0, 1.0];
        let out = pack(&rgba, Dimensions::new(1, 1), PixelFormat::Rgba8888);
        assert_eq!(out, vec![0, 128, 255, 255]);
    }

    #[test]
    fn test_rgb565_packing() {
        let rgba = [1.0, 0.0, 1.0, 1.0];
        let out = pack(&rgba, Dimensions::new(1, 1), PixelFormat::Rgb565);
        let word = LittleEndian::read_u16(&out);
        assert_eq!(word >> 11, 31);
        assert_eq!((word >> 5) & 0x3F, 0);
        assert_eq!(word & 0x1F, 31);
    }

    #[test]
    fn test_rgba1010102_packing() {
        let rgba = [1.0, 0.0, 0.0, 1.0];
        let out = pack(&rgba, Dimensions::new(1, 1), PixelFormat::Rgba1010102);
        let word = LittleEndian::read_u32(&out);
        assert_eq!(word & 0x3FF, 1023);
        assert_eq!((word >> 10) & 0x3FF, 0);
        assert_eq!(word >> 30, 3);
    }

    #[test]
    fn test_f16_keeps_extended_range() {
        let rgba = [2.5, 1.0, 0.0, 1.0];
        let out = pack(&rgba, Dimensions::new(1, 1), PixelFormat::RgbaF16);
        let r = f16::from_bits(LittleEndian::read_u16(&out[0..2]));
        assert!((r.to_f32() - 2.5).abs() < 1e-2);
    }

    #[test]
    fn test_buffer_length_invariant() {
        let dims = Dimensions::new(3, 2);
        let rgba = vec![0.5f32; dims.pixel_count() * 4];
        for format in [
            PixelFormat::Rgba8888,
            PixelFormat::RgbaF16,
            PixelFormat::Rgb565,
            PixelFormat::Rgba1010102,
            PixelFormat::HardwareOpaque,
        ] {
            let out = pack(&rgba, dims, format);
            assert_eq!(out.len(), dims.pixel_count() * format.bytes_per_pixel());
        }
    }
}
