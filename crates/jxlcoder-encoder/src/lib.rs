//! Pixel encoder
//!
//! Two distinct paths share the header and container plumbing:
//!
//! - `Lossless` selects modular mode: gradient-predicted integer residuals,
//!   bit-for-bit invertible. The distance parameter has no meaning here.
//! - `Lossy { distance }` selects VarDCT mode: XYB decorrelation, per-block
//!   8x8 DCT, distance-driven quantization, differential-DC / sparse-AC
//!   value coding. Distance 0.0 uses unit quantization steps and is
//!   mathematically lossless adjacent, but setting distance to 0 alone is
//!   not sufficient for guaranteed lossless output; callers wanting that
//!   must use the explicit `Lossless` mode.
//!
//! Alpha is always coded losslessly, in both modes.

use jxlcoder_bitstream::{write_signed, BitWriter, BitstreamError};
use jxlcoder_color::{eotf, gray_to_coded, rgb_to_xyb, ConversionPlan};
use jxlcoder_core::consts::{
    BLOCK_SIZE, DEFAULT_DISTANCE, DEFAULT_EFFORT, MAX_DISTANCE, MAX_EFFORT, MIN_DISTANCE,
    MIN_EFFORT,
};
use jxlcoder_core::{
    CodecError, CodecResult, CodingMode, ColorEncoding, ImageView, Primaries, SampleSlice,
};
use jxlcoder_headers::{CodestreamHeader, Container};
use jxlcoder_transform::{
    forward_block, predict, quantize_block, scan_block, ChannelQuantTables, CODING_SCALE,
};
use rayon::prelude::*;

/// Compression mode for one encode call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompressionMode {
    /// Bit-exact modular coding; distance is not meaningful
    Lossless,
    /// Block-transform coding with a butteraugli-style target distance in
    /// [0, 15]; lower is higher fidelity, 1.0 is visually lossless
    Lossy { distance: f32 },
}

/// Target color space of the coded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeColorSpace {
    Srgb,
    DisplayP3,
    Bt2020,
}

impl EncodeColorSpace {
    fn primaries(&self) -> Primaries {
        match self {
            EncodeColorSpace::Srgb => Primaries::Srgb,
            EncodeColorSpace::DisplayP3 => Primaries::DisplayP3,
            EncodeColorSpace::Bt2020 => Primaries::Bt2020,
        }
    }
}

/// Parameters for one encode call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeRequest {
    pub color_space: EncodeColorSpace,
    pub mode: CompressionMode,
    /// Effort in [1, 9]; higher retains more high-frequency detail
    pub effort: u8,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self {
            color_space: EncodeColorSpace::Srgb,
            mode: CompressionMode::Lossy {
                distance: DEFAULT_DISTANCE,
            },
            effort: DEFAULT_EFFORT,
        }
    }
}

fn internal_err(err: BitstreamError) -> CodecError {
    CodecError::EncodeFailure(format!("bitstream assembly: {err}"))
}

/// Encode an image into a self-contained boxed container.
///
/// All-or-nothing: validation and encoding errors return before any bytes
/// are produced, and the input buffer is never mutated.
pub fn encode(image: &ImageView, request: &EncodeRequest) -> CodecResult<Vec<u8>> {
    if !(MIN_EFFORT..=MAX_EFFORT).contains(&request.effort) {
        return Err(CodecError::InvalidInput(format!(
            "effort {} outside supported range {}-{}",
            request.effort, MIN_EFFORT, MAX_EFFORT
        )));
    }
    let (mode, distance) = match request.mode {
        CompressionMode::Lossless => (CodingMode::Modular, 0.0),
        CompressionMode::Lossy { distance } => {
            if !(MIN_DISTANCE..=MAX_DISTANCE).contains(&distance) || distance.is_nan() {
                return Err(CodecError::InvalidInput(format!(
                    "distance {distance} outside supported range {MIN_DISTANCE}-{MAX_DISTANCE}"
                )));
            }
            (CodingMode::VarDct, distance)
        }
    };

    let channels = image.channels();
    let stride = channels.count();
    let mut samples = normalize_samples(image);

    // Reverse color resolution: convert to the requested target primaries
    // before entropy coding. Gray content has no primaries to remap.
    let target_primaries = request.color_space.primaries();
    let source = image.color();
    let coded_color = if channels.is_gray() {
        source.clone()
    } else {
        let plan =
            ConversionPlan::resolve(source, target_primaries, source.transfer, false);
        if plan.is_identity() {
            source.clone()
        } else {
            plan.apply(&mut samples, stride);
            ColorEncoding::new(target_primaries, source.transfer, source.white_point)
        }
    };

    let header = CodestreamHeader {
        dimensions: image.dimensions(),
        bit_depth: image.bit_depth(),
        channels,
        color: coded_color,
        mode,
        quantizer: (distance * 16.0).round().clamp(0.0, 255.0) as u8,
    };

    let mut writer = BitWriter::new();
    header.write(&mut writer).map_err(internal_err)?;

    match mode {
        CodingMode::VarDct => {
            encode_vardct(&header, &samples, stride, request.effort, &mut writer)?;
        }
        CodingMode::Modular => {
            for c in 0..channels.color_count() {
                let plane = integer_plane(&samples, stride, c, image.bit_depth());
                encode_plane_rows(&plane, image.width() as usize, &mut writer)?;
            }
        }
    }

    if channels.has_alpha() {
        let plane = integer_plane(&samples, stride, stride - 1, image.bit_depth());
        encode_plane_rows(&plane, image.width() as usize, &mut writer)?;
    }

    let mut out = Vec::new();
    Container::with_codestream(writer.finish()).write(&mut out);
    Ok(out)
}

/// Normalize the borrowed samples to [0, 1] floats at the declared depth
fn normalize_samples(image: &ImageView) -> Vec<f32> {
    let max_value = ((1u32 << image.bit_depth()) - 1) as f32;
    match image.samples() {
        SampleSlice::U8(s) => s.iter().map(|&v| v as f32 / max_value).collect(),
        SampleSlice::U16(s) => s.iter().map(|&v| v as f32 / max_value).collect(),
        SampleSlice::F32(s) => s.to_vec(),
    }
}

/// Quantize one normalized channel back to integers at the coded depth
fn integer_plane(samples: &[f32], stride: usize, channel: usize, bit_depth: u8) -> Vec<i32> {
    let max_value = ((1u32 << bit_depth) - 1) as f32;
    samples
        .chunks_exact(stride)
        .map(|pixel| (pixel[channel] * max_value).round().clamp(0.0, max_value) as i32)
        .collect()
}

/// Code one integer plane as gradient-predicted residual rows
fn encode_plane_rows(plane: &[i32], width: usize, writer: &mut BitWriter) -> CodecResult<()> {
    let mut prev: Option<&[i32]> = None;
    for row in plane.chunks(width) {
        for x in 0..width {
            let predicted = predict(prev, &row[..x], x);
            write_signed(writer, row[x] - predicted).map_err(internal_err)?;
        }
        prev = Some(row);
    }
    Ok(())
}

/// Code the color channels in VarDCT mode: decorrelate, transform and
/// quantize each channel in parallel, then emit the coefficient stream
/// interleaved per block so the decoder can reconstruct block by block.
fn encode_vardct(
    header: &CodestreamHeader,
    samples: &[f32],
    stride: usize,
    effort: u8,
    writer: &mut BitWriter,
) -> CodecResult<()> {
    let width = header.dimensions.width as usize;
    let height = header.dimensions.height as usize;
    let color_count = header.channels.color_count();
    let transfer = header.color.transfer;

    // Decorrelated coded-domain planes, scaled for the quantization tables
    let mut planes = vec![vec![0.0f32; width * height]; color_count];
    if color_count == 1 {
        for (i, pixel) in samples.chunks_exact(stride).enumerate() {
            planes[0][i] = gray_to_coded(eotf(transfer, pixel[0])) * CODING_SCALE;
        }
    } else {
        for (i, pixel) in samples.chunks_exact(stride).enumerate() {
            let (x, y, b) = rgb_to_xyb(
                eotf(transfer, pixel[0]),
                eotf(transfer, pixel[1]),
                eotf(transfer, pixel[2]),
            );
            planes[0][i] = x * CODING_SCALE;
            planes[1][i] = y * CODING_SCALE;
            planes[2][i] = b * CODING_SCALE;
        }
    }

    let tables = ChannelQuantTables::for_distance(header.distance());
    // Low effort drops the tail of the zigzag scan; DC is always retained.
    let keep = (effort as usize * BLOCK_SIZE).min(64);

    let block_streams: Vec<Vec<[i16; 64]>> = planes
        .par_iter()
        .enumerate()
        .map(|(c, plane)| {
            let table = if color_count == 1 {
                tables.for_channel(1)
            } else {
                tables.for_channel(c)
            };
            channel_blocks(plane, width, height, table, keep)
        })
        .collect();

    let blocks_x = width.div_ceil(BLOCK_SIZE);
    let blocks_y = height.div_ceil(BLOCK_SIZE);
    let mut prev_dc = [0i32; 3];

    for block in 0..blocks_x * blocks_y {
        for (c, stream) in block_streams.iter().enumerate() {
            let zigzag = &stream[block];

            let dc = zigzag[0] as i32;
            write_signed(writer, dc - prev_dc[c]).map_err(internal_err)?;
            prev_dc[c] = dc;

            let nonzero = zigzag[1..].iter().filter(|&&v| v != 0).count();
            writer.write_bits(nonzero as u64, 6).map_err(internal_err)?;
            for (i, &value) in zigzag.iter().enumerate().skip(1) {
                if value != 0 {
                    writer
                        .write_bits((i - 1) as u64, 6)
                        .map_err(internal_err)?;
                    write_signed(writer, value as i32).map_err(internal_err)?;
                }
            }
        }
    }

    Ok(())
}

/// Transform and quantize one coded-domain plane into zigzag block streams.
/// Edge blocks replicate the border sample so partial blocks transform
/// cleanly.
fn channel_blocks(
    plane: &[f32],
    width: usize,
    height: usize,
    table: &jxlcoder_transform::QuantTable,
    keep: usize,
) -> Vec<[i16; 64]> {
    let blocks_x = width.div_ceil(BLOCK_SIZE);
    let blocks_y = height.div_ceil(BLOCK_SIZE);
    let mut blocks = Vec::with_capacity(blocks_x * blocks_y);

    let mut block = [0.0f32; 64];
    let mut coeffs = [0.0f32; 64];
    let mut quantized = [0i16; 64];
    let mut zigzag = [0i16; 64];

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            for dy in 0..BLOCK_SIZE {
                let y = (by * BLOCK_SIZE + dy).min(height - 1);
                for dx in 0..BLOCK_SIZE {
                    let x = (bx * BLOCK_SIZE + dx).min(width - 1);
                    block[dy * BLOCK_SIZE + dx] = plane[y * width + x];
                }
            }
            forward_block(&block, &mut coeffs);
            quantize_block(&coeffs, table, &mut quantized);
            scan_block(&quantized, &mut zigzag);
            for slot in zigzag[keep..].iter_mut() {
                *slot = 0;
            }
            blocks.push(zigzag);
        }
    }

    blocks
}
