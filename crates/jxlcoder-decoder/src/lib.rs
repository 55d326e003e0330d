//! Streaming pixel decoder
//!
//! The payload is organized so reconstruction never materializes a
//! full-resolution buffer: VarDCT data is interleaved per 8x8 block and each
//! reconstructed block is splatted straight into the target-resolution
//! sampling grid; modular data streams row by row through a two-row
//! prediction window. Decoding holds no cross-call state and is safe to run
//! concurrently on independent inputs.

mod packing;

use jxlcoder_bitstream::{read_signed, BitReader, BitstreamError};
use jxlcoder_color::{coded_to_gray, oetf, xyb_to_rgb, ConversionPlan};
use jxlcoder_core::consts::BLOCK_SIZE;
use jxlcoder_core::{
    negotiate, CapabilitySet, CodecError, CodecResult, CodingMode, ColorEncoding, DecodedImage,
    Dimensions, PixelFormat, Primaries, TransferFunction,
};
use jxlcoder_headers::{resolve_codestream, CodestreamHeader};
use jxlcoder_transform::{
    dequantize_block, inverse_block, sampled_dimensions, unscan_block, ChannelQuantTables,
    SampleAccumulator, CODING_SCALE,
};

pub use jxlcoder_headers::probe;

/// Options for one decode call
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Bounding box for sampled decode; aspect-fit, never upscaled
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    /// Requested output format, subject to negotiation
    pub format: PixelFormat,
    /// Platform capabilities; the core never queries the platform itself
    pub capabilities: CapabilitySet,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            target_width: None,
            target_height: None,
            format: PixelFormat::Rgba8888,
            capabilities: CapabilitySet::everything(),
        }
    }
}

fn payload_err(err: BitstreamError) -> CodecError {
    CodecError::DecodeFailure(format!("entropy payload: {err}"))
}

/// Decode a codestream or boxed container into a packed pixel buffer.
///
/// The format actually produced after capability negotiation is surfaced in
/// `DecodedImage::format`; partial output is never returned.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> CodecResult<DecodedImage> {
    let codestream = resolve_codestream(bytes)?;
    let mut reader = BitReader::new(&codestream);
    let header = CodestreamHeader::parse(&mut reader)?;

    let native = header.dimensions;
    let output = sampled_dimensions(native, options.target_width, options.target_height);
    let format = negotiate(options.format, &options.capabilities, header.bit_depth);

    let color_count = header.channels.color_count();
    let mut color_planes: Vec<SampleAccumulator> = (0..color_count)
        .map(|_| SampleAccumulator::new(native, output, 1))
        .collect();

    match header.mode {
        CodingMode::VarDct => decode_vardct(&mut reader, &header, &mut color_planes)?,
        CodingMode::Modular => {
            for plane in color_planes.iter_mut() {
                decode_plane_rows(&mut reader, native, header.bit_depth, plane)?;
            }
        }
    }

    let alpha_plane = if header.channels.has_alpha() {
        let mut plane = SampleAccumulator::new(native, output, 1);
        decode_plane_rows(&mut reader, native, header.bit_depth, &mut plane)?;
        Some(plane.finish())
    } else {
        None
    };

    let planes: Vec<Vec<f32>> = color_planes.into_iter().map(|p| p.finish()).collect();
    let mut rgba = interleave_rgba(&planes, alpha_plane.as_deref(), output);

    // Resolve the output color space from the negotiated format: the float
    // format keeps linear extended range in the source gamut, integer
    // formats are display-referred sRGB with HDR tone-mapped down.
    let (target_primaries, target_transfer, tone_map) = match format {
        PixelFormat::RgbaF16 => (header.color.primaries, TransferFunction::Linear, false),
        _ => (Primaries::Srgb, TransferFunction::Srgb, header.color.is_hdr()),
    };
    let plan = ConversionPlan::resolve(&header.color, target_primaries, target_transfer, tone_map);
    plan.apply(&mut rgba, 4);
    let color = if plan.is_identity() {
        header.color.clone()
    } else {
        ColorEncoding::new(target_primaries, target_transfer, header.color.white_point)
    };

    Ok(DecodedImage {
        width: output.width,
        height: output.height,
        format,
        color,
        data: packing::pack(&rgba, output, format),
    })
}

/// Reconstruct the VarDCT payload block by block
fn decode_vardct(
    reader: &mut BitReader,
    header: &CodestreamHeader,
    planes: &mut [SampleAccumulator],
) -> CodecResult<()> {
    let native = header.dimensions;
    let color_count = planes.len();
    let tables = ChannelQuantTables::for_distance(header.distance());
    let blocks_x = (native.width as usize).div_ceil(BLOCK_SIZE);
    let blocks_y = (native.height as usize).div_ceil(BLOCK_SIZE);

    let mut prev_dc = [0i32; 3];
    let mut reconstructed = vec![[0.0f32; 64]; color_count];

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            for (c, block_out) in reconstructed.iter_mut().enumerate() {
                let mut zigzag = [0i16; 64];

                let diff = read_signed(reader).map_err(payload_err)?;
                prev_dc[c] = prev_dc[c].checked_add(diff).ok_or_else(|| {
                    CodecError::DecodeFailure("DC accumulator overflow".to_string())
                })?;
                if prev_dc[c].unsigned_abs() > i16::MAX as u32 {
                    return Err(CodecError::DecodeFailure(
                        "DC coefficient out of range".to_string(),
                    ));
                }
                zigzag[0] = prev_dc[c] as i16;

                let count = reader.read_bits(6).map_err(payload_err)? as usize;
                for _ in 0..count {
                    let pos = reader.read_bits(6).map_err(payload_err)? as usize + 1;
                    if pos >= 64 {
                        return Err(CodecError::DecodeFailure(
                            "AC coefficient position out of range".to_string(),
                        ));
                    }
                    let value = read_signed(reader).map_err(payload_err)?;
                    if value.unsigned_abs() > i16::MAX as u32 {
                        return Err(CodecError::DecodeFailure(
                            "AC coefficient out of range".to_string(),
                        ));
                    }
                    zigzag[pos] = value as i16;
                }

                // luma table for gray content, per-channel tables for color
                let table = if color_count == 1 {
                    tables.for_channel(1)
                } else {
                    tables.for_channel(c)
                };
                let mut quantized = [0i16; 64];
                let mut coeffs = [0.0f32; 64];
                unscan_block(&zigzag, &mut quantized);
                dequantize_block(&quantized, table, &mut coeffs);
                inverse_block(&coeffs, block_out);
            }

            splat_block(header, planes, &reconstructed, bx, by);
        }
    }

    Ok(())
}

/// Convert one reconstructed block out of the coded domain and accumulate
/// the in-bounds samples.
fn splat_block(
    header: &CodestreamHeader,
    planes: &mut [SampleAccumulator],
    reconstructed: &[[f32; 64]],
    bx: usize,
    by: usize,
) {
    let native = header.dimensions;
    let transfer = header.color.transfer;
    let color_count = planes.len();

    for dy in 0..BLOCK_SIZE {
        let y = (by * BLOCK_SIZE + dy) as u32;
        if y >= native.height {
            break;
        }
        for dx in 0..BLOCK_SIZE {
            let x = (bx * BLOCK_SIZE + dx) as u32;
            if x >= native.width {
                break;
            }
            let idx = dy * BLOCK_SIZE + dx;
            if color_count == 1 {
                let linear = coded_to_gray(reconstructed[0][idx] / CODING_SCALE).max(0.0);
                planes[0].splat(x, y, &[oetf(transfer, linear)]);
            } else {
                let (r, g, b) = xyb_to_rgb(
                    reconstructed[0][idx] / CODING_SCALE,
                    reconstructed[1][idx] / CODING_SCALE,
                    reconstructed[2][idx] / CODING_SCALE,
                );
                planes[0].splat(x, y, &[oetf(transfer, r.max(0.0))]);
                planes[1].splat(x, y, &[oetf(transfer, g.max(0.0))]);
                planes[2].splat(x, y, &[oetf(transfer, b.max(0.0))]);
            }
        }
    }
}

/// Reconstruct one gradient-predicted integer plane, streaming rows into the
/// sampling grid. Used for every modular channel and for alpha in both modes.
fn decode_plane_rows(
    reader: &mut BitReader,
    native: Dimensions,
    bit_depth: u8,
    plane: &mut SampleAccumulator,
) -> CodecResult<()> {
    let max_value = ((1u32 << bit_depth) - 1) as i32;
    let width = native.width as usize;
    let mut prev: Option<Vec<i32>> = None;

    for y in 0..native.height {
        let mut cur = Vec::with_capacity(width);
        for x in 0..width {
            let predicted = jxlcoder_transform::predict(prev.as_deref(), &cur, x);
            let residual = read_signed(reader).map_err(payload_err)?;
            let value = predicted.checked_add(residual).ok_or_else(|| {
                CodecError::DecodeFailure("sample accumulator overflow".to_string())
            })?;
            if value < 0 || value > max_value {
                return Err(CodecError::DecodeFailure(format!(
                    "sample {value} outside {bit_depth}-bit range"
                )));
            }
            plane.splat(x as u32, y, &[value as f32 / max_value as f32]);
            cur.push(value);
        }
        prev = Some(cur);
    }

    Ok(())
}

/// Interleave the averaged planes into RGBA order, replicating gray and
/// defaulting alpha to opaque.
fn interleave_rgba(planes: &[Vec<f32>], alpha: Option<&[f32]>, output: Dimensions) -> Vec<f32> {
    let pixels = output.pixel_count();
    let mut rgba = vec![0.0f32; pixels * 4];
    for i in 0..pixels {
        let (r, g, b) = if planes.len() == 1 {
            (planes[0][i], planes[0][i], planes[0][i])
        } else {
            (planes[0][i], planes[1][i], planes[2][i])
        };
        rgba[i * 4] = r;
        rgba[i * 4 + 1] = g;
        rgba[i * 4 + 2] = b;
        rgba[i * 4 + 3] = alpha.map_or(1.0, |a| a[i]);
    }
    rgba
}
