//! Pixel-format negotiation and packing tests

use half::f16;
use jxlcoder::{
    decode, encode, CapabilitySet, ChannelLayout, ColorEncoding, CompressionMode, DecodeOptions,
    Dimensions, EncodeRequest, ImageView, PixelFormat, SampleSlice, TransferFunction,
};

fn encode_8bit_uniform(rgb: [u8; 3]) -> Vec<u8> {
    let mut pixels = vec![0u8; 16 * 16 * 3];
    for p in pixels.chunks_exact_mut(3) {
        p.copy_from_slice(&rgb);
    }
    let color = ColorEncoding::srgb();
    let image = ImageView::new(
        Dimensions::new(16, 16),
        ChannelLayout::Rgb,
        8,
        &color,
        SampleSlice::U8(&pixels),
    )
    .unwrap();
    let request = EncodeRequest {
        mode: CompressionMode::Lossless,
        ..EncodeRequest::default()
    };
    encode(&image, &request).unwrap()
}

fn encode_16bit_uniform(value: u16) -> Vec<u8> {
    let pixels = vec![value; 16 * 16 * 3];
    let color = ColorEncoding::srgb();
    let image = ImageView::new(
        Dimensions::new(16, 16),
        ChannelLayout::Rgb,
        16,
        &color,
        SampleSlice::U16(&pixels),
    )
    .unwrap();
    let request = EncodeRequest {
        mode: CompressionMode::Lossless,
        ..EncodeRequest::default()
    };
    encode(&image, &request).unwrap()
}

fn decode_as(encoded: &[u8], format: PixelFormat, caps: CapabilitySet) -> jxlcoder::DecodedImage {
    decode(
        encoded,
        &DecodeOptions {
            format,
            capabilities: caps,
            ..DecodeOptions::default()
        },
    )
    .expect("decode failed")
}

#[test]
fn test_f16_without_capability_falls_back() {
    let encoded = encode_16bit_uniform(30000);
    let decoded = decode_as(&encoded, PixelFormat::RgbaF16, CapabilitySet::baseline());
    // the fallback is surfaced, not silently substituted
    assert_eq!(decoded.format, PixelFormat::Rgba8888);
    assert_eq!(decoded.data.len(), 16 * 16 * 4);
}

#[test]
fn test_f16_never_synthesized_from_8bit_source() {
    let encoded = encode_8bit_uniform([50, 100, 150]);
    let decoded = decode_as(&encoded, PixelFormat::RgbaF16, CapabilitySet::everything());
    assert_eq!(decoded.format, PixelFormat::Rgba8888);
}

#[test]
fn test_f16_output_is_linear() {
    let encoded = encode_16bit_uniform(30000);
    let decoded = decode_as(&encoded, PixelFormat::RgbaF16, CapabilitySet::everything());
    assert_eq!(decoded.format, PixelFormat::RgbaF16);
    assert_eq!(decoded.color.transfer, TransferFunction::Linear);
    assert_eq!(decoded.data.len(), 16 * 16 * 8);

    // 30000/65535 in sRGB linearizes to about 0.177
    let r = f16::from_le_bytes([decoded.data[0], decoded.data[1]]).to_f32();
    assert!((r - 0.177).abs() < 0.01, "linear value {r}");
    let a = f16::from_le_bytes([decoded.data[6], decoded.data[7]]).to_f32();
    assert!((a - 1.0).abs() < 1e-3);
}

#[test]
fn test_rgb565_packs_and_drops_alpha() {
    let encoded = encode_8bit_uniform([255, 0, 0]);
    let decoded = decode_as(&encoded, PixelFormat::Rgb565, CapabilitySet::baseline());
    assert_eq!(decoded.format, PixelFormat::Rgb565);
    assert_eq!(decoded.data.len(), 16 * 16 * 2);

    let word = u16::from_le_bytes([decoded.data[0], decoded.data[1]]);
    assert_eq!(word >> 11, 31, "red channel");
    assert_eq!((word >> 5) & 0x3F, 0, "green channel");
    assert_eq!(word & 0x1F, 0, "blue channel");
}

#[test]
fn test_rgba1010102_gated_by_source_depth() {
    let caps = CapabilitySet::everything();

    let eight_bit = encode_8bit_uniform([10, 10, 10]);
    let decoded = decode_as(&eight_bit, PixelFormat::Rgba1010102, caps);
    assert_eq!(decoded.format, PixelFormat::Rgba8888);

    let sixteen_bit = encode_16bit_uniform(65535);
    let decoded = decode_as(&sixteen_bit, PixelFormat::Rgba1010102, caps);
    assert_eq!(decoded.format, PixelFormat::Rgba1010102);
    assert_eq!(decoded.data.len(), 16 * 16 * 4);

    let word = u32::from_le_bytes([
        decoded.data[0],
        decoded.data[1],
        decoded.data[2],
        decoded.data[3],
    ]);
    assert_eq!(word & 0x3FF, 1023, "white red channel");
    assert_eq!(word >> 30, 3, "opaque alpha");
}

#[test]
fn test_hardware_payload_is_rgba8888_layout() {
    let encoded = encode_8bit_uniform([1, 2, 3]);

    let without = decode_as(&encoded, PixelFormat::HardwareOpaque, CapabilitySet::baseline());
    assert_eq!(without.format, PixelFormat::Rgba8888);

    let with = decode_as(&encoded, PixelFormat::HardwareOpaque, CapabilitySet::everything());
    assert_eq!(with.format, PixelFormat::HardwareOpaque);
    // identical payload, different wrapper contract
    assert_eq!(with.data, without.data);
}

#[test]
fn test_hdr_tone_mapped_on_sdr_output() {
    // PQ-coded HDR content directed at an 8-bit output must come back in
    // range, tone mapped rather than uniformly clipped
    let pixels: Vec<u16> = (0..16 * 16)
        .flat_map(|i| {
            let v = 20000 + (i % 16) * 2500;
            [v as u16, v as u16, v as u16]
        })
        .collect();
    let color = ColorEncoding::bt2020_pq();
    let image = ImageView::new(
        Dimensions::new(16, 16),
        ChannelLayout::Rgb,
        16,
        &color,
        SampleSlice::U16(&pixels),
    )
    .unwrap();
    let request = EncodeRequest {
        mode: CompressionMode::Lossless,
        color_space: jxlcoder::EncodeColorSpace::Bt2020,
        ..EncodeRequest::default()
    };
    let encoded = encode(&image, &request).unwrap();

    let decoded = decode_as(&encoded, PixelFormat::Rgba8888, CapabilitySet::baseline());
    assert_eq!(decoded.format, PixelFormat::Rgba8888);
    assert_eq!(decoded.color.transfer, TransferFunction::Srgb);

    // the first row spans a wide luminance range; tone mapping must keep
    // the ordering without collapsing everything to white
    let row: Vec<u8> = decoded.data[..16 * 4].chunks_exact(4).map(|p| p[0]).collect();
    for pair in row.windows(2) {
        assert!(pair[1] >= pair[0], "ordering broken: {row:?}");
    }
    assert!(row[0] < row[15], "range collapsed: {row:?}");
}
