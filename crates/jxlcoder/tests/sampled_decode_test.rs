//! Sampled decode policy tests

use jxlcoder::{
    decode, encode, ChannelLayout, ColorEncoding, CompressionMode, DecodeOptions, Dimensions,
    EncodeRequest, ImageView, SampleSlice,
};

fn encode_uniform(width: u32, height: u32, rgb: [u8; 3], lossless: bool) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height) as usize * 3];
    for p in pixels.chunks_exact_mut(3) {
        p.copy_from_slice(&rgb);
    }
    let color = ColorEncoding::srgb();
    let image = ImageView::new(
        Dimensions::new(width, height),
        ChannelLayout::Rgb,
        8,
        &color,
        SampleSlice::U8(&pixels),
    )
    .unwrap();
    let request = EncodeRequest {
        mode: if lossless {
            CompressionMode::Lossless
        } else {
            CompressionMode::Lossy { distance: 1.0 }
        },
        ..EncodeRequest::default()
    };
    encode(&image, &request).unwrap()
}

fn sampled(encoded: &[u8], tw: u32, th: u32) -> jxlcoder::DecodedImage {
    decode(
        encoded,
        &DecodeOptions {
            target_width: Some(tw),
            target_height: Some(th),
            ..DecodeOptions::default()
        },
    )
    .expect("sampled decode failed")
}

#[test]
fn test_aspect_fit_dimensions() {
    let encoded = encode_uniform(64, 32, [10, 20, 30], true);
    let decoded = sampled(&encoded, 32, 32);
    assert_eq!((decoded.width, decoded.height), (32, 16));
}

#[test]
fn test_never_upscales() {
    let encoded = encode_uniform(16, 16, [10, 20, 30], true);
    let decoded = sampled(&encoded, 512, 512);
    assert_eq!((decoded.width, decoded.height), (16, 16));
}

#[test]
fn test_output_never_exceeds_native() {
    let encoded = encode_uniform(48, 24, [1, 2, 3], true);
    for (tw, th) in [(10, 10), (48, 24), (100, 5), (1, 1)] {
        let decoded = sampled(&encoded, tw, th);
        assert!(decoded.width <= 48 && decoded.height <= 24);
        assert!(decoded.width >= 1 && decoded.height >= 1);
        // aspect preserved within one pixel of rounding
        let expected_ratio = 2.0;
        let ratio = decoded.width as f64 / decoded.height as f64;
        assert!(
            (ratio - expected_ratio).abs() <= 1.0,
            "aspect drifted to {ratio}"
        );
    }
}

#[test]
fn test_uniform_color_survives_box_sampling_exactly() {
    // lossless uniform content averages to exactly itself in every cell
    let encoded = encode_uniform(40, 40, [77, 140, 201], true);
    let decoded = sampled(&encoded, 13, 13);
    assert_eq!((decoded.width, decoded.height), (13, 13));
    for p in decoded.data.chunks_exact(4) {
        assert_eq!(&p[..3], &[77, 140, 201]);
        assert_eq!(p[3], 255);
    }
}

#[test]
fn test_sampled_lossy_stays_close() {
    let encoded = encode_uniform(64, 64, [200, 50, 120], false);
    let decoded = sampled(&encoded, 16, 16);
    assert_eq!((decoded.width, decoded.height), (16, 16));
    for p in decoded.data.chunks_exact(4) {
        assert!((p[0] as i32 - 200).abs() <= 4);
        assert!((p[1] as i32 - 50).abs() <= 4);
        assert!((p[2] as i32 - 120).abs() <= 4);
    }
}

#[test]
fn test_single_axis_bound() {
    let encoded = encode_uniform(100, 50, [9, 9, 9], true);
    let decoded = decode(
        &encoded,
        &DecodeOptions {
            target_width: Some(50),
            target_height: None,
            ..DecodeOptions::default()
        },
    )
    .unwrap();
    assert_eq!((decoded.width, decoded.height), (50, 25));
}

#[test]
fn test_gradient_sampled_decode_averages_locally() {
    // a horizontal ramp must stay monotonically non-decreasing after
    // box sampling
    let width = 64u32;
    let mut pixels = vec![0u8; (width * width) as usize * 3];
    for y in 0..width {
        for x in 0..width {
            let idx = ((y * width + x) * 3) as usize;
            let v = (x * 4) as u8;
            pixels[idx] = v;
            pixels[idx + 1] = v;
            pixels[idx + 2] = v;
        }
    }
    let color = ColorEncoding::srgb();
    let image = ImageView::new(
        Dimensions::new(width, width),
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
    let encoded = encode(&image, &request).unwrap();

    let decoded = sampled(&encoded, 16, 16);
    let row: Vec<u8> = decoded.data[..16 * 4]
        .chunks_exact(4)
        .map(|p| p[0])
        .collect();
    for pair in row.windows(2) {
        assert!(pair[1] >= pair[0], "ramp broken: {row:?}");
    }
}
