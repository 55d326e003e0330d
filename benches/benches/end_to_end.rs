//! End-to-end encode/decode benchmarks
//!
//! Run with: cargo bench --bench end_to_end

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use jxlcoder::{
    decode, encode, ChannelLayout, ColorEncoding, CompressionMode, DecodeOptions, Dimensions,
    EncodeRequest, ImageView, SampleSlice,
};

fn test_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0u8; (width * height) as usize * 3];
    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 3) as usize;
            data[idx] = ((x * 255) / width) as u8;
            data[idx + 1] = ((y * 255) / height) as u8;
            data[idx + 2] = ((x ^ y) % 256) as u8;
        }
    }
    data
}

fn bench_encode(c: &mut Criterion) {
    let width = 128u32;
    let height = 128u32;
    let pixels = test_pixels(width, height);
    let color = ColorEncoding::srgb();
    let image = ImageView::new(
        Dimensions::new(width, height),
        ChannelLayout::Rgb,
        8,
        &color,
        SampleSlice::U8(&pixels),
    )
    .unwrap();

    let mut group = c.benchmark_group("Encode 128x128");
    group.throughput(Throughput::Bytes(pixels.len() as u64));

    group.bench_function("lossy_d1", |b| {
        let request = EncodeRequest::default();
        b.iter(|| encode(black_box(&image), &request).unwrap());
    });

    group.bench_function("lossless", |b| {
        let request = EncodeRequest {
            mode: CompressionMode::Lossless,
            ..EncodeRequest::default()
        };
        b.iter(|| encode(black_box(&image), &request).unwrap());
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let width = 128u32;
    let height = 128u32;
    let pixels = test_pixels(width, height);
    let color = ColorEncoding::srgb();
    let image = ImageView::new(
        Dimensions::new(width, height),
        ChannelLayout::Rgb,
        8,
        &color,
        SampleSlice::U8(&pixels),
    )
    .unwrap();
    let encoded = encode(&image, &EncodeRequest::default()).unwrap();

    let mut group = c.benchmark_group("Decode 128x128");
    group.throughput(Throughput::Bytes(pixels.len() as u64));

    group.bench_function("full", |b| {
        b.iter(|| decode(black_box(&encoded), &DecodeOptions::default()).unwrap());
    });

    group.bench_function("sampled_32x32", |b| {
        let options = DecodeOptions {
            target_width: Some(32),
            target_height: Some(32),
            ..DecodeOptions::default()
        };
        b.iter(|| decode(black_box(&encoded), &options).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
