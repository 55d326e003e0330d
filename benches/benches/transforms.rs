//! Benchmarks for the transform kernels
//!
//! Run with: cargo bench --bench transforms

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jxlcoder_color::{rgb_to_xyb, srgb_to_linear, xyb_to_rgb};
use jxlcoder_transform::{
    forward_block, inverse_block, quantize_block, ChannelQuantTables,
};

fn bench_dct_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("DCT 8x8");
    let input: [f32; 64] = core::array::from_fn(|i| (i as f32) * 1.7 - 50.0);

    group.bench_function("forward", |b| {
        let mut output = [0.0f32; 64];
        b.iter(|| forward_block(black_box(&input), black_box(&mut output)));
    });

    group.bench_function("inverse", |b| {
        let mut output = [0.0f32; 64];
        b.iter(|| inverse_block(black_box(&input), black_box(&mut output)));
    });

    group.finish();
}

fn bench_quantization(c: &mut Criterion) {
    let tables = ChannelQuantTables::for_distance(1.0);
    let coeffs: [f32; 64] = core::array::from_fn(|i| (i as f32) * 13.3 - 400.0);

    c.bench_function("quantize_block", |b| {
        let mut output = [0i16; 64];
        b.iter(|| quantize_block(black_box(&coeffs), black_box(&tables.y), &mut output));
    });
}

fn bench_color_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Color");

    group.bench_function("srgb_to_linear", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..256 {
                acc += srgb_to_linear(black_box(i as f32 / 255.0));
            }
            acc
        });
    });

    group.bench_function("xyb_roundtrip", |b| {
        b.iter(|| {
            let (x, y, bm) = rgb_to_xyb(black_box(0.5), black_box(0.3), black_box(0.8));
            xyb_to_rgb(x, y, bm)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dct_block,
    bench_quantization,
    bench_color_transforms
);
criterion_main!(benches);
