//! 8x8 block transform over a precomputed orthonormal cosine basis
//!
//! The 2D transform is separable: rows through the basis, then columns.
//! With the orthonormal scaling, `inverse_block(forward_block(x)) == x` up
//! to float rounding and coefficient magnitudes stay within 8x the sample
//! range.

use jxlcoder_core::consts::BLOCK_SIZE;
use std::f32::consts::PI;

lazy_static::lazy_static! {
    /// Orthonormal DCT-II basis: BASIS[u][x] = a(u) cos((2x+1)u pi / 16)
    static ref BASIS: [[f32; BLOCK_SIZE]; BLOCK_SIZE] = {
        let mut basis = [[0.0f32; BLOCK_SIZE]; BLOCK_SIZE];
        let n = BLOCK_SIZE as f32;
        for (u, row) in basis.iter_mut().enumerate() {
            let a = if u == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = a * (((2 * x + 1) as f32 * u as f32 * PI) / (2.0 * n)).cos();
            }
        }
        basis
    };
}

/// Force the basis into existence
pub fn ensure_tables() {
    lazy_static::initialize(&BASIS);
}

/// Forward 2D DCT of one 8x8 block (row-major samples to coefficients)
pub fn forward_block(input: &[f32; 64], output: &mut [f32; 64]) {
    let basis = &*BASIS;
    let mut rows = [0.0f32; 64];

    // transform rows
    for y in 0..BLOCK_SIZE {
        for u in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for x in 0..BLOCK_SIZE {
                sum += basis[u][x] * input[y * BLOCK_SIZE + x];
            }
            rows[y * BLOCK_SIZE + u] = sum;
        }
    }

    // transform columns
    for u in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for y in 0..BLOCK_SIZE {
                sum += basis[v][y] * rows[y * BLOCK_SIZE + u];
            }
            output[v * BLOCK_SIZE + u] = sum;
        }
    }
}

/// Inverse 2D DCT of one 8x8 block (coefficients to row-major samples)
pub fn inverse_block(input: &[f32; 64], output: &mut [f32; 64]) {
    let basis = &*BASIS;
    let mut cols = [0.0f32; 64];

    // inverse columns
    for u in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for v in 0..BLOCK_SIZE {
                sum += basis[v][y] * input[v * BLOCK_SIZE + u];
            }
            cols[y * BLOCK_SIZE + u] = sum;
        }
    }

    // inverse rows
    for y in 0..BLOCK_SIZE {
        for x in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for u in 0..BLOCK_SIZE {
                sum += basis[u][x] * cols[y * BLOCK_SIZE + u];
            }
            output[y * BLOCK_SIZE + x] = sum;
        }
    }
}
