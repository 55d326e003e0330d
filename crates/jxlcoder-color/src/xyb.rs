//! XYB-style decorrelation for the lossy path
//!
//! A perceptually motivated opponent transform: channels are cube-root
//! compressed, then split into an opponent pair (X, Y) and a blue-minus-luma
//! residual. Exactly invertible up to float rounding.

/// Linear RGB to decorrelated XYB
#[inline]
pub fn rgb_to_xyb(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = r.cbrt();
    let m = g.cbrt();
    let s = b.cbrt();

    let x = (l - m) * 0.5;
    let y = (l + m) * 0.5;
    let b_minus_y = s - y;

    (x, y, b_minus_y)
}

/// Decorrelated XYB back to linear RGB
#[inline]
pub fn xyb_to_rgb(x: f32, y: f32, b_minus_y: f32) -> (f32, f32, f32) {
    let l = y + x;
    let m = y - x;
    let s = b_minus_y + y;

    (l * l * l, m * m * m, s * s * s)
}

/// Cube-root compression for single-channel (gray) content, shared with the
/// color path so gray images quantize on the same perceptual scale.
#[inline]
pub fn gray_to_coded(g: f32) -> f32 {
    g.cbrt()
}

#[inline]
pub fn coded_to_gray(v: f32) -> f32 {
    v * v * v
}
