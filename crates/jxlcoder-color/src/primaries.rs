//! Primaries conversion through XYZ-D65

use jxlcoder_core::Primaries;

/// Row-major 3x3 matrix
pub type Mat3 = [[f32; 3]; 3];

/// sRGB / BT.709 primaries to XYZ-D65
const SRGB_TO_XYZ: Mat3 = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Display P3 (D65) primaries to XYZ-D65
const P3_TO_XYZ: Mat3 = [
    [0.4865709, 0.2656677, 0.1982173],
    [0.2289746, 0.6917385, 0.0792869],
    [0.0000000, 0.0451134, 1.0439444],
];

/// BT.2020 primaries to XYZ-D65
const BT2020_TO_XYZ: Mat3 = [
    [0.6369580, 0.1446169, 0.1688810],
    [0.2627002, 0.6779981, 0.0593017],
    [0.0000000, 0.0280727, 1.0609851],
];

fn to_xyz(primaries: Primaries) -> Mat3 {
    match primaries {
        Primaries::Srgb => SRGB_TO_XYZ,
        Primaries::DisplayP3 => P3_TO_XYZ,
        Primaries::Bt2020 => BT2020_TO_XYZ,
    }
}

/// Matrix product a * b
pub fn multiply(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0f32; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Matrix inverse by adjugate; primaries matrices are well conditioned
pub fn invert(m: &Mat3) -> Mat3 {
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
    let inv_det = 1.0 / det;

    [
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ]
}

/// Linear-light conversion matrix between two primaries sets, or `None`
/// when they already match.
pub fn conversion_matrix(src: Primaries, dst: Primaries) -> Option<Mat3> {
    if src == dst {
        return None;
    }
    Some(multiply(&invert(&to_xyz(dst)), &to_xyz(src)))
}

/// Apply a matrix to one linear RGB triple
#[inline]
pub fn apply(m: &Mat3, rgb: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
        m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
        m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_primaries_need_no_matrix() {
        assert!(conversion_matrix(Primaries::Srgb, Primaries::Srgb).is_none());
    }

    #[test]
    fn test_roundtrip_close_to_identity() {
        let forward = conversion_matrix(Primaries::Srgb, Primaries::Bt2020).unwrap();
        let back = conversion_matrix(Primaries::Bt2020, Primaries::Srgb).unwrap();
        let product = multiply(&back, &forward);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (product[i][j] - expected).abs() < 1e-4,
                    "product[{i}][{j}] = {}",
                    product[i][j]
                );
            }
        }
    }

    #[test]
    fn test_white_is_preserved() {
        // D65 white maps to D65 white across all supported primaries
        for (src, dst) in [
            (Primaries::Srgb, Primaries::DisplayP3),
            (Primaries::Srgb, Primaries::Bt2020),
            (Primaries::DisplayP3, Primaries::Bt2020),
        ] {
            let m = conversion_matrix(src, dst).unwrap();
            let white = apply(&m, [1.0, 1.0, 1.0]);
            for c in white {
                assert!((c - 1.0).abs() < 2e-3, "white channel {c}");
            }
        }
    }
}
