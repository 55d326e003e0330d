//! Transfer functions
//!
//! All EOTFs produce linear light normalized so 1.0 is the 203 nit SDR
//! reference white; PQ and HLG therefore yield values above 1.0 for
//! highlights, which downstream tone mapping compresses for SDR outputs.

use jxlcoder_core::TransferFunction;

/// SDR reference white in nits, shared by the PQ and HLG normalizations
const SDR_REFERENCE_NITS: f32 = 203.0;

/// PQ peak luminance in nits
const PQ_PEAK_NITS: f32 = 10_000.0;

/// Nominal HLG peak in nits
const HLG_PEAK_NITS: f32 = 1_000.0;

// ST.2084 constants
const PQ_M1: f32 = 2610.0 / 16384.0;
const PQ_M2: f32 = 2523.0 / 4096.0 * 128.0;
const PQ_C1: f32 = 3424.0 / 4096.0;
const PQ_C2: f32 = 2413.0 / 4096.0 * 32.0;
const PQ_C3: f32 = 2392.0 / 4096.0 * 32.0;

// HLG constants
const HLG_A: f32 = 0.17883277;
const HLG_B: f32 = 0.28466892;
const HLG_C: f32 = 0.55991073;

lazy_static::lazy_static! {
    /// 8-bit sRGB to linear, built once per process
    static ref SRGB_U8_TABLE: [f32; 256] = {
        let mut table = [0.0f32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = srgb_to_linear(i as f32 / 255.0);
        }
        table
    };
}

/// Force the lazily-built tables into existence
pub fn ensure_tables() {
    lazy_static::initialize(&SRGB_U8_TABLE);
}

/// Convert sRGB to linear (gamma expansion)
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert linear to sRGB (gamma compression)
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Table-driven 8-bit sRGB linearization
pub fn srgb_u8_to_linear(srgb: u8) -> f32 {
    SRGB_U8_TABLE[srgb as usize]
}

/// ST.2084 PQ to linear, 1.0 = SDR reference white
fn pq_to_linear(pq: f32) -> f32 {
    let pq = pq.max(0.0);
    let p = pq.powf(1.0 / PQ_M2);
    let num = (p - PQ_C1).max(0.0);
    let den = PQ_C2 - PQ_C3 * p;
    let display = (num / den).powf(1.0 / PQ_M1);
    display * PQ_PEAK_NITS / SDR_REFERENCE_NITS
}

/// Linear to ST.2084 PQ, inverse of `pq_to_linear`
fn linear_to_pq(linear: f32) -> f32 {
    let display = (linear.max(0.0) * SDR_REFERENCE_NITS / PQ_PEAK_NITS).min(1.0);
    let p = display.powf(PQ_M1);
    ((PQ_C1 + PQ_C2 * p) / (1.0 + PQ_C3 * p)).powf(PQ_M2)
}

/// HLG to linear, 1.0 = SDR reference white
fn hlg_to_linear(hlg: f32) -> f32 {
    let hlg = hlg.max(0.0);
    let scene = if hlg <= 0.5 {
        hlg * hlg / 3.0
    } else {
        (((hlg - HLG_C) / HLG_A).exp() + HLG_B) / 12.0
    };
    scene * HLG_PEAK_NITS / SDR_REFERENCE_NITS
}

/// Linear to HLG, inverse of `hlg_to_linear`
fn linear_to_hlg(linear: f32) -> f32 {
    let scene = (linear.max(0.0) * SDR_REFERENCE_NITS / HLG_PEAK_NITS).min(1.0);
    if scene <= 1.0 / 12.0 {
        (3.0 * scene).sqrt()
    } else {
        HLG_A * (12.0 * scene - HLG_B).ln() + HLG_C
    }
}

/// Electro-optical transfer: encoded sample to linear light
pub fn eotf(tf: TransferFunction, value: f32) -> f32 {
    match tf {
        TransferFunction::Srgb => srgb_to_linear(value),
        TransferFunction::Linear => value,
        TransferFunction::Pq => pq_to_linear(value),
        TransferFunction::Hlg => hlg_to_linear(value),
    }
}

/// Opto-electronic transfer: linear light to encoded sample
pub fn oetf(tf: TransferFunction, value: f32) -> f32 {
    match tf {
        TransferFunction::Srgb => linear_to_srgb(value),
        TransferFunction::Linear => value,
        TransferFunction::Pq => linear_to_pq(value),
        TransferFunction::Hlg => linear_to_hlg(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_linear_roundtrip() {
        for i in 0..=100 {
            let srgb = i as f32 / 100.0;
            let back = linear_to_srgb(srgb_to_linear(srgb));
            assert!((srgb - back).abs() < 1e-4, "{srgb} vs {back}");
        }
    }

    #[test]
    fn test_srgb_table_matches_formula() {
        for v in [0u8, 1, 64, 128, 200, 255] {
            let expected = srgb_to_linear(v as f32 / 255.0);
            assert!((srgb_u8_to_linear(v) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pq_roundtrip_and_reference_white() {
        for i in 1..=100 {
            let pq = i as f32 / 100.0;
            let back = linear_to_pq(pq_to_linear(pq));
            assert!((pq - back).abs() < 1e-3, "{pq} vs {back}");
        }
        // 203 nits must map close to linear 1.0
        let white = pq_to_linear(linear_to_pq(1.0));
        assert!((white - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_hlg_roundtrip() {
        for i in 1..=100 {
            let hlg = i as f32 / 100.0;
            let back = linear_to_hlg(hlg_to_linear(hlg));
            assert!((hlg - back).abs() < 1e-3, "{hlg} vs {back}");
        }
    }

    #[test]
    fn test_hdr_transfers_exceed_sdr_white() {
        assert!(pq_to_linear(1.0) > 1.0);
        assert!(hlg_to_linear(1.0) > 1.0);
    }

    #[test]
    fn test_eotf_monotonic() {
        for tf in [
            TransferFunction::Srgb,
            TransferFunction::Linear,
            TransferFunction::Pq,
            TransferFunction::Hlg,
        ] {
            let mut prev = eotf(tf, 0.0);
            for i in 1..=50 {
                let next = eotf(tf, i as f32 / 50.0);
                assert!(next >= prev, "{tf:?} not monotonic");
                prev = next;
            }
        }
    }
}
