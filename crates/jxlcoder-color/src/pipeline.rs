//! Conversion planning: resolve once, apply over every pixel
//!
//! The plan captures the minimal chain between a source and a target
//! encoding: nothing at all on the fast path, otherwise linearize with the
//! source EOTF, remap primaries, optionally tone-map HDR down to the SDR
//! range, and re-encode with the target OETF.

use crate::primaries::{self, Mat3};
use crate::tonemap::{content_peak, LogToneMapper};
use crate::transfer::{eotf, oetf};
use jxlcoder_core::{ColorEncoding, Primaries, TransferFunction};

/// A resolved source-to-target color conversion
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    linearize: Option<TransferFunction>,
    matrix: Option<Mat3>,
    tone_map: Option<LogToneMapper>,
    reencode: Option<TransferFunction>,
    clamp: bool,
}

impl ConversionPlan {
    /// Resolve the chain from `source` to a target described by primaries
    /// and transfer function. `tone_map` asks for HDR range compression
    /// (honored only when the source actually carries HDR).
    pub fn resolve(
        source: &ColorEncoding,
        target_primaries: Primaries,
        target_transfer: TransferFunction,
        tone_map: bool,
    ) -> Self {
        let identity =
            source.primaries == target_primaries && source.transfer == target_transfer;
        if identity {
            return Self {
                linearize: None,
                matrix: None,
                tone_map: None,
                reencode: None,
                clamp: false,
            };
        }

        let linearize = (source.transfer != TransferFunction::Linear).then_some(source.transfer);
        let matrix = primaries::conversion_matrix(source.primaries, target_primaries);
        let tone_map = (tone_map && source.is_hdr())
            .then(|| LogToneMapper::new(content_peak(source.transfer)));
        let reencode = (target_transfer != TransferFunction::Linear).then_some(target_transfer);
        // Integer targets clip; a linear target keeps extended range.
        let clamp = target_transfer != TransferFunction::Linear;

        Self {
            linearize,
            matrix,
            tone_map,
            reencode,
            clamp,
        }
    }

    /// True when source and target are bit-identical and `apply` is a no-op
    pub fn is_identity(&self) -> bool {
        self.linearize.is_none()
            && self.matrix.is_none()
            && self.tone_map.is_none()
            && self.reencode.is_none()
    }

    /// Convert interleaved samples in place. `stride` is the distance
    /// between pixels; only the first three channels of each pixel are
    /// color, anything after (alpha) is left untouched.
    pub fn apply(&self, samples: &mut [f32], stride: usize) {
        if self.is_identity() {
            return;
        }
        for pixel in samples.chunks_exact_mut(stride) {
            let mut rgb = [pixel[0], pixel[1], pixel[2]];
            if let Some(tf) = self.linearize {
                for c in rgb.iter_mut() {
                    *c = eotf(tf, *c);
                }
            }
            if let Some(m) = &self.matrix {
                rgb = primaries::apply(m, rgb);
            }
            if let Some(mapper) = &self.tone_map {
                mapper.map(&mut rgb);
            }
            if self.clamp {
                for c in rgb.iter_mut() {
                    *c = c.clamp(0.0, 1.0);
                }
            }
            if let Some(tf) = self.reencode {
                for c in rgb.iter_mut() {
                    *c = oetf(tf, *c);
                }
            }
            pixel[0] = rgb[0];
            pixel[1] = rgb[1];
            pixel[2] = rgb[2];
        }
    }
}
