//! Color management for the codec
//!
//! This crate implements:
//! - transfer functions (sRGB, linear, PQ, HLG) normalized to the SDR
//!   reference white
//! - primaries conversion through XYZ-D65
//! - the XYB-style decorrelation used by the lossy path
//! - logarithmic tone mapping for HDR content on SDR outputs
//! - `ConversionPlan`, the resolve-once/apply-many entry point

pub mod pipeline;
pub mod primaries;
pub mod tonemap;
pub mod transfer;
pub mod xyb;

pub use pipeline::ConversionPlan;
pub use primaries::{conversion_matrix, Mat3};
pub use tonemap::LogToneMapper;
pub use transfer::{eotf, oetf, srgb_to_linear, linear_to_srgb, srgb_u8_to_linear};
pub use xyb::{coded_to_gray, gray_to_coded, rgb_to_xyb, xyb_to_rgb};

/// Force construction of the lazily-built lookup tables. Idempotent and safe
/// to race from multiple threads.
pub fn ensure_tables() {
    transfer::ensure_tables();
}
