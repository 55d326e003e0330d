//! Sample-domain transforms
//!
//! The pieces the decoder and encoder assemble into their pipelines: the
//! 8x8 block transform, distance-driven quantization, zigzag coefficient
//! ordering, the lossless gradient predictor, and the box-filter sampling
//! grid used for sampled decode.

pub mod dct;
pub mod modular;
pub mod quantization;
pub mod sampling;
pub mod zigzag;

pub use dct::{forward_block, inverse_block};
pub use modular::predict;
pub use quantization::{
    dequantize_block, quantize_block, ChannelQuantTables, QuantTable, CODING_SCALE,
};
pub use sampling::{sampled_dimensions, SampleAccumulator};
pub use zigzag::{scan_block, unscan_block, ZIGZAG_8X8};

/// Force construction of the lazily-built DCT basis. Idempotent and safe to
/// race from multiple threads.
pub fn ensure_tables() {
    dct::ensure_tables();
}
