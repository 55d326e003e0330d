//! # jxlcoder - image codec core
//!
//! A pure, stateless codec library over in-memory buffers: sniff, probe,
//! decode (full or sampled) and encode. Platform bindings (JNI, FFI, N-API)
//! live outside this crate and marshal plain buffers across the boundary.
//!
//! ## Quick start
//!
//! ### Probing and decoding
//!
//! ```no_run
//! use jxlcoder::{decode, probe, DecodeOptions, PixelFormat};
//!
//! let bytes: Vec<u8> = std::fs::read("input.jxl").unwrap();
//! let descriptor = probe(&bytes).unwrap();
//! println!("{}x{}", descriptor.width, descriptor.height);
//!
//! let image = decode(
//!     &bytes,
//!     &DecodeOptions {
//!         target_width: Some(512),
//!         target_height: Some(512),
//!         format: PixelFormat::Rgba8888,
//!         ..DecodeOptions::default()
//!     },
//! )
//! .unwrap();
//! println!("decoded {}x{} as {:?}", image.width, image.height, image.format);
//! ```
//!
//! ### Encoding
//!
//! ```no_run
//! use jxlcoder::{
//!     encode, ChannelLayout, ColorEncoding, CompressionMode, Dimensions, EncodeRequest,
//!     ImageView, SampleSlice,
//! };
//!
//! let pixels = vec![0u8; 640 * 480 * 3];
//! let color = ColorEncoding::srgb();
//! let image = ImageView::new(
//!     Dimensions::new(640, 480),
//!     ChannelLayout::Rgb,
//!     8,
//!     &color,
//!     SampleSlice::U8(&pixels),
//! )
//! .unwrap();
//!
//! let request = EncodeRequest {
//!     mode: CompressionMode::Lossy { distance: 1.0 },
//!     ..EncodeRequest::default()
//! };
//! let bytes = encode(&image, &request).unwrap();
//! std::fs::write("output.jxl", bytes).unwrap();
//! ```
//!
//! ## Concurrency
//!
//! Every operation is independently invocable from multiple threads; there
//! is no shared mutable state. The only process-wide state is a set of
//! lazily-built lookup tables, initialized idempotently (`init` forces them
//! eagerly for callers that want deterministic first-call latency).

// Re-export core types
pub use jxlcoder_core::{
    negotiate, CapabilitySet, ChannelLayout, CodecError, CodecResult, CodingMode, ColorEncoding,
    DecodedImage, Dimensions, ImageDescriptor, ImageView, PixelFormat, Primaries, SampleSlice,
    TransferFunction, WhitePoint,
};

// Re-export the container and header surface
pub use jxlcoder_headers::{
    is_recognized_container, probe, CodestreamHeader, Container, ContainerSignature,
    CODESTREAM_SIGNATURE, CONTAINER_SIGNATURE,
};

// Re-export decoder
pub use jxlcoder_decoder::{decode, DecodeOptions};

// Re-export encoder
pub use jxlcoder_encoder::{encode, CompressionMode, EncodeColorSpace, EncodeRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Force construction of the lazily-built lookup tables (transfer function
/// and transform bases). Idempotent and safe to race; decoding and encoding
/// call through to the same tables, so this is purely a warm-up.
pub fn init() {
    jxlcoder_color::ensure_tables();
    jxlcoder_transform::ensure_tables();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
