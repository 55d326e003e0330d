//! Core types shared by the jxlcoder crates
//!
//! This crate provides the fundamental data structures used throughout the
//! codec: image descriptors, color encodings, pixel formats with their
//! capability-driven negotiation, and the public error taxonomy.

pub mod consts;
pub mod error;
pub mod format;
pub mod image;
pub mod types;

pub use error::{CodecError, CodecResult};
pub use format::*;
pub use image::*;
pub use types::*;
