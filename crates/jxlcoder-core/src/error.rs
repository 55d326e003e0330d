//! Error taxonomy for codec operations
//!
//! Every failure is one of five categories with distinct caller semantics:
//! header faults are unrecoverable for the same bytes, unsupported features
//! invite a fallback decoder, payload corruption never surfaces partial
//! output, and input violations are caller bugs.

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during probing, decoding and encoding
#[derive(Error, Debug)]
pub enum CodecError {
    /// Signature absent, or the structural header is truncated or
    /// inconsistent. Retrying with the same bytes cannot succeed.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The bitstream is valid but uses a feature this implementation does
    /// not decode. Callers may hand the bytes to another decoder.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// The entropy-coded payload is inconsistent or truncated mid-decode.
    /// No partial pixel output is ever returned.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Caller contract violation: zero dimensions, buffer length mismatch,
    /// out-of-range parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal encoder fault. No partial bytes are returned.
    #[error("encode failure: {0}")]
    EncodeFailure(String),
}
