//! Bit-level I/O for the codestream
//!
//! Readers and writers are LSB-first over in-memory buffers. Errors here are
//! raw bit-level faults; the header and payload layers map them into the
//! public taxonomy with the context they have (a truncated header is a
//! different failure than a truncated entropy payload).

mod bitreader;
mod bitwriter;
mod signed;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use signed::{read_signed, write_signed};

use thiserror::Error;

/// Result type for bit-level operations
pub type BitstreamResult<T> = Result<T, BitstreamError>;

/// Raw bitstream faults
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitstreamError {
    #[error("unexpected end of bitstream")]
    UnexpectedEnd,

    #[error("cannot transfer more than 64 bits at once")]
    WidthTooLarge,

    #[error("value does not fit the coded width")]
    Overflow,
}
