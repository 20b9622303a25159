//! Low-level byte buffer utilities for the BSON wire format.
//!
//! BSON is a little-endian binary format, so every multi-byte read and
//! write here is little-endian.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for bounds-checked buffer reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
