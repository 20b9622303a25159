//! Wire-format decode error type.

use bson_buffers::BufferError;
use thiserror::Error;

/// Error type for decoding encoded documents. Each malformed-input
/// condition is a distinct variant; decoding stops at the first violation
/// and never returns a partial document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("declared document length {declared} does not match buffer length {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("buffer too short for a document: {0} bytes")]
    TooShort(usize),
    #[error("document does not end with a null terminator")]
    MissingTerminator,
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),
    #[error("unsupported BSON element type: 0x{0:02x}")]
    UnsupportedType(u8),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("binary subtype 0x{subtype:02x} requires a 16-byte payload, got {len}")]
    InvalidBinaryLength { subtype: u8, len: usize },
}

impl From<BufferError> for ParseError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => ParseError::UnexpectedEof,
            BufferError::InvalidUtf8 => ParseError::InvalidUtf8,
        }
    }
}
