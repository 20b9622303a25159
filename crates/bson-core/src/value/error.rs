//! Construction-time error type for value types.

use thiserror::Error;

/// Error raised when a value cannot be constructed from the given
/// arguments. Surfaced before the value enters any document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("binary subtype 0x{subtype:02x} requires a 16-byte payload, got {len}")]
    BinaryPayloadLength { subtype: u8, len: usize },
    #[error("invalid regular expression options: {0:?}")]
    RegexOptions(String),
    #[error("invalid ObjectId hex string: {0:?}")]
    ObjectIdHex(String),
}
