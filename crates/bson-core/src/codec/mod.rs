//! BSON wire-format encoding and decoding.
//!
//! The wire layout is: `int32 total_length` (little-endian, includes
//! itself and the trailing null), zero or more elements, one null byte.
//! Each element is a type-tag byte, a null-terminated UTF-8 key, and a
//! type-specific payload.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::DocumentDecoder;
pub use encoder::DocumentEncoder;
pub use error::ParseError;
