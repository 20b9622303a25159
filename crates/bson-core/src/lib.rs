//! BSON document model, wire-format codec, and strategy-driven value
//! coding.
//!
//! The pieces, leaf-first:
//!
//! - [`value::Value`] — the closed union of supported BSON types, with
//!   narrowing accessors and order-insensitive deep comparison.
//! - [`document::Document`] — an insertion-ordered, copy-on-write mapping
//!   from string keys to values.
//! - [`codec`] — the binary wire-format encoder and validating/trusted
//!   decoders.
//! - [`ser`] / [`de`] — the strategy layer resolving ambiguous native
//!   types (dates, UUIDs, byte blobs) to and from BSON representations.
//! - [`json`] — conversions to and from `serde_json` value trees.

pub mod codec;
pub mod de;
pub mod document;
pub mod json;
mod macros;
pub mod ser;
pub mod value;

pub use codec::{DocumentDecoder, DocumentEncoder, ParseError};
pub use de::{
    DataDecodeStrategy, DateDecodeStrategy, Decoder, UuidDecodeStrategy, ValueDecodeError,
};
pub use document::Document;
pub use ser::{DataStrategy, DateStrategy, EncodeError, Encoder, UuidStrategy};
pub use value::{
    Binary, BinarySubtype, Decimal128, ElementType, InvalidArgument, ObjectId, Regex, Timestamp,
    Value,
};
