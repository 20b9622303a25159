//! Strategy-driven decoding of BSON values back into native types.
//!
//! [`Decoder`] mirrors the encoder-side strategies. A value whose variant
//! does not match the configured strategy's expected shape is rejected
//! with a type-mismatch error; a value of the right shape whose content
//! fails deeper validation is rejected with a corrupted-data error.

pub mod decoder;
pub mod error;
pub mod reader;
pub mod strategy;

pub use decoder::Decoder;
pub use error::ValueDecodeError;
pub use reader::{ArrayReader, DocumentReader, SingleValueReader};
pub use strategy::{
    CustomDataDecodeFn, CustomDateDecodeFn, DataDecodeStrategy, DateDecodeStrategy,
    UuidDecodeStrategy,
};
