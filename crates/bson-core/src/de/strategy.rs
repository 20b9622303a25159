//! Decoding strategies, mirroring the encoder side.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::ValueDecodeError;
use super::reader::SingleValueReader;

/// Caller-supplied date decode function: receives a handle to the value
/// being decoded and returns the native value.
pub type CustomDateDecodeFn = Arc<
    dyn Fn(&SingleValueReader<'_>) -> Result<DateTime<Utc>, ValueDecodeError> + Send + Sync,
>;

/// Caller-supplied byte-blob decode function.
pub type CustomDataDecodeFn =
    Arc<dyn Fn(&SingleValueReader<'_>) -> Result<Vec<u8>, ValueDecodeError> + Send + Sync>;

/// How to decode a native date. Each strategy accepts only the value
/// shape its encoding counterpart produces.
#[derive(Clone, Default)]
pub enum DateDecodeStrategy {
    /// BSON datetime.
    #[default]
    DateTime,
    /// Double holding seconds since epoch.
    SecondsSince1970,
    /// Int64 holding milliseconds since epoch.
    MillisecondsSince1970,
    /// ISO-8601 string with millisecond precision.
    Iso8601,
    /// String parsed with the given strftime-style format.
    Formatted(String),
    /// RFC 3339 string (the date type's own textual representation).
    Deferred,
    /// Caller-supplied function.
    Custom(CustomDateDecodeFn),
}

impl fmt::Debug for DateDecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateDecodeStrategy::DateTime => f.write_str("DateTime"),
            DateDecodeStrategy::SecondsSince1970 => f.write_str("SecondsSince1970"),
            DateDecodeStrategy::MillisecondsSince1970 => f.write_str("MillisecondsSince1970"),
            DateDecodeStrategy::Iso8601 => f.write_str("Iso8601"),
            DateDecodeStrategy::Formatted(fmt_str) => {
                f.debug_tuple("Formatted").field(fmt_str).finish()
            }
            DateDecodeStrategy::Deferred => f.write_str("Deferred"),
            DateDecodeStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How to decode a native UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidDecodeStrategy {
    /// Binary with a UUID subtype.
    #[default]
    Binary,
    /// Canonical hyphenated string.
    Deferred,
}

/// How to decode a native byte blob.
#[derive(Clone, Default)]
pub enum DataDecodeStrategy {
    /// Binary with the generic subtype.
    #[default]
    Binary,
    /// Array of byte-sized integers.
    Deferred,
    /// Base64 text.
    Base64,
    /// Caller-supplied function.
    Custom(CustomDataDecodeFn),
}

impl fmt::Debug for DataDecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataDecodeStrategy::Binary => f.write_str("Binary"),
            DataDecodeStrategy::Deferred => f.write_str("Deferred"),
            DataDecodeStrategy::Base64 => f.write_str("Base64"),
            DataDecodeStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
