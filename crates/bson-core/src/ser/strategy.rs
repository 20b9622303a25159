//! Encoding strategies for the ambiguous native types.
//!
//! Each strategy names one of the plausible BSON representations of a
//! native type. Defaults are the BSON-native representations.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::EncodeError;
use super::writer::SingleValueWriter;

/// Caller-supplied date encode function: receives the native value and a
/// handle to the active container. Writing nothing encodes an empty
/// document in place of the value.
pub type CustomDateEncodeFn =
    Arc<dyn Fn(DateTime<Utc>, &mut SingleValueWriter) -> Result<(), EncodeError> + Send + Sync>;

/// Caller-supplied byte-blob encode function.
pub type CustomDataEncodeFn =
    Arc<dyn Fn(&[u8], &mut SingleValueWriter) -> Result<(), EncodeError> + Send + Sync>;

/// How to encode a native date.
#[derive(Clone, Default)]
pub enum DateStrategy {
    /// BSON datetime (milliseconds since epoch).
    #[default]
    DateTime,
    /// Double holding seconds since epoch.
    SecondsSince1970,
    /// Int64 holding milliseconds since epoch.
    MillisecondsSince1970,
    /// ISO-8601 string with millisecond precision.
    Iso8601,
    /// String produced by the given strftime-style format.
    Formatted(String),
    /// The date type's own textual representation (RFC 3339).
    Deferred,
    /// Caller-supplied function.
    Custom(CustomDateEncodeFn),
}

impl fmt::Debug for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStrategy::DateTime => f.write_str("DateTime"),
            DateStrategy::SecondsSince1970 => f.write_str("SecondsSince1970"),
            DateStrategy::MillisecondsSince1970 => f.write_str("MillisecondsSince1970"),
            DateStrategy::Iso8601 => f.write_str("Iso8601"),
            DateStrategy::Formatted(fmt_str) => f.debug_tuple("Formatted").field(fmt_str).finish(),
            DateStrategy::Deferred => f.write_str("Deferred"),
            DateStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How to encode a native UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidStrategy {
    /// Binary with the UUID subtype.
    #[default]
    Binary,
    /// The UUID type's own representation: its canonical hyphenated
    /// string.
    Deferred,
}

/// How to encode a native byte blob.
#[derive(Clone, Default)]
pub enum DataStrategy {
    /// Binary with the generic subtype.
    #[default]
    Binary,
    /// The blob's own representation: an array of byte-sized integers.
    Deferred,
    /// Base64 text.
    Base64,
    /// Caller-supplied function.
    Custom(CustomDataEncodeFn),
}

impl fmt::Debug for DataStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataStrategy::Binary => f.write_str("Binary"),
            DataStrategy::Deferred => f.write_str("Deferred"),
            DataStrategy::Base64 => f.write_str("Base64"),
            DataStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
