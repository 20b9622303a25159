//! Value decoding error type.

use thiserror::Error;

/// Errors that can occur while decoding a BSON value into a native type.
///
/// `TypeMismatch` means the value's variant is incompatible with the
/// expected native type or active strategy ("wrong shape").
/// `CorruptedData` means the variant was right but its content failed a
/// deeper validation ("right shape, bad content") — a malformed UUID
/// string, an unparsable formatted date, invalid base64.
#[derive(Debug, Error)]
pub enum ValueDecodeError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("corrupted {expected}: {detail}")]
    CorruptedData {
        expected: &'static str,
        detail: String,
    },
    #[error("missing key {0:?}")]
    MissingKey(String),
    #[error("index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("custom decode strategy: {0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl ValueDecodeError {
    pub(crate) fn mismatch(expected: &'static str, found: &'static str) -> ValueDecodeError {
        ValueDecodeError::TypeMismatch { expected, found }
    }

    pub(crate) fn corrupted(
        expected: &'static str,
        detail: impl Into<String>,
    ) -> ValueDecodeError {
        ValueDecodeError::CorruptedData {
            expected,
            detail: detail.into(),
        }
    }

    /// Wraps a caller-defined error for propagation through the custom
    /// strategy channel.
    pub fn custom<E>(err: E) -> ValueDecodeError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ValueDecodeError::Custom(Box::new(err))
    }
}
