//! Encoding error type.

use thiserror::Error;

/// Errors that can occur while encoding a native value.
///
/// Encoding of built-in strategies is total; the only failure paths are a
/// rejected caller-supplied format string and errors propagated unchanged
/// from caller-supplied custom strategy functions.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid date format string: {0:?}")]
    InvalidDateFormat(String),
    #[error("custom encode strategy: {0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl EncodeError {
    /// Wraps a caller-defined error for propagation through the custom
    /// strategy channel.
    pub fn custom<E>(err: E) -> EncodeError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EncodeError::Custom(Box::new(err))
    }
}
