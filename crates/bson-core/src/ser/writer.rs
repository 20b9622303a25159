//! Container writers — the narrow surface the generic struct-bridge
//! encodes through.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::encoder::Encoder;
use super::error::EncodeError;
use crate::document::Document;
use crate::value::Value;

/// Writes key/value pairs into a document under construction. Strategy
/// dispatch for dates, UUIDs, and byte blobs happens behind the `put_*`
/// calls.
pub struct DocumentWriter<'a> {
    encoder: &'a Encoder,
    doc: Document,
}

impl<'a> DocumentWriter<'a> {
    pub(crate) fn new(encoder: &'a Encoder) -> Self {
        Self {
            encoder,
            doc: Document::new(),
        }
    }

    /// Writes an unambiguous primitive or container value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.doc.set(key, value);
    }

    /// Writes a date via the encoder's date strategy.
    pub fn put_date(
        &mut self,
        key: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Result<(), EncodeError> {
        let value = self.encoder.encode_date(date)?;
        self.doc.set(key, value);
        Ok(())
    }

    /// Writes a UUID via the encoder's UUID strategy.
    pub fn put_uuid(&mut self, key: impl Into<String>, uuid: Uuid) {
        let value = self.encoder.encode_uuid(uuid);
        self.doc.set(key, value);
    }

    /// Writes a byte blob via the encoder's data strategy.
    pub fn put_data(&mut self, key: impl Into<String>, data: &[u8]) -> Result<(), EncodeError> {
        let value = self.encoder.encode_data(data)?;
        self.doc.set(key, value);
        Ok(())
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

/// Writes values into an array under construction.
pub struct ArrayWriter<'a> {
    encoder: &'a Encoder,
    items: Vec<Value>,
}

impl<'a> ArrayWriter<'a> {
    pub(crate) fn new(encoder: &'a Encoder) -> Self {
        Self {
            encoder,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    pub fn push_date(&mut self, date: DateTime<Utc>) -> Result<(), EncodeError> {
        let value = self.encoder.encode_date(date)?;
        self.items.push(value);
        Ok(())
    }

    pub fn push_uuid(&mut self, uuid: Uuid) {
        let value = self.encoder.encode_uuid(uuid);
        self.items.push(value);
    }

    pub fn push_data(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        let value = self.encoder.encode_data(data)?;
        self.items.push(value);
        Ok(())
    }

    pub fn finish(self) -> Vec<Value> {
        self.items
    }
}

/// A single-value container handed to custom strategy functions. The last
/// write wins; when the function writes nothing, an empty document is
/// encoded in place of the value.
pub struct SingleValueWriter {
    slot: Option<Value>,
}

impl SingleValueWriter {
    pub(crate) fn new() -> Self {
        Self { slot: None }
    }

    pub fn write(&mut self, value: impl Into<Value>) {
        self.slot = Some(value.into());
    }

    pub fn has_value(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn finish(self) -> Value {
        self.slot.unwrap_or_else(|| Value::Document(Document::new()))
    }
}
