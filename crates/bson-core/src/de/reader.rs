//! Container readers — the narrow surface the generic struct-bridge
//! decodes through.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::decoder::Decoder;
use super::error::ValueDecodeError;
use crate::document::Document;
use crate::value::Value;

/// Reads key-addressed values out of a document. Strategy dispatch for
/// dates, UUIDs, and byte blobs happens behind the typed reads.
pub struct DocumentReader<'a> {
    decoder: &'a Decoder,
    doc: &'a Document,
}

impl<'a> DocumentReader<'a> {
    pub(crate) fn new(decoder: &'a Decoder, doc: &'a Document) -> Self {
        Self { decoder, doc }
    }

    /// The raw value at `key`.
    pub fn value(&self, key: &str) -> Result<&'a Value, ValueDecodeError> {
        self.doc
            .get(key)
            .ok_or_else(|| ValueDecodeError::MissingKey(key.to_owned()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.doc.contains_key(key)
    }

    pub fn str(&self, key: &str) -> Result<&'a str, ValueDecodeError> {
        let value = self.value(key)?;
        value
            .as_str()
            .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))
    }

    pub fn i32(&self, key: &str) -> Result<i32, ValueDecodeError> {
        let value = self.value(key)?;
        value
            .as_i32()
            .ok_or_else(|| ValueDecodeError::mismatch("int32", value.type_name()))
    }

    pub fn i64(&self, key: &str) -> Result<i64, ValueDecodeError> {
        let value = self.value(key)?;
        value
            .as_i64()
            .ok_or_else(|| ValueDecodeError::mismatch("int64", value.type_name()))
    }

    pub fn f64(&self, key: &str) -> Result<f64, ValueDecodeError> {
        let value = self.value(key)?;
        value
            .as_f64()
            .ok_or_else(|| ValueDecodeError::mismatch("double", value.type_name()))
    }

    pub fn bool(&self, key: &str) -> Result<bool, ValueDecodeError> {
        let value = self.value(key)?;
        value
            .as_bool()
            .ok_or_else(|| ValueDecodeError::mismatch("boolean", value.type_name()))
    }

    pub fn date(&self, key: &str) -> Result<DateTime<Utc>, ValueDecodeError> {
        self.decoder.decode_date(self.value(key)?)
    }

    pub fn uuid(&self, key: &str) -> Result<Uuid, ValueDecodeError> {
        self.decoder.decode_uuid(self.value(key)?)
    }

    pub fn data(&self, key: &str) -> Result<Vec<u8>, ValueDecodeError> {
        self.decoder.decode_data(self.value(key)?)
    }

    /// Begins decoding the nested document at `key`.
    pub fn document(&self, key: &str) -> Result<DocumentReader<'a>, ValueDecodeError> {
        let value = self.value(key)?;
        let doc = value
            .as_document()
            .ok_or_else(|| ValueDecodeError::mismatch("document", value.type_name()))?;
        Ok(DocumentReader::new(self.decoder, doc))
    }

    /// Begins decoding the nested array at `key`.
    pub fn array(&self, key: &str) -> Result<ArrayReader<'a>, ValueDecodeError> {
        let value = self.value(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| ValueDecodeError::mismatch("array", value.type_name()))?;
        Ok(ArrayReader::new(self.decoder, items))
    }
}

/// Reads index-addressed values out of an array.
pub struct ArrayReader<'a> {
    decoder: &'a Decoder,
    items: &'a [Value],
}

impl<'a> ArrayReader<'a> {
    pub(crate) fn new(decoder: &'a Decoder, items: &'a [Value]) -> Self {
        Self { decoder, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The raw value at `index`.
    pub fn value(&self, index: usize) -> Result<&'a Value, ValueDecodeError> {
        self.items
            .get(index)
            .ok_or(ValueDecodeError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
    }

    pub fn str(&self, index: usize) -> Result<&'a str, ValueDecodeError> {
        let value = self.value(index)?;
        value
            .as_str()
            .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))
    }

    pub fn i32(&self, index: usize) -> Result<i32, ValueDecodeError> {
        let value = self.value(index)?;
        value
            .as_i32()
            .ok_or_else(|| ValueDecodeError::mismatch("int32", value.type_name()))
    }

    pub fn date(&self, index: usize) -> Result<DateTime<Utc>, ValueDecodeError> {
        self.decoder.decode_date(self.value(index)?)
    }

    pub fn uuid(&self, index: usize) -> Result<Uuid, ValueDecodeError> {
        self.decoder.decode_uuid(self.value(index)?)
    }

    pub fn data(&self, index: usize) -> Result<Vec<u8>, ValueDecodeError> {
        self.decoder.decode_data(self.value(index)?)
    }

    /// Begins decoding the nested document at `index`.
    pub fn document(&self, index: usize) -> Result<DocumentReader<'a>, ValueDecodeError> {
        let value = self.value(index)?;
        let doc = value
            .as_document()
            .ok_or_else(|| ValueDecodeError::mismatch("document", value.type_name()))?;
        Ok(DocumentReader::new(self.decoder, doc))
    }

    /// Begins decoding the nested array at `index`.
    pub fn array(&self, index: usize) -> Result<ArrayReader<'a>, ValueDecodeError> {
        let value = self.value(index)?;
        let items = value
            .as_array()
            .ok_or_else(|| ValueDecodeError::mismatch("array", value.type_name()))?;
        Ok(ArrayReader::new(self.decoder, items))
    }
}

/// A single-value handle given to custom strategy functions.
pub struct SingleValueReader<'a> {
    value: &'a Value,
}

impl<'a> SingleValueReader<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The value being decoded.
    pub fn value(&self) -> &'a Value {
        self.value
    }
}
