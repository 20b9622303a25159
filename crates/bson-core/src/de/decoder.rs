//! The strategy-resolving decoder.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use super::error::ValueDecodeError;
use super::reader::{ArrayReader, DocumentReader, SingleValueReader};
use super::strategy::{DataDecodeStrategy, DateDecodeStrategy, UuidDecodeStrategy};
use crate::document::Document;
use crate::ser::encoder::ISO8601_FORMAT;
use crate::value::{BinarySubtype, Value};

/// Turns BSON [`Value`]s back into native values, resolving dates, UUIDs,
/// and byte blobs per its configured strategies.
///
/// Strategies are independent of any encoder-side configuration. A
/// mismatched strategy is never silently fallen back from: the value is
/// rejected with a type-mismatch error.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    pub date_strategy: DateDecodeStrategy,
    pub uuid_strategy: UuidDecodeStrategy,
    pub data_strategy: DataDecodeStrategy,
}

impl Decoder {
    /// A decoder expecting the BSON-native representation for every
    /// ambiguous type.
    pub fn new() -> Decoder {
        Decoder::default()
    }

    /// Decodes a date according to the active date strategy.
    pub fn decode_date(&self, value: &Value) -> Result<DateTime<Utc>, ValueDecodeError> {
        match &self.date_strategy {
            DateDecodeStrategy::DateTime => {
                let ms = value
                    .as_datetime()
                    .ok_or_else(|| ValueDecodeError::mismatch("dateTime", value.type_name()))?;
                DateTime::from_timestamp_millis(ms)
                    .ok_or_else(|| ValueDecodeError::corrupted("dateTime", format!("{ms} ms")))
            }
            DateDecodeStrategy::SecondsSince1970 => {
                let secs = value
                    .as_f64()
                    .ok_or_else(|| ValueDecodeError::mismatch("double", value.type_name()))?;
                let ms = secs * 1000.0;
                if !ms.is_finite() || ms < i64::MIN as f64 || ms > i64::MAX as f64 {
                    return Err(ValueDecodeError::corrupted("double", format!("{secs} s")));
                }
                DateTime::from_timestamp_millis(ms.round() as i64)
                    .ok_or_else(|| ValueDecodeError::corrupted("double", format!("{secs} s")))
            }
            DateDecodeStrategy::MillisecondsSince1970 => {
                let ms = value
                    .as_i64()
                    .ok_or_else(|| ValueDecodeError::mismatch("int64", value.type_name()))?;
                DateTime::from_timestamp_millis(ms)
                    .ok_or_else(|| ValueDecodeError::corrupted("int64", format!("{ms} ms")))
            }
            DateDecodeStrategy::Iso8601 => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))?;
                NaiveDateTime::parse_from_str(s, ISO8601_FORMAT)
                    .map(|naive| naive.and_utc())
                    .map_err(|err| ValueDecodeError::corrupted("ISO-8601 date", err.to_string()))
            }
            DateDecodeStrategy::Formatted(fmt) => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))?;
                NaiveDateTime::parse_from_str(s, fmt)
                    .map(|naive| naive.and_utc())
                    .map_err(|err| ValueDecodeError::corrupted("formatted date", err.to_string()))
            }
            DateDecodeStrategy::Deferred => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))?;
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|err| ValueDecodeError::corrupted("RFC 3339 date", err.to_string()))
            }
            DateDecodeStrategy::Custom(decode) => decode(&SingleValueReader::new(value)),
        }
    }

    /// Decodes a UUID according to the active UUID strategy.
    pub fn decode_uuid(&self, value: &Value) -> Result<Uuid, ValueDecodeError> {
        match self.uuid_strategy {
            UuidDecodeStrategy::Binary => {
                let bin = value.as_binary().ok_or_else(|| {
                    ValueDecodeError::mismatch("uuid-subtype binary", value.type_name())
                })?;
                if !bin.subtype.is_uuid() {
                    return Err(ValueDecodeError::mismatch(
                        "uuid-subtype binary",
                        "binary with non-uuid subtype",
                    ));
                }
                Uuid::from_slice(&bin.data).map_err(|_| {
                    ValueDecodeError::corrupted(
                        "uuid-subtype binary",
                        format!("{} bytes", bin.data.len()),
                    )
                })
            }
            UuidDecodeStrategy::Deferred => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))?;
                Uuid::parse_str(s)
                    .map_err(|err| ValueDecodeError::corrupted("uuid string", err.to_string()))
            }
        }
    }

    /// Decodes a byte blob according to the active data strategy.
    pub fn decode_data(&self, value: &Value) -> Result<Vec<u8>, ValueDecodeError> {
        match &self.data_strategy {
            DataDecodeStrategy::Binary => {
                let bin = value.as_binary().ok_or_else(|| {
                    ValueDecodeError::mismatch("generic binary", value.type_name())
                })?;
                match bin.subtype {
                    BinarySubtype::Generic | BinarySubtype::BinaryOld => Ok(bin.data.clone()),
                    _ => Err(ValueDecodeError::mismatch(
                        "generic binary",
                        "binary with non-generic subtype",
                    )),
                }
            }
            DataDecodeStrategy::Deferred => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ValueDecodeError::mismatch("array", value.type_name()))?;
                let mut data = Vec::with_capacity(items.len());
                for item in items {
                    let byte = item.as_i32().ok_or_else(|| {
                        ValueDecodeError::mismatch("int32 array element", item.type_name())
                    })?;
                    if !(0..=255).contains(&byte) {
                        return Err(ValueDecodeError::corrupted(
                            "byte array",
                            format!("element {byte} out of byte range"),
                        ));
                    }
                    data.push(byte as u8);
                }
                Ok(data)
            }
            DataDecodeStrategy::Base64 => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ValueDecodeError::mismatch("string", value.type_name()))?;
                BASE64
                    .decode(s)
                    .map_err(|err| ValueDecodeError::corrupted("base64 string", err.to_string()))
            }
            DataDecodeStrategy::Custom(decode) => decode(&SingleValueReader::new(value)),
        }
    }

    /// Begins decoding a keyed container.
    pub fn read_document<'a>(&'a self, doc: &'a Document) -> DocumentReader<'a> {
        DocumentReader::new(self, doc)
    }

    /// Begins decoding an indexed container.
    pub fn read_array<'a>(&'a self, items: &'a [Value]) -> ArrayReader<'a> {
        ArrayReader::new(self, items)
    }
}
