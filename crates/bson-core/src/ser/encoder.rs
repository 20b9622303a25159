//! The strategy-resolving encoder.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::error::EncodeError;
use super::strategy::{DataStrategy, DateStrategy, UuidStrategy};
use super::writer::{ArrayWriter, DocumentWriter, SingleValueWriter};
use crate::value::{Binary, Value};

/// ISO-8601 with millisecond precision, e.g. `2023-01-01T00:00:00.000Z`.
pub(crate) const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Turns native values into BSON [`Value`]s, resolving dates, UUIDs, and
/// byte blobs per its configured strategies.
///
/// Strategies are independent of any decoder-side configuration.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    pub date_strategy: DateStrategy,
    pub uuid_strategy: UuidStrategy,
    pub data_strategy: DataStrategy,
}

impl Encoder {
    /// An encoder using the BSON-native representation for every
    /// ambiguous type.
    pub fn new() -> Encoder {
        Encoder::default()
    }

    /// Encodes a date according to the active date strategy.
    pub fn encode_date(&self, date: DateTime<Utc>) -> Result<Value, EncodeError> {
        match &self.date_strategy {
            DateStrategy::DateTime => Ok(Value::DateTime(date.timestamp_millis())),
            DateStrategy::SecondsSince1970 => {
                Ok(Value::Double(date.timestamp_millis() as f64 / 1000.0))
            }
            DateStrategy::MillisecondsSince1970 => Ok(Value::Int64(date.timestamp_millis())),
            DateStrategy::Iso8601 => {
                Ok(Value::String(date.format(ISO8601_FORMAT).to_string()))
            }
            DateStrategy::Formatted(fmt) => {
                if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
                    return Err(EncodeError::InvalidDateFormat(fmt.clone()));
                }
                Ok(Value::String(date.format(fmt).to_string()))
            }
            DateStrategy::Deferred => Ok(Value::String(
                date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            DateStrategy::Custom(encode) => {
                let mut writer = SingleValueWriter::new();
                encode(date, &mut writer)?;
                Ok(writer.finish())
            }
        }
    }

    /// Encodes a UUID according to the active UUID strategy. Total.
    pub fn encode_uuid(&self, uuid: Uuid) -> Value {
        match self.uuid_strategy {
            UuidStrategy::Binary => Value::Binary(Binary::from_uuid(uuid)),
            UuidStrategy::Deferred => Value::String(uuid.to_string()),
        }
    }

    /// Encodes a byte blob according to the active data strategy.
    pub fn encode_data(&self, data: &[u8]) -> Result<Value, EncodeError> {
        match &self.data_strategy {
            DataStrategy::Binary => Ok(Value::Binary(Binary::generic(data.to_vec()))),
            DataStrategy::Deferred => Ok(Value::Array(
                data.iter().map(|b| Value::Int32(*b as i32)).collect(),
            )),
            DataStrategy::Base64 => Ok(Value::String(BASE64.encode(data))),
            DataStrategy::Custom(encode) => {
                let mut writer = SingleValueWriter::new();
                encode(data, &mut writer)?;
                Ok(writer.finish())
            }
        }
    }

    /// Begins encoding a keyed container.
    pub fn begin_document(&self) -> DocumentWriter<'_> {
        DocumentWriter::new(self)
    }

    /// Begins encoding an indexed container.
    pub fn begin_array(&self) -> ArrayWriter<'_> {
        ArrayWriter::new(self)
    }
}
