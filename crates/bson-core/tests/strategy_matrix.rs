//! Strategy layer matrix: every encode strategy against its matching and
//! mismatched decode strategies.

use std::sync::Arc;

use bson_core::{
    Binary, DataDecodeStrategy, DataStrategy, DateDecodeStrategy, DateStrategy, Decoder,
    EncodeError, Encoder, UuidDecodeStrategy, UuidStrategy, Value, ValueDecodeError,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

fn date_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

#[test]
fn default_date_strategy_is_bson_datetime() {
    let encoder = Encoder::new();
    let date = date_ms(1_700_000_000_000);
    assert_eq!(
        encoder.encode_date(date).unwrap(),
        Value::DateTime(1_700_000_000_000)
    );
    let decoder = Decoder::new();
    assert_eq!(
        decoder.decode_date(&Value::DateTime(1_700_000_000_000)).unwrap(),
        date
    );
}

#[test]
fn seconds_and_milliseconds_differ_by_exactly_1000x() {
    let date = date_ms(1_700_000_000_500);

    let seconds = Encoder {
        date_strategy: DateStrategy::SecondsSince1970,
        ..Encoder::new()
    };
    let millis = Encoder {
        date_strategy: DateStrategy::MillisecondsSince1970,
        ..Encoder::new()
    };

    let as_seconds = seconds.encode_date(date).unwrap();
    let as_millis = millis.encode_date(date).unwrap();

    // Different variants: double vs int64.
    let secs = as_seconds.as_f64().unwrap();
    let ms = as_millis.as_i64().unwrap();
    assert_eq!(secs * 1000.0, ms as f64);

    // Each decodes back only under its matching strategy.
    let decode_seconds = Decoder {
        date_strategy: DateDecodeStrategy::SecondsSince1970,
        ..Decoder::new()
    };
    let decode_millis = Decoder {
        date_strategy: DateDecodeStrategy::MillisecondsSince1970,
        ..Decoder::new()
    };
    assert_eq!(decode_seconds.decode_date(&as_seconds).unwrap(), date);
    assert_eq!(decode_millis.decode_date(&as_millis).unwrap(), date);

    assert!(matches!(
        decode_seconds.decode_date(&as_millis),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
    assert!(matches!(
        decode_millis.decode_date(&as_seconds),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
}

#[test]
fn iso8601_roundtrip() {
    let date = date_ms(1_672_531_200_123);
    let encoder = Encoder {
        date_strategy: DateStrategy::Iso8601,
        ..Encoder::new()
    };
    let value = encoder.encode_date(date).unwrap();
    assert_eq!(value.as_str(), Some("2023-01-01T00:00:00.123Z"));

    let decoder = Decoder {
        date_strategy: DateDecodeStrategy::Iso8601,
        ..Decoder::new()
    };
    assert_eq!(decoder.decode_date(&value).unwrap(), date);
}

#[test]
fn iso8601_decode_errors_are_distinguished() {
    let decoder = Decoder {
        date_strategy: DateDecodeStrategy::Iso8601,
        ..Decoder::new()
    };
    // Wrong shape entirely.
    assert!(matches!(
        decoder.decode_date(&Value::Int32(1)),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
    // Right shape, bad content.
    assert!(matches!(
        decoder.decode_date(&Value::String("not a date".into())),
        Err(ValueDecodeError::CorruptedData { .. })
    ));
}

#[test]
fn formatted_date_roundtrip() {
    let fmt = "%Y-%m-%d %H:%M:%S";
    let date = date_ms(1_672_531_200_000);
    let encoder = Encoder {
        date_strategy: DateStrategy::Formatted(fmt.into()),
        ..Encoder::new()
    };
    let value = encoder.encode_date(date).unwrap();
    assert_eq!(value.as_str(), Some("2023-01-01 00:00:00"));

    let decoder = Decoder {
        date_strategy: DateDecodeStrategy::Formatted(fmt.into()),
        ..Decoder::new()
    };
    assert_eq!(decoder.decode_date(&value).unwrap(), date);
}

#[test]
fn invalid_format_string_is_rejected_at_encode() {
    let encoder = Encoder {
        date_strategy: DateStrategy::Formatted("%q".into()),
        ..Encoder::new()
    };
    assert!(matches!(
        encoder.encode_date(date_ms(0)),
        Err(EncodeError::InvalidDateFormat(_))
    ));
}

#[test]
fn deferred_date_roundtrip() {
    let date = date_ms(1_700_000_000_250);
    let encoder = Encoder {
        date_strategy: DateStrategy::Deferred,
        ..Encoder::new()
    };
    let value = encoder.encode_date(date).unwrap();
    let decoder = Decoder {
        date_strategy: DateDecodeStrategy::Deferred,
        ..Decoder::new()
    };
    assert_eq!(decoder.decode_date(&value).unwrap(), date);
}

#[test]
fn custom_date_strategy_roundtrip() {
    // Store twice the millisecond count, read it back halved.
    let encoder = Encoder {
        date_strategy: DateStrategy::Custom(Arc::new(|date, writer| {
            writer.write(Value::Int64(date.timestamp_millis() * 2));
            Ok(())
        })),
        ..Encoder::new()
    };
    let decoder = Decoder {
        date_strategy: DateDecodeStrategy::Custom(Arc::new(|reader| {
            let doubled = reader
                .value()
                .as_i64()
                .ok_or(ValueDecodeError::TypeMismatch {
                    expected: "int64",
                    found: "other",
                })?;
            DateTime::from_timestamp_millis(doubled / 2).ok_or(
                ValueDecodeError::CorruptedData {
                    expected: "int64",
                    detail: "out of range".into(),
                },
            )
        })),
        ..Decoder::new()
    };

    let date = date_ms(1_000_000);
    let value = encoder.encode_date(date).unwrap();
    assert_eq!(value, Value::Int64(2_000_000));
    assert_eq!(decoder.decode_date(&value).unwrap(), date);
}

#[test]
fn custom_strategy_writing_nothing_encodes_empty_document() {
    let encoder = Encoder {
        date_strategy: DateStrategy::Custom(Arc::new(|_date, _writer| Ok(()))),
        ..Encoder::new()
    };
    let value = encoder.encode_date(date_ms(0)).unwrap();
    let doc = value.as_document().unwrap();
    assert!(doc.is_empty());
}

#[test]
fn custom_strategy_errors_propagate() {
    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    let encoder = Encoder {
        date_strategy: DateStrategy::Custom(Arc::new(|_date, _writer| {
            Err(EncodeError::custom(Boom))
        })),
        ..Encoder::new()
    };
    assert!(matches!(
        encoder.encode_date(date_ms(0)),
        Err(EncodeError::Custom(_))
    ));
}

#[test]
fn uuid_binary_strategy_roundtrip() {
    let uuid = Uuid::new_v4();
    let encoder = Encoder::new();
    let value = encoder.encode_uuid(uuid);
    let bin = value.as_binary().unwrap();
    assert_eq!(bin.data.len(), 16);

    let decoder = Decoder::new();
    assert_eq!(decoder.decode_uuid(&value).unwrap(), uuid);
}

#[test]
fn uuid_strategy_mismatch_is_type_mismatch() {
    let uuid = Uuid::new_v4();
    let as_string = Encoder {
        uuid_strategy: UuidStrategy::Deferred,
        ..Encoder::new()
    }
    .encode_uuid(uuid);
    let as_binary = Encoder::new().encode_uuid(uuid);

    let binary_decoder = Decoder::new();
    let string_decoder = Decoder {
        uuid_strategy: UuidDecodeStrategy::Deferred,
        ..Decoder::new()
    };

    // Matching pairs succeed.
    assert_eq!(string_decoder.decode_uuid(&as_string).unwrap(), uuid);
    assert_eq!(binary_decoder.decode_uuid(&as_binary).unwrap(), uuid);

    // Mismatched pairs are rejected as the wrong shape.
    assert!(matches!(
        binary_decoder.decode_uuid(&as_string),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
    assert!(matches!(
        string_decoder.decode_uuid(&as_binary),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
}

#[test]
fn malformed_uuid_string_is_corrupted_data() {
    let decoder = Decoder {
        uuid_strategy: UuidDecodeStrategy::Deferred,
        ..Decoder::new()
    };
    assert!(matches!(
        decoder.decode_uuid(&Value::String("not-a-uuid".into())),
        Err(ValueDecodeError::CorruptedData { .. })
    ));
}

#[test]
fn non_uuid_subtype_binary_is_type_mismatch() {
    let decoder = Decoder::new();
    let generic = Value::Binary(Binary::generic(vec![0u8; 16]));
    assert!(matches!(
        decoder.decode_uuid(&generic),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
}

#[test]
fn data_binary_strategy_roundtrip() {
    let payload = vec![0u8, 1, 2, 3, 255];
    let encoder = Encoder::new();
    let value = encoder.encode_data(&payload).unwrap();
    assert!(value.as_binary().is_some());
    let decoder = Decoder::new();
    assert_eq!(decoder.decode_data(&value).unwrap(), payload);
}

#[test]
fn data_deferred_strategy_roundtrip() {
    let payload = vec![0u8, 127, 255];
    let encoder = Encoder {
        data_strategy: DataStrategy::Deferred,
        ..Encoder::new()
    };
    let value = encoder.encode_data(&payload).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::Int32(0), Value::Int32(127), Value::Int32(255)])
    );
    let decoder = Decoder {
        data_strategy: DataDecodeStrategy::Deferred,
        ..Decoder::new()
    };
    assert_eq!(decoder.decode_data(&value).unwrap(), payload);
}

#[test]
fn data_deferred_decode_distinguishes_errors() {
    let decoder = Decoder {
        data_strategy: DataDecodeStrategy::Deferred,
        ..Decoder::new()
    };
    // Element of the wrong variant: wrong shape.
    let bad_shape = Value::Array(vec![Value::from("x")]);
    assert!(matches!(
        decoder.decode_data(&bad_shape),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
    // Integer out of byte range: right shape, bad content.
    let bad_content = Value::Array(vec![Value::Int32(300)]);
    assert!(matches!(
        decoder.decode_data(&bad_content),
        Err(ValueDecodeError::CorruptedData { .. })
    ));
}

#[test]
fn data_base64_strategy_roundtrip() {
    let payload = b"hello bytes".to_vec();
    let encoder = Encoder {
        data_strategy: DataStrategy::Base64,
        ..Encoder::new()
    };
    let value = encoder.encode_data(&payload).unwrap();
    assert!(value.as_str().is_some());
    let decoder = Decoder {
        data_strategy: DataDecodeStrategy::Base64,
        ..Decoder::new()
    };
    assert_eq!(decoder.decode_data(&value).unwrap(), payload);

    assert!(matches!(
        decoder.decode_data(&Value::String("!!! not base64 !!!".into())),
        Err(ValueDecodeError::CorruptedData { .. })
    ));
}

#[test]
fn container_writers_and_readers() {
    let encoder = Encoder::new();
    let date = date_ms(1_700_000_000_000);
    let uuid = Uuid::new_v4();

    let mut writer = encoder.begin_document();
    writer.put("name", "widget");
    writer.put("count", 7);
    writer.put_date("created", date).unwrap();
    writer.put_uuid("id", uuid);
    writer.put_data("payload", &[1, 2, 3]).unwrap();

    let mut tags = encoder.begin_array();
    tags.push("a");
    tags.push("b");
    writer.put("tags", tags.finish());
    let doc = writer.finish();

    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        ["name", "count", "created", "id", "payload", "tags"]
    );

    let decoder = Decoder::new();
    let reader = decoder.read_document(&doc);
    assert_eq!(reader.str("name").unwrap(), "widget");
    assert_eq!(reader.i32("count").unwrap(), 7);
    assert_eq!(reader.date("created").unwrap(), date);
    assert_eq!(reader.uuid("id").unwrap(), uuid);
    assert_eq!(reader.data("payload").unwrap(), [1, 2, 3]);

    let tags = reader.array("tags").unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags.str(0).unwrap(), "a");
    assert_eq!(tags.str(1).unwrap(), "b");

    assert!(matches!(
        reader.value("absent"),
        Err(ValueDecodeError::MissingKey(_))
    ));
    assert!(matches!(
        reader.i32("name"),
        Err(ValueDecodeError::TypeMismatch { .. })
    ));
    assert!(matches!(
        tags.value(2),
        Err(ValueDecodeError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn strategies_survive_the_wire() {
    // Encode with non-default strategies, push through bytes, decode back.
    let encoder = Encoder {
        date_strategy: DateStrategy::MillisecondsSince1970,
        uuid_strategy: UuidStrategy::Deferred,
        data_strategy: DataStrategy::Base64,
    };
    let date = date_ms(1_600_000_000_000);
    let uuid = Uuid::new_v4();

    let mut writer = encoder.begin_document();
    writer.put_date("when", date).unwrap();
    writer.put_uuid("who", uuid);
    writer.put_data("blob", &[9, 8, 7]).unwrap();
    let doc = writer.finish();

    let decoded = bson_core::Document::from_bytes(&doc.to_bytes()).unwrap();
    let decoder = Decoder {
        date_strategy: DateDecodeStrategy::MillisecondsSince1970,
        uuid_strategy: UuidDecodeStrategy::Deferred,
        data_strategy: DataDecodeStrategy::Base64,
    };
    let reader = decoder.read_document(&decoded);
    assert_eq!(reader.date("when").unwrap(), date);
    assert_eq!(reader.uuid("who").unwrap(), uuid);
    assert_eq!(reader.data("blob").unwrap(), [9, 8, 7]);
}
