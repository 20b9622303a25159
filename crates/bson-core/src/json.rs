//! Conversions between BSON values and `serde_json` value trees.
//!
//! This is the entry point the textual front end consumes: a well-formed
//! JSON value tree converts into a [`Document`] equal to decoding the
//! corresponding canonical bytes. Plain JSON only — `$`-prefixed extended
//! JSON wrappers are not interpreted here; that is the front end's job.
//!
//! The reverse direction is total but lossy for display purposes: types
//! JSON cannot represent natively are emitted in their familiar
//! `$`-wrapper shapes (binary as base64, ObjectId as hex, and so on);
//! decimal128 payloads are emitted as a hex string.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

use crate::document::Document;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    // Narrowest integer representation wins.
                    Value::from(i)
                } else {
                    Value::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Document(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Document {
    /// Builds a document from a JSON object, preserving key order.
    /// Returns `None` when the value is not an object.
    pub fn from_json(v: serde_json::Value) -> Option<Document> {
        match Value::from(v) {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// The JSON rendering of this document (see the module docs for the
    /// shapes of non-JSON types).
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (key, value) in self.iter() {
            obj.insert(key.to_owned(), serde_json::Value::from(value));
        }
        serde_json::Value::Object(obj)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Double(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Document(doc) => doc.to_json(),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(serde_json::Value::from).collect())
            }
            Value::Binary(bin) => json!({
                "$binary": {
                    "base64": BASE64.encode(&bin.data),
                    "subType": format!("{:02x}", u8::from(bin.subtype)),
                }
            }),
            Value::ObjectId(id) => json!({ "$oid": id.to_string() }),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::DateTime(ms) => json!({ "$date": ms }),
            Value::Null => serde_json::Value::Null,
            Value::Regex(re) => json!({
                "$regularExpression": {
                    "pattern": re.pattern(),
                    "options": re.options(),
                }
            }),
            Value::JavaScript(code) => json!({ "$code": code }),
            Value::JavaScriptWithScope { code, scope } => json!({
                "$code": code,
                "$scope": scope.to_json(),
            }),
            Value::Int32(i) => json!(i),
            Value::Timestamp(ts) => json!({
                "$timestamp": { "t": ts.time, "i": ts.increment }
            }),
            Value::Int64(i) => json!(i),
            Value::Decimal128(dec) => {
                let hex: String = dec
                    .bytes()
                    .iter()
                    .rev()
                    .map(|b| format!("{b:02x}"))
                    .collect();
                serde_json::Value::String(hex)
            }
            Value::MinKey => json!({ "$minKey": 1 }),
            Value::MaxKey => json!({ "$maxKey": 1 }),
        }
    }
}
