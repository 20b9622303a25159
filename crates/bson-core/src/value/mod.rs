//! The BSON value model.
//!
//! [`Value`] is a closed union over every BSON type this crate supports.
//! The deprecated wire types (undefined 0x06, DBPointer 0x0C, symbol 0x0E)
//! are not representable; the decoder rejects their tags.

mod binary;
mod decimal128;
mod error;
mod object_id;
mod regex;
mod timestamp;

pub use binary::{Binary, BinarySubtype};
pub use decimal128::Decimal128;
pub use error::InvalidArgument;
pub use object_id::ObjectId;
pub use regex::Regex;
pub use timestamp::Timestamp;

use crate::document::Document;

/// Wire-format element type tags, standard BSON byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    Double = 0x01,
    String = 0x02,
    EmbeddedDocument = 0x03,
    Array = 0x04,
    Binary = 0x05,
    ObjectId = 0x07,
    Boolean = 0x08,
    DateTime = 0x09,
    Null = 0x0A,
    Regex = 0x0B,
    JavaScript = 0x0D,
    JavaScriptWithScope = 0x0F,
    Int32 = 0x10,
    Timestamp = 0x11,
    Int64 = 0x12,
    Decimal128 = 0x13,
    MaxKey = 0x7F,
    MinKey = 0xFF,
}

impl ElementType {
    /// Maps a wire tag byte to its element type. Returns `None` for
    /// unrecognized or deprecated tags.
    pub fn from_tag(tag: u8) -> Option<ElementType> {
        Some(match tag {
            0x01 => ElementType::Double,
            0x02 => ElementType::String,
            0x03 => ElementType::EmbeddedDocument,
            0x04 => ElementType::Array,
            0x05 => ElementType::Binary,
            0x07 => ElementType::ObjectId,
            0x08 => ElementType::Boolean,
            0x09 => ElementType::DateTime,
            0x0A => ElementType::Null,
            0x0B => ElementType::Regex,
            0x0D => ElementType::JavaScript,
            0x0F => ElementType::JavaScriptWithScope,
            0x10 => ElementType::Int32,
            0x11 => ElementType::Timestamp,
            0x12 => ElementType::Int64,
            0x13 => ElementType::Decimal128,
            0x7F => ElementType::MaxKey,
            0xFF => ElementType::MinKey,
            _ => return None,
        })
    }
}

/// A BSON value that can appear as a document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit IEEE 754 floating point (0x01)
    Double(f64),
    /// UTF-8 string (0x02)
    String(String),
    /// Embedded document (0x03)
    Document(Document),
    /// Array (0x04)
    Array(Vec<Value>),
    /// Binary data with subtype (0x05)
    Binary(Binary),
    /// 12-byte ObjectId (0x07)
    ObjectId(ObjectId),
    /// Boolean (0x08)
    Boolean(bool),
    /// UTC datetime, milliseconds since Unix epoch (0x09)
    DateTime(i64),
    /// Null (0x0A)
    Null,
    /// Regular expression (0x0B)
    Regex(Regex),
    /// JavaScript code (0x0D)
    JavaScript(String),
    /// JavaScript code with scope document (0x0F)
    JavaScriptWithScope {
        code: String,
        scope: Document,
    },
    /// 32-bit signed integer (0x10)
    Int32(i32),
    /// Replication timestamp (0x11)
    Timestamp(Timestamp),
    /// 64-bit signed integer (0x12)
    Int64(i64),
    /// 128-bit IEEE 754-2008 decimal (0x13)
    Decimal128(Decimal128),
    /// MinKey sentinel (0xFF)
    MinKey,
    /// MaxKey sentinel (0x7F)
    MaxKey,
}

impl Value {
    /// The wire-format element type of this value.
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::Double(_) => ElementType::Double,
            Value::String(_) => ElementType::String,
            Value::Document(_) => ElementType::EmbeddedDocument,
            Value::Array(_) => ElementType::Array,
            Value::Binary(_) => ElementType::Binary,
            Value::ObjectId(_) => ElementType::ObjectId,
            Value::Boolean(_) => ElementType::Boolean,
            Value::DateTime(_) => ElementType::DateTime,
            Value::Null => ElementType::Null,
            Value::Regex(_) => ElementType::Regex,
            Value::JavaScript(_) => ElementType::JavaScript,
            Value::JavaScriptWithScope { .. } => ElementType::JavaScriptWithScope,
            Value::Int32(_) => ElementType::Int32,
            Value::Timestamp(_) => ElementType::Timestamp,
            Value::Int64(_) => ElementType::Int64,
            Value::Decimal128(_) => ElementType::Decimal128,
            Value::MinKey => ElementType::MinKey,
            Value::MaxKey => ElementType::MaxKey,
        }
    }

    /// Human-readable variant name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Document(_) => "document",
            Value::Array(_) => "array",
            Value::Binary(_) => "binary",
            Value::ObjectId(_) => "objectId",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "dateTime",
            Value::Null => "null",
            Value::Regex(_) => "regex",
            Value::JavaScript(_) => "javascript",
            Value::JavaScriptWithScope { .. } => "javascriptWithScope",
            Value::Int32(_) => "int32",
            Value::Timestamp(_) => "timestamp",
            Value::Int64(_) => "int64",
            Value::Decimal128(_) => "decimal128",
            Value::MinKey => "minKey",
            Value::MaxKey => "maxKey",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<&ObjectId> {
        match self {
            Value::ObjectId(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Milliseconds since the Unix epoch for datetime values.
    pub fn as_datetime(&self) -> Option<i64> {
        match self {
            Value::DateTime(ms) => Some(*ms),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&Regex> {
        match self {
            Value::Regex(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_javascript(&self) -> Option<&str> {
        match self {
            Value::JavaScript(code) => Some(code),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal128(&self) -> Option<&Decimal128> {
        match self {
            Value::Decimal128(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_min_key(&self) -> bool {
        matches!(self, Value::MinKey)
    }

    pub fn is_max_key(&self) -> bool {
        matches!(self, Value::MaxKey)
    }

    /// Deep equality that ignores key order inside nested documents.
    ///
    /// Array element order is always significant, even under
    /// order-insensitive document comparison.
    pub fn eq_ignore_key_order(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Document(a), Value::Document(b)) => a.eq_ignore_key_order(b),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.eq_ignore_key_order(y))
            }
            (
                Value::JavaScriptWithScope { code: ca, scope: sa },
                Value::JavaScriptWithScope { code: cb, scope: sb },
            ) => ca == cb && sa.eq_ignore_key_order(sb),
            _ => self == other,
        }
    }
}

// ----------------------------------------------------------------
// Conversions
//
// Integer literals pick the narrowest of int32/int64 that losslessly
// represents the value: i32-or-smaller sources always produce `Int32`;
// i64 sources produce `Int32` when the value fits the signed 32-bit
// range, else `Int64`.

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        if v >= i32::MIN as i64 && v <= i32::MAX as i64 {
            Value::Int32(v as i32)
        } else {
            Value::Int64(v)
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        if v <= i32::MAX as u32 {
            Value::Int32(v as i32)
        } else {
            Value::Int64(v as i64)
        }
    }
}

/// On 64-bit platforms `isize` follows the widening rule; on 32-bit
/// platforms it is always `Int32`.
#[cfg(target_pointer_width = "64")]
impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::from(v as i64)
    }
}

#[cfg(target_pointer_width = "32")]
impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<Binary> for Value {
    fn from(v: Binary) -> Self {
        Value::Binary(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Value::ObjectId(v)
    }
}

impl From<Regex> for Value {
    fn from(v: Regex) -> Self {
        Value::Regex(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Decimal128> for Value {
    fn from(v: Decimal128) -> Self {
        Value::Decimal128(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Document(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}
