//! BSON document encoder.
//!
//! BSON is a little-endian binary format. All multi-byte integers are
//! written in little-endian byte order.

use bson_buffers::Writer;

use crate::document::Document;
use crate::value::Value;

/// Encodes a [`Document`] to bytes.
///
/// Encoding is total: every document produces exactly one byte sequence.
/// The top-level must always be a document; BSON has no scalar top-level
/// encoding.
pub struct DocumentEncoder;

impl Default for DocumentEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes a document to bytes.
    pub fn encode(&self, doc: &Document) -> Vec<u8> {
        let mut writer = Writer::new();
        self.write_document(&mut writer, doc);
        writer.flush()
    }

    fn write_document(&self, writer: &mut Writer, doc: &Document) {
        let size_at = writer.x;
        writer.move_cursor(4); // length slot, patched below
        for (key, value) in doc.iter() {
            self.write_element(writer, key, value);
        }
        writer.u8(0); // terminating null byte
        writer.patch_i32(size_at, (writer.x - size_at) as i32);
    }

    fn write_array(&self, writer: &mut Writer, values: &[Value]) {
        let size_at = writer.x;
        writer.move_cursor(4);
        // An array is a document with decimal index keys.
        for (i, value) in values.iter().enumerate() {
            self.write_element(writer, &i.to_string(), value);
        }
        writer.u8(0);
        writer.patch_i32(size_at, (writer.x - size_at) as i32);
    }

    fn write_element(&self, writer: &mut Writer, key: &str, value: &Value) {
        writer.u8(value.element_type() as u8);
        self.write_cstring(writer, key);
        match value {
            Value::Double(f) => writer.f64(*f),
            Value::String(s) => self.write_string(writer, s),
            Value::Document(doc) => self.write_document(writer, doc),
            Value::Array(values) => self.write_array(writer, values),
            Value::Binary(bin) => {
                writer.i32(bin.data.len() as i32);
                writer.u8(bin.subtype.into());
                writer.buf(&bin.data);
            }
            Value::ObjectId(id) => writer.buf(&id.to_bytes()),
            Value::Boolean(b) => writer.u8(if *b { 1 } else { 0 }),
            Value::DateTime(ms) => writer.i64(*ms),
            Value::Null => {}
            Value::Regex(re) => {
                self.write_cstring(writer, re.pattern());
                self.write_cstring(writer, re.options());
            }
            Value::JavaScript(code) => self.write_string(writer, code),
            Value::JavaScriptWithScope { code, scope } => {
                let size_at = writer.x;
                writer.move_cursor(4); // total length slot
                self.write_string(writer, code);
                self.write_document(writer, scope);
                writer.patch_i32(size_at, (writer.x - size_at) as i32);
            }
            Value::Int32(i) => writer.i32(*i),
            Value::Timestamp(ts) => {
                writer.u32(ts.increment);
                writer.u32(ts.time);
            }
            Value::Int64(i) => writer.i64(*i),
            Value::Decimal128(dec) => writer.buf(&dec.bytes()),
            Value::MinKey | Value::MaxKey => {}
        }
    }

    /// Writes a null-terminated C-string. Stops at any null byte in the
    /// input.
    fn write_cstring(&self, writer: &mut Writer, s: &str) {
        for byte in s.bytes() {
            if byte == 0 {
                break;
            }
            writer.u8(byte);
        }
        writer.u8(0); // null terminator
    }

    /// Writes a length-prefixed string: little-endian i32 (byte count + 1),
    /// UTF-8 bytes, null byte.
    fn write_string(&self, writer: &mut Writer, s: &str) {
        writer.i32(s.len() as i32 + 1); // +1 for null terminator
        writer.utf8(s);
        writer.u8(0);
    }
}
