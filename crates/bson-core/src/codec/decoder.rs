//! BSON document decoder.
//!
//! BSON is a little-endian binary format.

use bson_buffers::Reader;
use indexmap::IndexMap;

use super::error::ParseError;
use crate::document::Document;
use crate::value::{Binary, BinarySubtype, Decimal128, ObjectId, Regex, Timestamp, Value};

/// BSON document decoder.
///
/// [`DocumentDecoder::new`] validates everything the wire format promises:
/// length consistency, the trailing terminator, key uniqueness per
/// document level, known type tags, and UUID payload sizes.
/// [`DocumentDecoder::trusted`] skips the semantic checks for buffers
/// already known to be well-formed (e.g. re-decoding internally produced
/// output); it still never reads out of bounds, but its behavior on
/// malformed input is unspecified beyond returning *some* error.
pub struct DocumentDecoder {
    validate: bool,
}

impl Default for DocumentDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentDecoder {
    /// A fully validating decoder.
    pub fn new() -> Self {
        Self { validate: true }
    }

    /// The non-validating fast path. Callers must not route untrusted
    /// input through it.
    pub fn trusted() -> Self {
        Self { validate: false }
    }

    /// Decodes an encoded document, returning an error on malformed input.
    pub fn decode(&self, data: &[u8]) -> Result<Document, ParseError> {
        if self.validate {
            if data.len() < 5 {
                return Err(ParseError::TooShort(data.len()));
            }
            let declared = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
            if declared < 0 || declared as usize != data.len() {
                return Err(ParseError::LengthMismatch {
                    declared: declared.max(0) as usize,
                    actual: data.len(),
                });
            }
            if data[data.len() - 1] != 0 {
                return Err(ParseError::MissingTerminator);
            }
        }
        let mut reader = Reader::new(data);
        let fields = self.read_document_fields(&mut reader)?;
        Ok(Document::from_parts(fields, Some(data.to_vec())))
    }

    /// Reads one document body: length prefix, elements, terminator.
    /// Returns the elements in encounter order.
    fn read_elements(&self, reader: &mut Reader) -> Result<Vec<(String, Value)>, ParseError> {
        let declared = reader.try_i32()?;
        if declared < 5 {
            return Err(ParseError::TooShort(declared.max(0) as usize));
        }
        let start = reader.x;
        let body = declared as usize - 4; // element bytes plus terminator
        if start + body > reader.end {
            return Err(ParseError::UnexpectedEof);
        }
        let end = start + body - 1; // terminator position
        let mut elements: Vec<(String, Value)> = Vec::new();

        while reader.x < end {
            let tag = reader.try_u8()?;
            if tag == 0 {
                // Terminator before the declared end: the content is
                // shorter than the length prefix claims.
                if self.validate {
                    return Err(ParseError::LengthMismatch {
                        declared: declared as usize,
                        actual: reader.x - start + 4,
                    });
                }
                break;
            }
            let key = reader.try_cstring()?.to_owned();
            let value = self.read_element_value(tag, reader)?;
            elements.push((key, value));
        }

        if self.validate {
            if reader.x != end {
                // The last element's payload overran into the terminator.
                return Err(ParseError::UnexpectedEof);
            }
            if reader.try_u8()? != 0 {
                return Err(ParseError::MissingTerminator);
            }
        } else {
            // Skip to end of document (including terminator).
            reader.x = end + 1;
        }

        Ok(elements)
    }

    fn read_document_fields(
        &self,
        reader: &mut Reader,
    ) -> Result<IndexMap<String, Value>, ParseError> {
        let elements = self.read_elements(reader)?;
        let mut fields = IndexMap::with_capacity(elements.len());
        for (key, value) in elements {
            if fields.insert(key.clone(), value).is_some() && self.validate {
                return Err(ParseError::DuplicateKey(key));
            }
        }
        Ok(fields)
    }

    fn read_element_value(&self, tag: u8, reader: &mut Reader) -> Result<Value, ParseError> {
        match tag {
            0x01 => Ok(Value::Double(reader.try_f64()?)),
            0x02 => Ok(Value::String(self.read_string(reader)?)),
            0x03 => {
                let fields = self.read_document_fields(reader)?;
                Ok(Value::Document(Document::from_parts(fields, None)))
            }
            0x04 => Ok(Value::Array(self.read_array(reader)?)),
            0x05 => self.read_binary(reader),
            0x07 => {
                let mut bytes = [0u8; 12];
                bytes.copy_from_slice(reader.try_buf(12)?);
                Ok(Value::ObjectId(ObjectId::from_bytes(bytes)))
            }
            0x08 => Ok(Value::Boolean(reader.try_u8()? == 1)),
            0x09 => Ok(Value::DateTime(reader.try_i64()?)),
            0x0a => Ok(Value::Null),
            0x0b => {
                let pattern = reader.try_cstring()?.to_owned();
                let options = reader.try_cstring()?.to_owned();
                Ok(Value::Regex(Regex::from_parts(pattern, options)))
            }
            0x0d => Ok(Value::JavaScript(self.read_string(reader)?)),
            0x0f => self.read_code_with_scope(reader),
            0x10 => Ok(Value::Int32(reader.try_i32()?)),
            0x11 => {
                // Increment is written first, then the seconds.
                let increment = reader.try_u32()?;
                let time = reader.try_u32()?;
                Ok(Value::Timestamp(Timestamp { time, increment }))
            }
            0x12 => Ok(Value::Int64(reader.try_i64()?)),
            0x13 => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(reader.try_buf(16)?);
                Ok(Value::Decimal128(Decimal128::from_bytes(bytes)))
            }
            0xff => Ok(Value::MinKey),
            0x7f => Ok(Value::MaxKey),
            t => Err(ParseError::UnsupportedType(t)),
        }
    }

    /// A length-prefixed string: i32 byte count (including the trailing
    /// null), UTF-8 bytes, null byte.
    fn read_string(&self, reader: &mut Reader) -> Result<String, ParseError> {
        let length = reader.try_i32()?;
        if length < 1 {
            return Err(ParseError::UnexpectedEof);
        }
        let s = reader.try_utf8(length as usize - 1)?.to_owned();
        let terminator = reader.try_u8()?;
        if self.validate && terminator != 0 {
            return Err(ParseError::MissingTerminator);
        }
        Ok(s)
    }

    fn read_array(&self, reader: &mut Reader) -> Result<Vec<Value>, ParseError> {
        let elements = self.read_elements(reader)?;
        // Keys are the decimal indexes; sort by numeric key and extract
        // the values.
        let mut indexed: Vec<(usize, Value)> = elements
            .into_iter()
            .map(|(k, v)| (k.parse::<usize>().unwrap_or(0), v))
            .collect();
        indexed.sort_by_key(|(i, _)| *i);
        Ok(indexed.into_iter().map(|(_, v)| v).collect())
    }

    fn read_binary(&self, reader: &mut Reader) -> Result<Value, ParseError> {
        let length = reader.try_i32()?;
        if length < 0 {
            return Err(ParseError::UnexpectedEof);
        }
        let subtype_byte = reader.try_u8()?;
        let data = reader.try_buf(length as usize)?.to_vec();
        let subtype = BinarySubtype::from(subtype_byte);
        if self.validate && subtype.is_uuid() && data.len() != 16 {
            return Err(ParseError::InvalidBinaryLength {
                subtype: subtype_byte,
                len: data.len(),
            });
        }
        Ok(Value::Binary(Binary { subtype, data }))
    }

    fn read_code_with_scope(&self, reader: &mut Reader) -> Result<Value, ParseError> {
        let _total_len = reader.try_i32()?; // code string + scope document
        let code = self.read_string(reader)?;
        let scope = Document::from_parts(self.read_document_fields(reader)?, None);
        Ok(Value::JavaScriptWithScope { code, scope })
    }
}
