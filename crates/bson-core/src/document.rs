//! The copy-on-write BSON document.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::codec::{DocumentDecoder, DocumentEncoder, ParseError};
use crate::value::{Binary, ObjectId, Value};

/// An insertion-ordered mapping from string keys to [`Value`]s.
///
/// Cloning a `Document` is O(1): clones share the underlying storage until
/// one of them is mutated, at which point the mutating side copies the
/// storage first (`Arc::make_mut`). An unmutated clone never observes a
/// change made through another handle.
///
/// A document parsed from bytes keeps the encoded buffer around;
/// [`Document::to_bytes`] returns it verbatim until the first mutation.
#[derive(Clone)]
pub struct Document {
    repr: Arc<Repr>,
}

#[derive(Clone)]
struct Repr {
    fields: IndexMap<String, Value>,
    /// Encoded form this document was constructed from. Dropped on first
    /// mutation.
    raw: Option<Vec<u8>>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Document {
        Document {
            repr: Arc::new(Repr {
                fields: IndexMap::new(),
                raw: None,
            }),
        }
    }

    pub(crate) fn from_parts(fields: IndexMap<String, Value>, raw: Option<Vec<u8>>) -> Document {
        Document {
            repr: Arc::new(Repr { fields, raw }),
        }
    }

    /// Parses and validates an encoded document.
    pub fn from_bytes(data: &[u8]) -> Result<Document, ParseError> {
        DocumentDecoder::new().decode(data)
    }

    /// Parses an encoded document known to be well-formed, skipping
    /// semantic validation (duplicate keys, declared-length equality,
    /// UUID payload sizes). Callers must not route untrusted input through
    /// this path.
    pub fn from_bytes_trusted(data: &[u8]) -> Result<Document, ParseError> {
        DocumentDecoder::trusted().decode(data)
    }

    /// Encodes this document. Returns the buffer the document was parsed
    /// from when no mutation has happened since, otherwise encodes fresh.
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.repr.raw {
            Some(raw) => raw.clone(),
            None => DocumentEncoder::new().encode(self),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.repr.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repr.fields.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.repr.fields.contains_key(key)
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.repr.fields.get(key)
    }

    /// Looks up a value by key, falling back to `default` when the key is
    /// absent. Does not insert.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Value::as_i32)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_document(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(Value::as_document)
    }

    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn get_binary(&self, key: &str) -> Option<&Binary> {
        self.get(key).and_then(Value::as_binary)
    }

    pub fn get_object_id(&self, key: &str) -> Option<&ObjectId> {
        self.get(key).and_then(Value::as_object_id)
    }

    pub fn get_datetime(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_datetime)
    }

    /// The single mutation point: clones the storage when it is shared and
    /// invalidates the cached encoded buffer.
    fn make_mut(&mut self) -> &mut IndexMap<String, Value> {
        let repr = Arc::make_mut(&mut self.repr);
        repr.raw = None;
        &mut repr.fields
    }

    /// Inserts or replaces a value. A new key is appended at the end of
    /// the order; an existing key keeps its order slot, and its value may
    /// change variant freely.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.make_mut().insert(key.into(), value.into());
    }

    /// Removes a key, preserving the order of the remaining keys. A no-op
    /// returning `None` when the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if !self.contains_key(key) {
            // Avoid cloning shared storage for a no-op.
            return None;
        }
        self.make_mut().shift_remove(key)
    }

    /// `set` when `value` is `Some`, `remove` when `None`.
    pub fn set_or_remove(&mut self, key: impl Into<String>, value: Option<Value>) {
        let key = key.into();
        match value {
            Some(value) => self.set(key, value),
            None => {
                self.remove(&key);
            }
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.repr.fields.keys().map(String::as_str)
    }

    /// Values in insertion order, parallel to [`Document::keys`].
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.repr.fields.values()
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.repr.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Equality of key sets and values regardless of key order. Nested
    /// documents compare the same way; array element order stays
    /// significant.
    pub fn eq_ignore_key_order(&self, other: &Document) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_some_and(|o| value.eq_ignore_key_order(o))
            })
    }

    /// Returns this document unchanged when it already contains an `_id`
    /// key; otherwise returns a new document with a freshly generated
    /// [`ObjectId`] inserted as the first key, all existing keys following
    /// in their original order. Idempotent.
    pub fn with_id(&self) -> Document {
        if self.contains_key("_id") {
            return self.clone();
        }
        let mut fields = IndexMap::with_capacity(self.len() + 1);
        fields.insert("_id".to_owned(), Value::ObjectId(ObjectId::new()));
        for (key, value) in self.iter() {
            fields.insert(key.to_owned(), value.clone());
        }
        Document::from_parts(fields, None)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Key order is significant: two documents are equal only when their keys
/// appear in the same order with equal values. Use
/// [`Document::eq_ignore_key_order`] for set-wise comparison.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.repr, &other.repr) {
            return true;
        }
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    /// The first occurrence of a key claims the order slot; a later
    /// occurrence overwrites the value in place.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Document {
        let mut fields = IndexMap::new();
        for (key, value) in iter {
            fields.insert(key.into(), value.into());
        }
        Document::from_parts(fields, None)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.repr.fields.iter()
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        match Arc::try_unwrap(self.repr) {
            Ok(repr) => repr.fields.into_iter(),
            Err(arc) => arc.fields.clone().into_iter(),
        }
    }
}
