//! # Schemaless documents
//!
//! The remote database stores **documents**: a backend-generated key plus a flexible
//! map of typed fields. Documents are grouped into named **collections**. Nothing in
//! this module knows which fields a collection is supposed to hold; that is the job of
//! [`crate::models`].
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Document`] | One stored record: its `id` (last segment of the backend resource name) and its fields. |
//! | [`FieldValue`] | One typed field value, mirroring the value kinds the backend distinguishes on the wire. |
//!
//! Integers and doubles are separate kinds. A field written as `17.0` is a
//! [`FieldValue::Double`] and never compares equal to `FieldValue::Integer(17)`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → value, ordered by name.
pub type Fields = BTreeMap<String, FieldValue>;

/// A typed document field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    /// RFC 3339 timestamp text, kept verbatim.
    Timestamp(String),
    /// Base64 text, kept verbatim.
    Bytes(String),
    /// Full resource name of another document.
    Reference(String),
    GeoPoint { latitude: f64, longitude: f64 },
    Array(Vec<FieldValue>),
    Map(Fields),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// A record stored in a collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Backend key, unique within the collection.
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a single field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Build a [`Fields`] map from `(name, value)` pairs.
pub fn fields<I, K, V>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_double_are_distinct() {
        assert_ne!(FieldValue::Integer(17), FieldValue::Double(17.0));
        assert_eq!(FieldValue::Double(17.0).as_integer(), None);
        assert_eq!(FieldValue::Integer(17).as_integer(), Some(17));
    }

    #[test]
    fn test_field_lookup() {
        let doc = Document::new("abc", fields([("username", "a")]));
        assert_eq!(doc.field("username").and_then(FieldValue::as_str), Some("a"));
        assert!(doc.field("email").is_none());
    }
}
