//! # Firestore REST wire format
//!
//! Firestore's v1 REST API encodes every field as a single-key object naming its
//! kind, e.g. `{"stringValue": "a"}` or `{"integerValue": "17"}`. 64-bit integers
//! travel as decimal strings; doubles may arrive as the strings `"NaN"`,
//! `"Infinity"` or `"-Infinity"`.
//!
//! | Type | JSON |
//! |------|------|
//! | [`WireValue`] | One typed value. Converts to and from [`store::FieldValue`]. |
//! | [`WireDocument`] | `{name, fields, createTime, updateTime}`; `name` is the full resource path, whose last segment is the document key. |
//! | [`ListDocumentsResponse`] | `{documents, nextPageToken}` from `GET .../documents/{collection}`. |
//! | [`WriteDocument`] | `{fields}` body sent when creating a document. |
//! | [`ErrorResponse`] | `{error: {code, message, status}}` on any non-2xx reply. |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use store::{Document, FieldValue, Fields, StoreError};

pub type WireFields = BTreeMap<String, WireValue>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "integerValue", with = "int64_text")]
    Integer(i64),
    #[serde(rename = "doubleValue", with = "double_text")]
    Double(f64),
    #[serde(rename = "timestampValue")]
    Timestamp(String),
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "bytesValue")]
    Bytes(String),
    #[serde(rename = "referenceValue")]
    Reference(String),
    #[serde(rename = "geoPointValue")]
    GeoPoint(LatLng),
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
    #[serde(rename = "mapValue")]
    Map(MapValue),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<WireValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: WireFields,
}

impl From<&FieldValue> for WireValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => Self::Null(()),
            FieldValue::Boolean(b) => Self::Boolean(*b),
            FieldValue::Integer(n) => Self::Integer(*n),
            FieldValue::Double(d) => Self::Double(*d),
            FieldValue::String(s) => Self::String(s.clone()),
            FieldValue::Timestamp(t) => Self::Timestamp(t.clone()),
            FieldValue::Bytes(b) => Self::Bytes(b.clone()),
            FieldValue::Reference(r) => Self::Reference(r.clone()),
            FieldValue::GeoPoint {
                latitude,
                longitude,
            } => Self::GeoPoint(LatLng {
                latitude: *latitude,
                longitude: *longitude,
            }),
            FieldValue::Array(values) => Self::Array(ArrayValue {
                values: values.iter().map(Self::from).collect(),
            }),
            FieldValue::Map(fields) => Self::Map(MapValue {
                fields: to_wire_fields(fields),
            }),
        }
    }
}

impl From<WireValue> for FieldValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Null(()) => Self::Null,
            WireValue::Boolean(b) => Self::Boolean(b),
            WireValue::Integer(n) => Self::Integer(n),
            WireValue::Double(d) => Self::Double(d),
            WireValue::Timestamp(t) => Self::Timestamp(t),
            WireValue::String(s) => Self::String(s),
            WireValue::Bytes(b) => Self::Bytes(b),
            WireValue::Reference(r) => Self::Reference(r),
            WireValue::GeoPoint(p) => Self::GeoPoint {
                latitude: p.latitude,
                longitude: p.longitude,
            },
            WireValue::Array(a) => Self::Array(a.values.into_iter().map(Self::from).collect()),
            WireValue::Map(m) => Self::Map(from_wire_fields(m.fields)),
        }
    }
}

pub fn to_wire_fields(fields: &Fields) -> WireFields {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), WireValue::from(v)))
        .collect()
}

pub fn from_wire_fields(fields: WireFields) -> Fields {
    fields
        .into_iter()
        .map(|(k, v)| (k, FieldValue::from(v)))
        .collect()
}

/// A document as returned by the REST API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    /// `projects/{p}/databases/{d}/documents/{collection}/{id}`
    pub name: String,
    #[serde(default)]
    pub fields: WireFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl WireDocument {
    pub fn into_document(self) -> Document {
        Document::new(document_id(&self.name), from_wire_fields(self.fields))
    }
}

/// Last path segment of a resource name.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<WireDocument>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl ListDocumentsResponse {
    /// Token for the following page, if there is one.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WriteDocument {
    pub fields: WireFields,
}

impl WriteDocument {
    pub fn new(fields: &Fields) -> Self {
        Self {
            fields: to_wire_fields(fields),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Turn a non-2xx reply into a [`StoreError::Status`].
pub fn status_error(code: u16, body: &str) -> StoreError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) if resp.error.status.is_empty() => resp.error.message,
        Ok(resp) => format!("{}: {}", resp.error.status, resp.error.message),
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    StoreError::Status { code, message }
}

mod int64_text {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

mod double_text {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::custom(format!("invalid double {other:?}"))),
            },
        }
    }
}
