// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value type system for document fields
//!
//! Documents coming back from the store are schema-less: the same field may
//! hold a string in one document and a number in the next. [`DocValue`] tags
//! every value with its kind so the text coercion applied when building
//! frames is a plain match over the variants.

use bson::Bson;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Store-native unique identifier (12 bytes, rendered as 24 hex characters)
pub use bson::oid::ObjectId;

/// Error raised when JSON input is not valid extended JSON
pub type ExtendedJsonError = bson::extjson::de::Error;

/// A single field value as returned by the store
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    Null,
    String(String),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    ObjectId(ObjectId),
    Array(Vec<DocValue>),
    Document(Document),
    /// Store types with no dedicated variant (binary, regex, decimal, ...),
    /// already rendered by the driver
    Other(String),
}

impl DocValue {
    /// Coerce the value to its canonical text form.
    ///
    /// ObjectIds become their hex form; everything else uses its default
    /// textual representation (see the `Display` impl). Re-applying the
    /// coercion to its own output yields the same text.
    pub fn to_text(&self) -> String {
        match self {
            DocValue::ObjectId(id) => id.to_hex(),
            DocValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// JSON rendering used for values nested inside arrays and documents
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DocValue::Null => serde_json::Value::Null,
            DocValue::String(s) => serde_json::Value::String(s.clone()),
            DocValue::Int32(n) => serde_json::json!(n),
            DocValue::Int64(n) => serde_json::json!(n),
            DocValue::Double(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(n.to_string())),
            DocValue::Boolean(b) => serde_json::Value::Bool(*b),
            DocValue::DateTime(dt) => serde_json::Value::String(format_datetime(dt)),
            DocValue::ObjectId(id) => serde_json::Value::String(id.to_hex()),
            DocValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(DocValue::to_json).collect())
            }
            DocValue::Document(doc) => serde_json::Value::Object(
                doc.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            DocValue::Other(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Numeric view used for loose equality between integer and float kinds
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocValue::Int32(n) => Some(f64::from(*n)),
            DocValue::Int64(n) => Some(*n as f64),
            DocValue::Double(n) => Some(*n),
            _ => None,
        }
    }
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for DocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocValue::Null => write!(f, "null"),
            DocValue::String(s) => write!(f, "{}", s),
            DocValue::Int32(n) => write!(f, "{}", n),
            DocValue::Int64(n) => write!(f, "{}", n),
            DocValue::Double(n) => write!(f, "{}", n),
            DocValue::Boolean(b) => write!(f, "{}", b),
            DocValue::DateTime(dt) => write!(f, "{}", format_datetime(dt)),
            DocValue::ObjectId(id) => write!(f, "{}", id),
            DocValue::Array(_) | DocValue::Document(_) => write!(f, "{}", self.to_json()),
            DocValue::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

impl From<i32> for DocValue {
    fn from(n: i32) -> Self {
        DocValue::Int32(n)
    }
}

impl From<i64> for DocValue {
    fn from(n: i64) -> Self {
        DocValue::Int64(n)
    }
}

impl From<f64> for DocValue {
    fn from(n: f64) -> Self {
        DocValue::Double(n)
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        DocValue::Boolean(b)
    }
}

impl From<ObjectId> for DocValue {
    fn from(id: ObjectId) -> Self {
        DocValue::ObjectId(id)
    }
}

impl From<DateTime<Utc>> for DocValue {
    fn from(dt: DateTime<Utc>) -> Self {
        DocValue::DateTime(dt)
    }
}

impl From<Document> for DocValue {
    fn from(doc: Document) -> Self {
        DocValue::Document(doc)
    }
}

impl From<Vec<DocValue>> for DocValue {
    fn from(items: Vec<DocValue>) -> Self {
        DocValue::Array(items)
    }
}

impl From<Bson> for DocValue {
    fn from(value: Bson) -> Self {
        match value {
            Bson::Null | Bson::Undefined => DocValue::Null,
            Bson::String(s) => DocValue::String(s),
            Bson::Int32(n) => DocValue::Int32(n),
            Bson::Int64(n) => DocValue::Int64(n),
            Bson::Double(n) => DocValue::Double(n),
            Bson::Boolean(b) => DocValue::Boolean(b),
            Bson::DateTime(dt) => DocValue::DateTime(dt.to_chrono()),
            Bson::ObjectId(id) => DocValue::ObjectId(id),
            Bson::Array(items) => DocValue::Array(items.into_iter().map(DocValue::from).collect()),
            Bson::Document(doc) => DocValue::Document(Document::from(doc)),
            other => DocValue::Other(other.to_string()),
        }
    }
}

/// Read JSON as MongoDB extended JSON (`$oid`, `$date`, `$numberLong`, ...)
impl TryFrom<serde_json::Value> for DocValue {
    type Error = ExtendedJsonError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Bson::try_from(value).map(DocValue::from)
    }
}

/// A schema-less document: field name to value.
///
/// Field order is not significant; iteration is by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, DocValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a JSON object read as extended JSON
    pub fn from_json_object(
        map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ExtendedJsonError> {
        bson::Document::try_from(map).map(Document::from)
    }

    /// Insert a field, returning the previous value if any
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DocValue>,
    ) -> Option<DocValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DocValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<bson::Document> for Document {
    fn from(doc: bson::Document) -> Self {
        doc.into_iter()
            .map(|(key, value)| (key, DocValue::from(value)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<DocValue>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
