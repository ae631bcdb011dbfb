// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-query payload decoding

use super::sanitizer::strip_comments;
use crate::exec::QueryError;
use serde::Deserialize;

/// A decoded filter expression: field name to match criteria.
///
/// MongoDB extended JSON (`{"$oid": ...}`, `{"$date": ...}`) is accepted and
/// interpreted by the store driver.
pub type Filter = serde_json::Map<String, serde_json::Value>;

/// Wire shape of a query as sent by the query editor
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryModel {
    query_text: Option<String>,
    database: Option<String>,
    collection: Option<String>,
}

/// What to run and where: the sanitized filter text plus its target collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    filter_text: String,
    database: String,
    collection: String,
}

impl QueryDescriptor {
    /// Build a descriptor from raw (possibly commented) query text
    pub fn new(
        query_text: &str,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            filter_text: strip_comments(query_text),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Filter text with comments removed
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Decode the filter text as a JSON object.
    ///
    /// Anything other than an object, including blank text, is a
    /// [`QueryError::MalformedFilter`].
    pub fn decode_filter(&self) -> Result<Filter, QueryError> {
        serde_json::from_str::<Filter>(&self.filter_text)
            .map_err(|e| QueryError::MalformedFilter(e.to_string()))
    }
}

/// Decode a per-query JSON payload (`queryText`, `database`, `collection`).
///
/// Missing or null fields default to empty strings; unknown fields are ignored.
pub fn decode_query(payload: &[u8]) -> Result<QueryDescriptor, QueryError> {
    let model: QueryModel =
        serde_json::from_slice(payload).map_err(|e| QueryError::MalformedQuery(e.to_string()))?;

    Ok(QueryDescriptor::new(
        model.query_text.as_deref().unwrap_or_default(),
        model.database.unwrap_or_default(),
        model.collection.unwrap_or_default(),
    ))
}
