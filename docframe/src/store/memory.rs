// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory document store for testing
//!
//! Collections live in process memory and preserve insertion order. Filters
//! support plain equality plus the comparison operators `$eq`, `$ne`, `$gt`,
//! `$gte`, `$lt`, `$lte`, `$in` and `$exists`; anything else is rejected the
//! way a real store rejects an unknown operator.
//!
//! Failure switches let tests exercise every error path of the pipeline.

use super::traits::{DocumentStore, StoreConnection};
use super::types::{StoreError, StoreResult};
use super::value::{DocValue, Document};
use crate::query::Filter;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

type Collections = HashMap<String, HashMap<String, Vec<Document>>>;

/// Failure and latency switches shared by the store and its connections
#[derive(Debug, Default, Clone)]
struct Behavior {
    unreachable: bool,
    unresponsive: bool,
    read_failure: bool,
    latency: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    data: RwLock<Collections>,
    behavior: RwLock<Behavior>,
    connects: AtomicUsize,
    open: AtomicUsize,
}

/// In-memory document store
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection (a no-op if it already exists)
    pub fn create_collection(&self, database: &str, collection: &str) {
        self.shared
            .data
            .write()
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default();
    }

    /// Append documents to a collection, creating it if needed
    pub fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: impl IntoIterator<Item = Document>,
    ) {
        self.shared
            .data
            .write()
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    /// Append documents written as extended JSON: one object or an array of
    /// objects. Nothing is inserted when any of them is invalid.
    pub fn insert_json(
        &self,
        database: &str,
        collection: &str,
        documents: serde_json::Value,
    ) -> StoreResult<()> {
        let values = match documents {
            serde_json::Value::Array(items) => items,
            single => vec![single],
        };
        let docs = values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::Object(map) => Document::from_json_object(map)
                    .map_err(|e| StoreError::Rejected(format!("invalid document: {}", e))),
                other => Err(StoreError::Rejected(format!("not a document: {}", other))),
            })
            .collect::<StoreResult<Vec<_>>>()?;
        self.insert_many(database, collection, docs);
        Ok(())
    }

    /// Make `connect` fail
    pub fn set_unreachable(&self, value: bool) {
        self.shared.behavior.write().unreachable = value;
    }

    /// Make `ping` fail on every connection
    pub fn set_unresponsive(&self, value: bool) {
        self.shared.behavior.write().unresponsive = value;
    }

    /// Make cursor draining fail after the query is accepted
    pub fn set_read_failure(&self, value: bool) {
        self.shared.behavior.write().read_failure = value;
    }

    /// Delay every network step by `latency`
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.shared.behavior.write().latency = latency;
    }

    /// Total number of successful `connect` calls
    pub fn connect_count(&self) -> usize {
        self.shared.connects.load(AtomicOrdering::SeqCst)
    }

    /// Number of connections not yet closed or dropped
    pub fn open_connections(&self) -> usize {
        self.shared.open.load(AtomicOrdering::SeqCst)
    }

    fn behavior(&self) -> Behavior {
        self.shared.behavior.read().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self, uri: &str) -> StoreResult<Box<dyn StoreConnection>> {
        let behavior = self.behavior();
        if let Some(latency) = behavior.latency {
            tokio::time::sleep(latency).await;
        }
        if behavior.unreachable {
            return Err(StoreError::Connect(format!("server at {} is unreachable", uri)));
        }

        self.shared.connects.fetch_add(1, AtomicOrdering::SeqCst);
        self.shared.open.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(Box::new(MemoryConnection {
            store: self.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Connection handle into a [`MemoryStore`]
pub struct MemoryConnection {
    store: MemoryStore,
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.store.shared.open.fetch_sub(1, AtomicOrdering::SeqCst);
    }
}

#[async_trait]
impl StoreConnection for MemoryConnection {
    async fn ping(&self) -> StoreResult<()> {
        let behavior = self.store.behavior();
        if let Some(latency) = behavior.latency {
            tokio::time::sleep(latency).await;
        }
        if behavior.unresponsive {
            return Err(StoreError::Ping("server selection timeout".to_string()));
        }
        Ok(())
    }

    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Vec<Document>> {
        let behavior = self.store.behavior();
        if let Some(latency) = behavior.latency {
            tokio::time::sleep(latency).await;
        }

        let matches = {
            let data = self.store.shared.data.read();
            let documents = data
                .get(database)
                .and_then(|collections| collections.get(collection))
                .ok_or_else(|| {
                    StoreError::Rejected(format!("ns not found: {}.{}", database, collection))
                })?;

            let mut matches = Vec::new();
            for document in documents {
                if matches_filter(document, filter)? {
                    matches.push(document.clone());
                }
            }
            matches
        };

        if behavior.read_failure {
            return Err(StoreError::Read("connection reset while reading batch".to_string()));
        }
        Ok(matches)
    }

    async fn close(self: Box<Self>) {}
}

fn matches_filter(document: &Document, filter: &Filter) -> StoreResult<bool> {
    for (field, criterion) in filter {
        if !matches_criterion(document.get(field), criterion)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_criterion(
    actual: Option<&DocValue>,
    criterion: &serde_json::Value,
) -> StoreResult<bool> {
    let operators = match operand_value(criterion)? {
        DocValue::Document(doc) if doc.keys().any(|k| k.starts_with('$')) => doc,
        expected => return Ok(loosely_equal(actual, &expected)),
    };

    for (operator, expected) in operators.iter() {
        let ok = match operator.as_str() {
            "$eq" => loosely_equal(actual, expected),
            "$ne" => !loosely_equal(actual, expected),
            "$gt" => compare(actual, expected) == Some(Ordering::Greater),
            "$gte" => matches!(
                compare(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            "$lt" => compare(actual, expected) == Some(Ordering::Less),
            "$lte" => matches!(
                compare(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            "$in" => match expected {
                DocValue::Array(items) => items.iter().any(|item| loosely_equal(actual, item)),
                _ => return Err(StoreError::Rejected("$in needs an array".to_string())),
            },
            "$exists" => actual.is_some() == is_truthy(expected),
            unknown => {
                return Err(StoreError::Rejected(format!(
                    "unknown operator: {}",
                    unknown
                )))
            }
        };
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Read a filter value as extended JSON, the way the MongoDB driver does
fn operand_value(operand: &serde_json::Value) -> StoreResult<DocValue> {
    DocValue::try_from(operand.clone()).map_err(|e| StoreError::InvalidFilter(e.to_string()))
}

/// MongoDB truthiness: false, null and numeric zero are falsy
fn is_truthy(value: &DocValue) -> bool {
    match value {
        DocValue::Null | DocValue::Boolean(false) => false,
        other => other.as_f64().map_or(true, |n| n != 0.0),
    }
}

fn loosely_equal(actual: Option<&DocValue>, expected: &DocValue) -> bool {
    match actual {
        // A missing field matches null, as in MongoDB
        None => *expected == DocValue::Null,
        Some(value) => match (value.as_f64(), expected.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => value == expected,
        },
    }
}

fn compare(actual: Option<&DocValue>, expected: &DocValue) -> Option<Ordering> {
    let actual = actual?;
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (actual, expected) {
            (DocValue::String(a), DocValue::String(b)) => Some(a.cmp(b)),
            (DocValue::DateTime(a), DocValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        },
    }
}
