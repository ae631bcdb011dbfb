// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! MongoDB driver implementation

use super::traits::{DocumentStore, StoreConnection};
use super::types::{StoreError, StoreResult};
use super::value::Document;
use crate::query::Filter;
use async_trait::async_trait;
use bson::{doc, Bson};
use futures_util::TryStreamExt;
use mongodb::Client;

/// Document store backed by the official MongoDB driver
#[derive(Debug, Default, Clone, Copy)]
pub struct MongoStore;

impl MongoStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn connect(&self, uri: &str) -> StoreResult<Box<dyn StoreConnection>> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        Ok(Box::new(MongoConnection { client }))
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}

/// A MongoDB client used for a single connection slot
pub struct MongoConnection {
    client: Client,
}

#[async_trait]
impl StoreConnection for MongoConnection {
    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Ping(e.to_string()))
    }

    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Vec<Document>> {
        let filter = filter_to_bson(filter)?;
        let cursor = self
            .client
            .database(database)
            .collection::<bson::Document>(collection)
            .find(filter)
            .await
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let raw: Vec<bson::Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        log::debug!(
            "mongodb: {}.{} returned {} documents",
            database,
            collection,
            raw.len()
        );
        Ok(raw.into_iter().map(Document::from).collect())
    }

    async fn close(self: Box<Self>) {
        self.client.shutdown().await;
    }
}

/// Interpret the filter as MongoDB extended JSON
fn filter_to_bson(filter: &Filter) -> StoreResult<bson::Document> {
    let value = serde_json::Value::Object(filter.clone());
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(StoreError::InvalidFilter(format!(
            "expected a document, got {}",
            other
        ))),
        Err(e) => Err(StoreError::InvalidFilter(e.to_string())),
    }
}
