// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Document store driver traits
//!
//! All store drivers implement these traits so the query pipeline, the
//! connection pool and the health check never depend on a concrete driver.

use super::types::StoreResult;
use super::value::Document;
use crate::query::Filter;
use async_trait::async_trait;

/// Factory for connections to one kind of document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Establish a connection to the store at `uri`.
    ///
    /// The returned connection has not been verified yet; callers ping it
    /// before first use.
    async fn connect(&self, uri: &str) -> StoreResult<Box<dyn StoreConnection>>;

    /// Short driver name used in log lines
    fn name(&self) -> &'static str;
}

/// An open connection to a document store
#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Round-trip health check
    async fn ping(&self) -> StoreResult<()>;

    /// Run a find-style query on `database.collection` and drain every
    /// matching document into memory, in store iteration order.
    ///
    /// Fails with `Rejected` when the store refuses the query and with `Read`
    /// when draining the cursor fails partway; partial results are never
    /// returned.
    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Vec<Document>>;

    /// Close the connection and release its resources
    async fn close(self: Box<Self>);
}
