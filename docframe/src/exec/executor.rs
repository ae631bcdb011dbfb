// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query executor: runs a decoded query against an open connection

use super::context::QueryContext;
use super::error::QueryError;
use crate::query::QueryDescriptor;
use crate::store::{Document, StoreConnection};

/// Runs find-style queries and materializes the full result set
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Decode the descriptor's filter and run it on `database.collection`.
    ///
    /// Documents come back in store iteration order. The drain is all or
    /// nothing: a read failure midway yields `ResultRead`, never a partial
    /// result set.
    pub async fn execute(
        &self,
        connection: &dyn StoreConnection,
        descriptor: &QueryDescriptor,
        ctx: &QueryContext,
    ) -> Result<Vec<Document>, QueryError> {
        let filter = descriptor.decode_filter()?;

        log::debug!(
            "find on {}.{} with {} filter key(s)",
            descriptor.database(),
            descriptor.collection(),
            filter.len()
        );

        let documents = ctx
            .run("find", async {
                connection
                    .find(descriptor.database(), descriptor.collection(), &filter)
                    .await
                    .map_err(QueryError::from)
            })
            .await?;

        log::debug!(
            "{}.{} returned {} document(s)",
            descriptor.database(),
            descriptor.collection(),
            documents.len()
        );
        Ok(documents)
    }
}
