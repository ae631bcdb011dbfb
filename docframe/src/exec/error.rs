// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query error types

use crate::store::StoreError;
use thiserror::Error;

/// Why a store connection could not be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("unable to connect to document store: {0}")]
    Establish(String),

    #[error("document store ping failed: {0}")]
    Unresponsive(String),
}

/// Per-query errors
///
/// Every error is scoped to the query that raised it; sibling queries in the
/// same batch are unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("json unmarshal: {0}")]
    MalformedQuery(String),

    #[error("query unmarshal: {0}")]
    MalformedFilter(String),

    #[error("{0}")]
    Connection(#[from] ConnectionError),

    #[error("find error: {0}")]
    Execution(String),

    #[error("cursor read error: {0}")]
    ResultRead(String),

    #[error("query cancelled: {0}")]
    Cancelled(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for QueryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Connect(e) => QueryError::Connection(ConnectionError::Establish(e)),
            StoreError::Ping(e) => QueryError::Connection(ConnectionError::Unresponsive(e)),
            StoreError::InvalidFilter(e) => QueryError::MalformedFilter(e),
            StoreError::Rejected(e) => QueryError::Execution(e),
            StoreError::Read(e) => QueryError::ResultRead(e),
        }
    }
}
