// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store error types

use thiserror::Error;

/// Errors raised by document store drivers
///
/// Each variant corresponds to one network step of a query, so the caller can
/// tell a store that never answered from one that rejected the query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The connection could not be established (bad URI, DNS, refused, ...)
    #[error("connect failed: {0}")]
    Connect(String),

    /// The connection was established but the ping failed
    #[error("ping failed: {0}")]
    Ping(String),

    /// The filter could not be turned into a store-native query
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The store rejected the query (bad operator, unknown collection, ...)
    #[error("query rejected: {0}")]
    Rejected(String),

    /// Reading results failed partway through the cursor
    #[error("cursor read failed: {0}")]
    Read(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
