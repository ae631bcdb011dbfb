// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query execution
//!
//! This module runs a decoded query against a store connection under a
//! [`QueryContext`] and defines the per-query error taxonomy.

pub mod context;
pub mod error;
pub mod executor;

pub use context::{CancelHandle, QueryContext};
pub use error::{ConnectionError, QueryError};
pub use executor::QueryExecutor;
