// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Document store access
//!
//! This module provides:
//! - The tagged [`DocValue`] type system for schema-less documents
//! - Driver traits ([`DocumentStore`], [`StoreConnection`])
//! - The MongoDB driver and an in-memory driver for tests
//! - A connection pool keyed by URI
//! - Connection URI composition from settings

pub mod memory;
pub mod mongo;
pub mod pool;
pub mod traits;
pub mod types;
pub mod uri;
pub mod value;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use pool::{ConnectionPool, PooledConnection};
pub use traits::{DocumentStore, StoreConnection};
pub use types::{StoreError, StoreResult};
pub use uri::compose_connection_uri;
pub use value::{DocValue, Document, ExtendedJsonError, ObjectId};
