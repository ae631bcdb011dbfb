// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! docframe - ad-hoc document-store queries as flat, deterministic frames
//!
//! docframe runs a filter expression against a MongoDB collection and turns the
//! schema-less result set into a column-oriented [`Frame`]:
//!
//! - **Comment-tolerant queries**: `//` and `/* */` comments are stripped before decoding
//! - **Schema unification**: every field seen in any document becomes a column
//! - **Gap filling**: documents missing a field contribute an empty string
//! - **Text coercion**: every value is rendered as text, ObjectIds as hex
//! - **Deterministic layout**: columns are sorted by name
//! - **Isolation**: each query in a batch succeeds or fails on its own
//!
//! # Usage
//!
//! ```no_run
//! use docframe::{DataQuery, Datasource, DatasourceSettings, QueryContext, QueryDataRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = DatasourceSettings::new("db.example.com", "alice", "secret");
//! let datasource = Datasource::mongo(settings);
//!
//! let request = QueryDataRequest::new(vec![DataQuery::new(
//!     "A",
//!     r#"{"queryText": "{\"status\": \"active\"} // only live rows", "database": "shop", "collection": "orders"}"#,
//! )]);
//! let response = datasource.query_data(request, &QueryContext::background()).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coordinator;
pub mod exec;
pub mod frame;
pub mod query;
pub mod store;

pub use config::{ConfigError, DatasourceSettings, EngineConfig, PoolConfig};
pub use coordinator::{
    DataQuery, DataResponse, Datasource, ErrorStatus, HealthCheckResult, HealthStatus,
    QueryDataRequest, QueryDataResponse, ResponseError,
};
pub use exec::{CancelHandle, ConnectionError, QueryContext, QueryError, QueryExecutor};
pub use frame::{Column, FieldSet, Frame, NormalizedDocument};
pub use query::{decode_query, strip_comments, QueryDescriptor};
pub use store::{
    compose_connection_uri, ConnectionPool, DocValue, Document, DocumentStore, MemoryStore,
    MongoStore, ObjectId, StoreConnection, StoreError,
};

/// docframe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// docframe crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
