//! Test fixture for docframe integration tests
//!
//! Wraps a [`Datasource`] over a private [`MemoryStore`] and only goes through
//! the public batch API, the way a host would.

#![allow(dead_code)]

use docframe::{
    DataQuery, DataResponse, Datasource, DatasourceSettings, EngineConfig, Frame, MemoryStore,
    QueryContext, QueryDataRequest, QueryDataResponse,
};
use serde_json::json;
use std::sync::Arc;

pub const DATABASE: &str = "shop";
pub const ORDERS: &str = "orders";
pub const CUSTOMERS: &str = "customers";

pub struct TestFixture {
    store: MemoryStore,
    datasource: Datasource,
}

impl TestFixture {
    /// Empty store, default engine configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let store = MemoryStore::new();
        let datasource = Datasource::new(
            DatasourceSettings::new("memory.test", "", ""),
            Arc::new(store.clone()),
            config,
        );
        Self { store, datasource }
    }

    /// Orders with irregular shapes plus a small customers collection
    pub fn with_sample_data() -> Self {
        let fixture = Self::new();
        fixture.insert_sample_data();
        fixture
    }

    pub fn insert_sample_data(&self) {
        self.store.insert_json(
            DATABASE,
            ORDERS,
            json!([
                {"_id": {"$oid": "65a1b2c3d4e5f60718293a01"}, "item": "pen", "qty": 5, "status": "active"},
                {"_id": {"$oid": "65a1b2c3d4e5f60718293a02"}, "item": "ink", "qty": 12, "status": "active", "rush": true},
                {"_id": {"$oid": "65a1b2c3d4e5f60718293a03"}, "item": "pad", "status": "closed"},
                {"_id": {"$oid": "65a1b2c3d4e5f60718293a04"}, "item": "nib", "qty": 2.5, "status": "active",
                 "placed": {"$date": "2024-03-01T10:15:00Z"}, "tags": ["gift", 2]}
            ]),
        )
        .expect("orders sample data");
        self.store.insert_json(
            DATABASE,
            CUSTOMERS,
            json!([
                {"name": "Ada", "tier": 1},
                {"name": "Lin"}
            ]),
        )
        .expect("customers sample data");
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn datasource(&self) -> &Datasource {
        &self.datasource
    }

    /// Per-query JSON payload as the query editor sends it
    pub fn payload(query_text: &str, database: &str, collection: &str) -> Vec<u8> {
        json!({
            "queryText": query_text,
            "database": database,
            "collection": collection,
        })
        .to_string()
        .into_bytes()
    }

    pub async fn batch(&self, queries: Vec<DataQuery>) -> QueryDataResponse {
        self.batch_with(queries, &QueryContext::background()).await
    }

    pub async fn batch_with(
        &self,
        queries: Vec<DataQuery>,
        ctx: &QueryContext,
    ) -> QueryDataResponse {
        self.datasource
            .query_data(QueryDataRequest::new(queries), ctx)
            .await
    }

    /// Run a single query against `shop.<collection>`
    pub async fn query(&self, query_text: &str, collection: &str) -> DataResponse {
        let queries = vec![DataQuery::new(
            "A",
            Self::payload(query_text, DATABASE, collection),
        )];
        let mut response = self.batch(queries).await;
        response
            .responses
            .remove("A")
            .expect("batch must answer every ref_id")
    }

    /// Run a query and return its frame, failing the test otherwise
    pub async fn assert_frame(&self, query_text: &str, collection: &str) -> Frame {
        match self.query(query_text, collection).await {
            DataResponse::Success(frame) => frame,
            DataResponse::Failure(error) => {
                panic!("query {:?} failed: {}", query_text, error.message)
            }
        }
    }

    /// Run a query that must fail and return its message
    pub async fn assert_failure(&self, query_text: &str, collection: &str) -> String {
        match self.query(query_text, collection).await {
            DataResponse::Success(frame) => {
                panic!("query {:?} unexpectedly succeeded: {:?}", query_text, frame)
            }
            DataResponse::Failure(error) => error.message,
        }
    }
}

/// Frame invariants every successful query must satisfy
pub fn assert_frame_invariants(frame: &Frame) {
    let names = frame.column_names();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted, "columns must be sorted and unique");

    let rows = frame.row_count();
    for column in &frame.columns {
        assert_eq!(column.values.len(), rows, "column {} is misaligned", column.name);
    }
}
