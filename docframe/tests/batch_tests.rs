//! Batch isolation tests: one response per ref_id, failures stay local

#[path = "testutils/mod.rs"]
mod testutils;

use async_trait::async_trait;
use docframe::query::Filter;
use docframe::store::StoreResult;
use docframe::{
    DataQuery, DataResponse, Datasource, DatasourceSettings, Document, DocumentStore,
    EngineConfig, ErrorStatus, MemoryStore, QueryContext, QueryDataRequest, StoreConnection,
};
use std::sync::Arc;
use testutils::test_fixture::{TestFixture, CUSTOMERS, DATABASE, ORDERS};

#[tokio::test]
async fn test_every_ref_id_gets_one_response() {
    let fixture = TestFixture::with_sample_data();
    let response = fixture
        .batch(vec![
            DataQuery::new("A", TestFixture::payload("{}", DATABASE, ORDERS)),
            DataQuery::new("B", TestFixture::payload("{\"status\": ", DATABASE, ORDERS)),
            DataQuery::new("C", TestFixture::payload("{}", DATABASE, CUSTOMERS)),
        ])
        .await;

    assert_eq!(response.len(), 3);
    assert_eq!(response.get("A").and_then(DataResponse::frame).unwrap().row_count(), 4);
    assert_eq!(response.get("C").and_then(DataResponse::frame).unwrap().row_count(), 2);

    let error = response.get("B").and_then(DataResponse::error).unwrap();
    assert_eq!(error.status, ErrorStatus::BadRequest);
    assert!(error.message.starts_with("query unmarshal:"));
}

#[tokio::test]
async fn test_mixed_failures_do_not_leak_between_queries() {
    let fixture = TestFixture::with_sample_data();
    let response = fixture
        .batch(vec![
            DataQuery::new("bad-json", "{"),
            DataQuery::new(
                "bad-op",
                TestFixture::payload("{\"qty\": {\"$x\": 1}}", DATABASE, ORDERS),
            ),
            DataQuery::new("missing", TestFixture::payload("{}", DATABASE, "nope")),
            DataQuery::new("ok", TestFixture::payload("{\"item\": \"ink\"}", DATABASE, ORDERS)),
        ])
        .await;

    assert!(!response.get("bad-json").unwrap().is_success());
    assert!(!response.get("bad-op").unwrap().is_success());
    assert!(!response.get("missing").unwrap().is_success());

    let frame = response.get("ok").and_then(DataResponse::frame).unwrap();
    assert_eq!(frame.column("item").unwrap().values, vec!["ink"]);
}

#[tokio::test]
async fn test_repeated_ref_id_keeps_last_response() {
    let fixture = TestFixture::with_sample_data();
    let response = fixture
        .batch(vec![
            DataQuery::new("A", "{"),
            DataQuery::new("A", TestFixture::payload("{}", DATABASE, CUSTOMERS)),
        ])
        .await;

    assert_eq!(response.len(), 1);
    assert!(response.get("A").unwrap().is_success());
}

/// Store whose finds panic on one poisoned collection
struct PanickingStore {
    inner: MemoryStore,
}

struct PanickingConnection {
    inner: Box<dyn StoreConnection>,
}

#[async_trait]
impl DocumentStore for PanickingStore {
    async fn connect(&self, uri: &str) -> StoreResult<Box<dyn StoreConnection>> {
        let inner = self.inner.connect(uri).await?;
        Ok(Box::new(PanickingConnection { inner }))
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[async_trait]
impl StoreConnection for PanickingConnection {
    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Vec<Document>> {
        if collection == "poisoned" {
            panic!("driver bug on {}.{}", database, collection);
        }
        self.inner.find(database, collection, filter).await
    }

    async fn close(self: Box<Self>) {
        self.inner.close().await
    }
}

#[tokio::test]
async fn test_panic_becomes_internal_failure() {
    let memory = MemoryStore::new();
    memory
        .insert_json(DATABASE, CUSTOMERS, serde_json::json!([{"name": "Ada"}]))
        .unwrap();
    let datasource = Datasource::new(
        DatasourceSettings::new("memory.test", "", ""),
        Arc::new(PanickingStore {
            inner: memory.clone(),
        }),
        EngineConfig::default(),
    );

    let request = QueryDataRequest::new(vec![
        DataQuery::new("A", TestFixture::payload("{}", DATABASE, "poisoned")),
        DataQuery::new("B", TestFixture::payload("{}", DATABASE, CUSTOMERS)),
    ]);
    let response = datasource
        .query_data(request, &QueryContext::background())
        .await;

    let error = response.get("A").and_then(DataResponse::error).unwrap();
    assert_eq!(error.status, ErrorStatus::Internal);
    assert_eq!(error.message, "internal error: driver bug on shop.poisoned");

    let frame = response.get("B").and_then(DataResponse::frame).unwrap();
    assert_eq!(frame.column("name").unwrap().values, vec!["Ada"]);

    // The connection in use when the pipeline panicked is never pooled
    assert_eq!(memory.open_connections(), 1);
    assert_eq!(memory.connect_count(), 2);
}
