//! Cancellation and deadline tests

#[path = "testutils/mod.rs"]
mod testutils;

use docframe::{DataQuery, DataResponse, EngineConfig, ErrorStatus, QueryContext};
use std::time::Duration;
use testutils::test_fixture::{TestFixture, DATABASE, ORDERS};

#[tokio::test]
async fn test_deadline_cancels_slow_query() {
    let fixture = TestFixture::with_sample_data();
    fixture.store().set_latency(Some(Duration::from_secs(30)));

    let ctx = QueryContext::background().with_timeout(Duration::from_millis(50));
    let response = fixture
        .batch_with(
            vec![DataQuery::new("A", TestFixture::payload("{}", DATABASE, ORDERS))],
            &ctx,
        )
        .await;

    let error = response.get("A").and_then(DataResponse::error).unwrap();
    assert_eq!(error.status, ErrorStatus::Cancelled);
    assert!(error.message.starts_with("query cancelled:"), "{}", error.message);
    assert_eq!(fixture.store().open_connections(), 0);
}

#[tokio::test]
async fn test_cancelled_batch_answers_every_query() {
    let fixture = TestFixture::with_sample_data();
    let (ctx, handle) = QueryContext::with_cancel();
    handle.cancel();

    let response = fixture
        .batch_with(
            vec![
                DataQuery::new("A", TestFixture::payload("{}", DATABASE, ORDERS)),
                DataQuery::new("B", TestFixture::payload("{}", DATABASE, ORDERS)),
            ],
            &ctx,
        )
        .await;

    assert_eq!(response.len(), 2);
    for ref_id in ["A", "B"] {
        let error = response.get(ref_id).and_then(DataResponse::error).unwrap();
        assert_eq!(error.status, ErrorStatus::Cancelled);
    }
    assert_eq!(fixture.store().connect_count(), 0);
}

#[tokio::test]
async fn test_cancel_midway_keeps_completed_siblings() {
    let fixture = TestFixture::with_sample_data();
    let (ctx, handle) = QueryContext::with_cancel();

    // Warm the pool so the first query needs no network step besides find
    fixture.assert_frame("{}", ORDERS).await;
    fixture.store().set_latency(Some(Duration::from_millis(200)));

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.cancel();
    });

    let response = fixture
        .batch_with(
            vec![
                DataQuery::new("fast", TestFixture::payload("{}", DATABASE, ORDERS)),
                DataQuery::new("slow", TestFixture::payload("{}", DATABASE, ORDERS)),
            ],
            &ctx,
        )
        .await;
    canceller.await.unwrap();

    assert!(response.get("fast").unwrap().is_success());
    let error = response.get("slow").and_then(DataResponse::error).unwrap();
    assert_eq!(error.status, ErrorStatus::Cancelled);
}

#[tokio::test]
async fn test_engine_default_timeout_applies() {
    let config =
        EngineConfig::default().with_default_query_timeout(Some(Duration::from_millis(50)));
    let fixture = TestFixture::with_config(config);
    fixture.insert_sample_data();
    fixture.store().set_latency(Some(Duration::from_secs(30)));

    let response = fixture.query("{}", ORDERS).await;
    assert_eq!(response.error().unwrap().status, ErrorStatus::Cancelled);
}
