//! Health check tests

#[path = "testutils/mod.rs"]
mod testutils;

use docframe::{HealthStatus, QueryContext};
use std::time::Duration;
use testutils::test_fixture::TestFixture;

#[tokio::test]
async fn test_healthy_store() {
    let fixture = TestFixture::new();
    let result = fixture
        .datasource()
        .check_health(&QueryContext::background())
        .await;

    assert_eq!(result.status, HealthStatus::Ok);
    assert_eq!(result.message, "Document store connection successful");
    assert_eq!(fixture.store().open_connections(), 0);
}

#[tokio::test]
async fn test_unreachable_store() {
    let fixture = TestFixture::new();
    fixture.store().set_unreachable(true);

    let result = fixture
        .datasource()
        .check_health(&QueryContext::background())
        .await;
    assert_eq!(result.status, HealthStatus::Error);
    assert!(
        result.message.starts_with("Unable to connect to document store: "),
        "{}",
        result.message
    );
}

#[tokio::test]
async fn test_unresponsive_store() {
    let fixture = TestFixture::new();
    fixture.store().set_unresponsive(true);

    let result = fixture
        .datasource()
        .check_health(&QueryContext::background())
        .await;
    assert!(!result.is_ok());
    assert!(
        result.message.starts_with("Document store ping failed: "),
        "{}",
        result.message
    );
    assert_eq!(fixture.store().open_connections(), 0);
}

#[tokio::test]
async fn test_health_check_bypasses_idle_connections() {
    let fixture = TestFixture::with_sample_data();
    fixture.assert_frame("{}", "orders").await;
    assert_eq!(fixture.store().connect_count(), 1);

    let result = fixture
        .datasource()
        .check_health(&QueryContext::background())
        .await;
    assert!(result.is_ok());
    assert_eq!(fixture.store().connect_count(), 2);
    assert_eq!(fixture.store().open_connections(), 1);
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let fixture = TestFixture::new();
    fixture.store().set_latency(Some(Duration::from_secs(30)));

    let ctx = QueryContext::background().with_timeout(Duration::from_millis(20));
    let result = fixture.datasource().check_health(&ctx).await;
    assert_eq!(result.status, HealthStatus::Error);
    assert!(result.message.contains("deadline exceeded"), "{}", result.message);
}
