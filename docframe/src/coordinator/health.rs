// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Datasource health check

use crate::exec::{QueryContext, QueryError};
use crate::store::{ConnectionPool, StoreError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: String,
}

impl HealthCheckResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}

/// Connect and ping on a fresh connection, never one from the idle list
pub(crate) async fn check_health(
    pool: &ConnectionPool,
    uri: &str,
    ctx: &QueryContext,
) -> HealthCheckResult {
    let attempt = ctx
        .run("health check", async {
            Ok::<_, QueryError>(pool.connect_verified(uri).await)
        })
        .await;

    match attempt {
        Ok(Ok(connection)) => {
            connection.discard().await;
            HealthCheckResult::ok("Document store connection successful")
        }
        Ok(Err(StoreError::Ping(e))) => {
            log::warn!("health check: ping failed: {}", e);
            HealthCheckResult::error(format!("Document store ping failed: {}", e))
        }
        Ok(Err(StoreError::Connect(e))) => {
            log::warn!("health check: connect failed: {}", e);
            HealthCheckResult::error(format!("Unable to connect to document store: {}", e))
        }
        Ok(Err(other)) => {
            log::warn!("health check: {}", other);
            HealthCheckResult::error(format!("Unable to connect to document store: {}", other))
        }
        Err(e) => HealthCheckResult::error(format!("Health check aborted: {}", e)),
    }
}
