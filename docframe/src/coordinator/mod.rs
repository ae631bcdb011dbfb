// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query coordination
//!
//! The [`Datasource`] is the entry point hosts call: it fans a batch out over
//! the query pipeline and reports one [`DataResponse`] per request id, plus a
//! connectivity health check.

pub mod datasource;
pub mod health;
pub mod response;

pub use datasource::Datasource;
pub use health::{HealthCheckResult, HealthStatus};
pub use response::{
    DataQuery, DataResponse, ErrorStatus, QueryDataRequest, QueryDataResponse, ResponseError,
};
