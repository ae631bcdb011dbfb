// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Batch request and response types

use crate::exec::QueryError;
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One query of a batch: the caller's reference id plus its JSON payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    pub ref_id: String,
    /// `{"queryText", "database", "collection"}` as raw JSON
    pub json: Vec<u8>,
}

impl DataQuery {
    pub fn new(ref_id: impl Into<String>, json: impl Into<Vec<u8>>) -> Self {
        Self {
            ref_id: ref_id.into(),
            json: json.into(),
        }
    }
}

/// A batch of queries, answered one response per `ref_id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDataRequest {
    pub queries: Vec<DataQuery>,
}

impl QueryDataRequest {
    pub fn new(queries: Vec<DataQuery>) -> Self {
        Self { queries }
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Coarse classification of a failed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStatus {
    BadRequest,
    Cancelled,
    Internal,
}

impl From<&QueryError> for ErrorStatus {
    fn from(error: &QueryError) -> Self {
        match error {
            QueryError::Cancelled(_) => ErrorStatus::Cancelled,
            QueryError::Internal(_) => ErrorStatus::Internal,
            _ => ErrorStatus::BadRequest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub status: ErrorStatus,
    pub message: String,
}

/// Outcome of one query: a frame or a scoped error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataResponse {
    Success(Frame),
    Failure(ResponseError),
}

impl DataResponse {
    pub fn failure(error: &QueryError) -> Self {
        DataResponse::Failure(ResponseError {
            status: ErrorStatus::from(error),
            message: error.to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DataResponse::Success(_))
    }

    pub fn frame(&self) -> Option<&Frame> {
        match self {
            DataResponse::Success(frame) => Some(frame),
            DataResponse::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ResponseError> {
        match self {
            DataResponse::Success(_) => None,
            DataResponse::Failure(error) => Some(error),
        }
    }
}

impl From<Result<Frame, QueryError>> for DataResponse {
    fn from(result: Result<Frame, QueryError>) -> Self {
        match result {
            Ok(frame) => DataResponse::Success(frame),
            Err(error) => DataResponse::failure(&error),
        }
    }
}

/// Responses keyed by `ref_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDataResponse {
    pub responses: BTreeMap<String, DataResponse>,
}

impl QueryDataResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ref_id: impl Into<String>, response: DataResponse) {
        self.responses.insert(ref_id.into(), response);
    }

    pub fn get(&self, ref_id: &str) -> Option<&DataResponse> {
        self.responses.get(ref_id)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
