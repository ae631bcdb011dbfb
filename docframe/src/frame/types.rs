// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Column-oriented frame types

use serde::{Deserialize, Serialize};

/// Name given to every frame produced by the query pipeline
pub const DEFAULT_FRAME_NAME: &str = "response";

/// A named column of text values, one per result document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Column-oriented table built from one query's result set
///
/// Columns are ordered by name and every column holds exactly
/// [`row_count`](Frame::row_count) values, aligned with the order in which the
/// store returned the documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Frame {
    /// An empty frame: no columns, no rows
    pub fn empty() -> Self {
        Self {
            name: DEFAULT_FRAME_NAME.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Length of the longest column; equal to every column's length unless
    /// the frame was assembled by hand
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        // Columns are sorted, so a binary search is enough
        self.columns
            .binary_search_by(|c| c.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.columns[index])
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Row-wise view, for formatters that print one line per document.
    ///
    /// Short columns read as empty cells.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count()).map(move |row| {
            self.columns
                .iter()
                .map(|column| column.values.get(row).map_or("", String::as_str))
                .collect()
        })
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::empty()
    }
}
