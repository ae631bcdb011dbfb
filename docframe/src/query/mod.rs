// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query text handling
//!
//! Turns the query editor's payload into a [`QueryDescriptor`]: comments are
//! stripped from the raw text, and the target database and collection are
//! decoded alongside it.

pub mod model;
pub mod sanitizer;

pub use model::{decode_query, Filter, QueryDescriptor};
pub use sanitizer::strip_comments;
