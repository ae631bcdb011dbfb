// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for docframe
//!
//! Provides one-off queries, JSON batch files and connectivity checks
//! against a document store.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_batch, handle_health, handle_query, ConnectionOptions};
