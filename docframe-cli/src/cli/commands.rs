// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docframe", version, about = "Run document-store queries as tabular frames")]
pub struct Cli {
    /// Base connection URI or host (falls back to DOCFRAME_URI)
    #[arg(long, global = true)]
    pub uri: Option<String>,

    /// Username (falls back to DOCFRAME_USERNAME)
    #[arg(short = 'u', long, global = true)]
    pub username: Option<String>,

    /// Password (falls back to DOCFRAME_PASSWORD, prompted when a username is set)
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one filter against a collection
    Query {
        /// Filter expression (JSON object, comments allowed)
        query: String,

        #[arg(short, long)]
        database: String,

        #[arg(short, long)]
        collection: String,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Query timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Run a JSON file of queries: [{"refId", "queryText", "database", "collection"}]
    Batch {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Per-query timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Check that the store is reachable and answers pings
    Health {
        /// Timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show version information
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}
