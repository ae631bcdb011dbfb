// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! docframe CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands, ConnectionOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = select_log_level(cli.verbose, cli.log_level, rust_log_set) {
        logger.filter_level(level);
    }
    logger.init();

    let connection = ConnectionOptions {
        uri: cli.uri,
        username: cli.username,
        password: cli.password,
    };

    match cli.command {
        Commands::Version => {
            println!("{} {}", "docframe".bold().green(), docframe::VERSION);
            println!("Document-store queries as tabular frames");
            Ok(())
        }

        Commands::Query {
            query,
            database,
            collection,
            format,
            timeout,
        } => cli::handle_query(connection, query, database, collection, format, timeout).await,

        Commands::Batch {
            file,
            format,
            timeout,
        } => cli::handle_batch(connection, file, format, timeout).await,

        Commands::Health { timeout } => cli::handle_health(connection, timeout).await,
    }
}

/// Explicit flags win over `RUST_LOG`; without either, only warnings are shown
fn select_log_level(
    verbose: bool,
    log_level: Option<log::Level>,
    rust_log_set: bool,
) -> Option<log::LevelFilter> {
    if verbose {
        Some(log::LevelFilter::Debug)
    } else if let Some(level) = log_level {
        Some(level.to_level_filter())
    } else if rust_log_set {
        None
    } else {
        Some(log::LevelFilter::Warn)
    }
}
