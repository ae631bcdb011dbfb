// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for docframe

use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use super::commands::OutputFormat;
use super::output::FrameFormatter;
use docframe::config::{ENV_PASSWORD, ENV_URI, ENV_USERNAME};
use docframe::{
    DataQuery, DataResponse, Datasource, DatasourceSettings, QueryContext, QueryDataRequest,
};

/// Connection flags as given on the command line
pub struct ConnectionOptions {
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionOptions {
    /// Merge flags with `DOCFRAME_*` variables, prompting for a missing password
    fn resolve(self) -> Result<DatasourceSettings, Box<dyn std::error::Error>> {
        let uri = self
            .uri
            .or_else(|| std::env::var(ENV_URI).ok())
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| format!("No document store given. Use --uri or set {}.", ENV_URI))?;

        let username = self
            .username
            .or_else(|| std::env::var(ENV_USERNAME).ok())
            .unwrap_or_default();

        let password = match self.password.or_else(|| std::env::var(ENV_PASSWORD).ok()) {
            Some(password) => password,
            None if !username.is_empty() => {
                rpassword::prompt_password(format!("Password for {}: ", username))?
            }
            None => String::new(),
        };

        Ok(DatasourceSettings::new(uri, username, password))
    }
}

fn context(timeout: Option<u64>) -> QueryContext {
    match timeout {
        Some(secs) => QueryContext::background().with_timeout(Duration::from_secs(secs)),
        None => QueryContext::background(),
    }
}

/// Handle the query command
pub async fn handle_query(
    connection: ConnectionOptions,
    query: String,
    database: String,
    collection: String,
    format: OutputFormat,
    timeout: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let datasource = Datasource::mongo(connection.resolve()?);

    let payload = serde_json::json!({
        "queryText": query,
        "database": database,
        "collection": collection,
    });
    let request = QueryDataRequest::new(vec![DataQuery::new("A", payload.to_string())]);

    let mut response = datasource.query_data(request, &context(timeout)).await;
    datasource.dispose().await;

    match response.responses.remove("A") {
        Some(DataResponse::Success(frame)) => {
            print!("{}", FrameFormatter::format(&frame, format));
            Ok(())
        }
        Some(DataResponse::Failure(error)) => Err(error.message.into()),
        None => Err("No response for query".into()),
    }
}

/// Handle the batch command
pub async fn handle_batch(
    connection: ConnectionOptions,
    file: PathBuf,
    format: OutputFormat,
    timeout: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&contents)
        .map_err(|e| format!("{} is not a JSON array of queries: {}", file.display(), e))?;

    let queries = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let ref_id = entry
                .get("refId")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index + 1));
            DataQuery::new(ref_id, entry.to_string())
        })
        .collect();

    let datasource = Datasource::mongo(connection.resolve()?);
    let response = datasource
        .query_data(QueryDataRequest::new(queries), &context(timeout))
        .await;
    datasource.dispose().await;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let mut failed = 0;
    for (ref_id, result) in &response.responses {
        println!("{}", format!("▶ {}", ref_id).bold().cyan());
        match result {
            DataResponse::Success(frame) => print!("{}", FrameFormatter::format(frame, format)),
            DataResponse::Failure(error) => {
                failed += 1;
                println!("{}", format!("❌ {}", error.message).red());
            }
        }
        println!();
    }

    let summary = format!("{} succeeded, {} failed", response.len() - failed, failed);
    if failed == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
    Ok(())
}

/// Handle the health command
pub async fn handle_health(
    connection: ConnectionOptions,
    timeout: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let datasource = Datasource::mongo(connection.resolve()?);
    let result = datasource.check_health(&context(timeout)).await;
    datasource.dispose().await;

    if result.is_ok() {
        println!("{}", format!("✅ {}", result.message).green());
        Ok(())
    } else {
        Err(result.message.into())
    }
}
