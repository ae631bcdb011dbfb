// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Frame formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use docframe::Frame;

use super::commands::OutputFormat;

pub struct FrameFormatter;

impl FrameFormatter {
    pub fn format(frame: &Frame, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(frame),
            OutputFormat::Json => Self::format_json(frame),
            OutputFormat::Csv => Self::format_csv(frame),
        }
    }

    fn format_table(frame: &Frame) -> String {
        if frame.row_count() == 0 {
            return format!("{}\n", "No results found".yellow());
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Query Results".bold().green()));
        output.push_str(&format!("Rows returned: {}\n\n", frame.row_count()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            frame
                .columns
                .iter()
                .map(|column| Cell::new(&column.name).fg(Color::Green))
                .collect::<Vec<_>>(),
        );
        for row in frame.rows() {
            table.add_row(row);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Rows as objects keyed by column name
    fn format_json(frame: &Frame) -> String {
        let rows: Vec<serde_json::Value> = frame
            .rows()
            .map(|row| {
                let object = frame
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, value)| (column.name.clone(), serde_json::json!(value)))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();

        let json = serde_json::json!({
            "name": frame.name,
            "columns": frame.column_names(),
            "rows": rows,
        });

        let mut output = serde_json::to_string_pretty(&json).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize frame to JSON\"}".to_string()
        });
        output.push('\n');
        output
    }

    fn format_csv(frame: &Frame) -> String {
        let mut output = String::new();

        let header: Vec<String> = frame
            .columns
            .iter()
            .map(|column| Self::csv_escape(&column.name))
            .collect();
        output.push_str(&header.join(","));
        output.push('\n');

        for row in frame.rows() {
            let values: Vec<String> = row.into_iter().map(Self::csv_escape).collect();
            output.push_str(&values.join(","));
            output.push('\n');
        }
        output
    }

    fn csv_escape(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docframe::Column;

    fn sample() -> Frame {
        Frame {
            name: "response".to_string(),
            columns: vec![
                Column::new("a", vec!["1".to_string(), "2".to_string()]),
                Column::new("b", vec!["x, y".to_string(), String::new()]),
            ],
        }
    }

    #[test]
    fn test_csv_output() {
        let csv = FrameFormatter::format(&sample(), OutputFormat::Csv);
        assert_eq!(csv, "a,b\n1,\"x, y\"\n2,\n");
    }

    #[test]
    fn test_json_output() {
        let json = FrameFormatter::format(&sample(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["columns"], serde_json::json!(["a", "b"]));
        assert_eq!(value["rows"][1]["b"], "");
    }

    #[test]
    fn test_empty_frame_table() {
        colored::control::set_override(false);
        let table = FrameFormatter::format(&Frame::empty(), OutputFormat::Table);
        assert_eq!(table, "No results found\n");
    }
}
