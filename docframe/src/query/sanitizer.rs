// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Comment stripping for raw query text
//!
//! Query editors let users annotate filters with `// line` and `/* block */`
//! comments. Both are removed before the text is decoded as JSON.
//!
//! Stripping is purely lexical: a comment marker inside a quoted string value
//! (for example a URL such as `"http://host"`) is removed as well.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//.*").expect("line comment pattern is valid"));

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*.*?\*/").expect("block comment pattern is valid"));

/// Remove single-line and block comments from `query`.
///
/// Line comments are removed first, then block comments (non-greedy, within a
/// single line). Never fails.
pub fn strip_comments(query: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(query, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}
