// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema unification
//!
//! Computes the union of field names across a result set and rewrites every
//! document so that each of those fields is present as text. Absent fields
//! become the empty string; present values go through
//! [`DocValue::to_text`](crate::store::DocValue::to_text).

use crate::store::Document;
use std::collections::{BTreeMap, BTreeSet};

/// Every field name observed across one result set, in lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    names: BTreeSet<String>,
}

impl FieldSet {
    pub fn from_documents(documents: &[Document]) -> Self {
        let names = documents
            .iter()
            .flat_map(|document| document.keys().cloned())
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Field names in lexicographic (byte) order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A document with one text value for every field of its [`FieldSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDocument {
    values: BTreeMap<String, String>,
}

impl NormalizedDocument {
    /// Text value of `field`, or `None` if the field is not part of the set
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Normalize one document against `fields`
pub fn normalize_document(fields: &FieldSet, document: &Document) -> NormalizedDocument {
    let values = fields
        .iter()
        .map(|field| {
            let text = document
                .get(field)
                .map(|value| value.to_text())
                .unwrap_or_default();
            (field.to_string(), text)
        })
        .collect();
    NormalizedDocument { values }
}

/// Normalize every document against `fields`, preserving document order
pub fn normalize(fields: &FieldSet, documents: &[Document]) -> Vec<NormalizedDocument> {
    documents
        .iter()
        .map(|document| normalize_document(fields, document))
        .collect()
}
