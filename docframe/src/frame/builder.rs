// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Frame assembly from normalized documents

use super::types::{Column, Frame, DEFAULT_FRAME_NAME};
use super::unifier::{normalize, FieldSet, NormalizedDocument};
use crate::store::Document;

/// One column per field in lexicographic order, values in document order
pub fn build_frame(fields: &FieldSet, documents: &[NormalizedDocument]) -> Frame {
    let columns = fields
        .iter()
        .map(|field| {
            let values = documents
                .iter()
                .map(|document| document.get(field).unwrap_or_default().to_string())
                .collect();
            Column::new(field, values)
        })
        .collect();

    Frame {
        name: DEFAULT_FRAME_NAME.to_string(),
        columns,
    }
}

impl Frame {
    /// Unify, normalize and assemble a raw result set in one step
    pub fn from_documents(documents: &[Document]) -> Self {
        let fields = FieldSet::from_documents(documents);
        let normalized = normalize(&fields, documents);
        build_frame(&fields, &normalized)
    }
}
