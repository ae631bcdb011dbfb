// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result-set unification and frame assembly

pub mod builder;
pub mod types;
pub mod unifier;

pub use builder::build_frame;
pub use types::{Column, Frame, DEFAULT_FRAME_NAME};
pub use unifier::{normalize, normalize_document, FieldSet, NormalizedDocument};
