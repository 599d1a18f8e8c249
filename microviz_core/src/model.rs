// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render model envelope.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::{Def, Mark};

/// The complete, immutable output of one layout computation.
///
/// `width`/`height` always echo the (normalized) input size, even when the variant was unknown
/// or the data empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderModel {
    /// Width in device-independent pixels.
    pub width: f64,
    /// Height in device-independent pixels.
    pub height: f64,
    /// Marks in paint order.
    pub marks: Vec<Mark>,
    /// Definitions referenced by marks. Omitted from the wire form when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defs: Vec<Def>,
    /// Present only when input normalization recorded warnings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    /// Accessibility summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a11y: Option<A11y>,
}

impl RenderModel {
    /// Creates a model with no marks, defs, stats or accessibility metadata.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            marks: Vec::new(),
            defs: Vec::new(),
            stats: None,
            a11y: None,
        }
    }

    /// Returns the warnings recorded during normalization (empty when clean).
    pub fn warnings(&self) -> &[String] {
        match &self.stats {
            Some(stats) => &stats.warnings,
            None => &[],
        }
    }

    /// Finds a mark by its stable id.
    pub fn mark(&self, id: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id() == Some(id))
    }

    /// Finds a definition by id.
    pub fn def(&self, id: &str) -> Option<&Def> {
        self.defs.iter().find(|d| d.id() == id)
    }
}

/// Diagnostics collected while normalizing input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    /// Human-readable descriptions of dropped or coerced input.
    pub warnings: Vec<String>,
}

/// Accessibility summary consumed by keyboard focus logic.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct A11y {
    /// ARIA role (defaults to `"img"`).
    pub role: String,
    /// Summary label.
    pub label: String,
    /// Focusable marks in paint order.
    pub items: Vec<A11yItem>,
}

/// One focusable mark.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct A11yItem {
    /// The mark id.
    pub id: String,
    /// The label announced on focus.
    pub label: String,
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use serde_json::json;

    use super::*;
    use crate::RectMark;

    #[test]
    fn clean_model_omits_stats_and_defs_on_the_wire() {
        let mut model = RenderModel::empty(100.0, 20.0);
        model.marks.push(RectMark::new(0.0, 0.0, 10.0, 20.0).with_id("a").into());
        let v = serde_json::to_value(&model).unwrap();
        assert!(v.get("stats").is_none(), "stats must be absent");
        assert!(v.get("defs").is_none(), "empty defs are omitted");
        assert_eq!(v["width"], json!(100.0));
        assert!(model.warnings().is_empty());
        assert!(model.mark("a").is_some());
        assert!(model.mark("b").is_none());
    }

    #[test]
    fn warnings_are_exposed_when_present() {
        let mut model = RenderModel::empty(0.0, 0.0);
        model.stats = Some(Stats {
            warnings: vec![String::from("size.width was negative; clamped to 0")],
        });
        assert_eq!(model.warnings().len(), 1);
        let v = serde_json::to_value(&model).unwrap();
        assert_eq!(v["stats"]["warnings"][0], "size.width was negative; clamped to 0");
    }
}
