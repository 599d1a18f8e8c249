// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine entry point.

use microviz_core::RenderModel;
use serde::Deserialize;
use serde_json::Value;

use crate::assemble::assemble;
use crate::layout::Layout;
use crate::normalize::normalize;

/// Raw input to [`compute`]: `{ data, size, spec }`.
///
/// All three fields are untyped JSON; missing fields deserialize as `null` and are repaired (with
/// warnings) by the normalizer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComputeInput {
    /// Segments, series, gauge or heat data, depending on the variant.
    pub data: Value,
    /// `{ width, height }`.
    pub size: Value,
    /// `{ type, ...options }`.
    pub spec: Value,
}

/// Lays out one chart.
///
/// Total and deterministic: the same input always yields a deeply equal model, and malformed
/// input degrades to fewer marks plus `stats.warnings` rather than an error. `width`/`height`
/// always echo the normalized size, also when `spec.type` is unknown.
///
/// ```
/// use microviz_charts::{ComputeInput, compute};
/// use serde_json::json;
///
/// let model = compute(&ComputeInput {
///     data: json!([{ "name": "A", "pct": 60 }, { "name": "B", "pct": 40 }]),
///     size: json!({ "width": 100, "height": 8 }),
///     spec: json!({ "type": "stacked-bar" }),
/// });
/// assert_eq!(model.width, 100.0);
/// assert!(model.mark("stacked-bar-1").is_some());
/// assert!(model.stats.is_none());
/// ```
pub fn compute(input: &ComputeInput) -> RenderModel {
    let normalized = normalize(&input.data, &input.size, &input.spec);
    let layout = match normalized.variant {
        Some(variant) => variant.layout(&normalized.data, normalized.size, &normalized.options),
        None => Layout::new(),
    };
    assemble(normalized, layout)
}

/// [`compute`] for a single `{ data, size, spec }` JSON value.
///
/// A value that is not an object is treated as an input with every field missing.
pub fn compute_value(input: &Value) -> RenderModel {
    let field = |key: &str| input.get(key).cloned().unwrap_or(Value::Null);
    compute(&ComputeInput {
        data: field("data"),
        size: field("size"),
        spec: field("spec"),
    })
}
