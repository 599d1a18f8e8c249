// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Micro-chart layout engine for `microviz_core`.
//!
//! This crate turns `{ data, size, spec }` into a [`RenderModel`]:
//! - **Normalization** coerces untyped JSON input into bounded, finite [`ChartData`] and records
//!   every repair as a warning instead of failing.
//! - **Dispatch** maps `spec.type` to one of 25 [`Variant`]s, each a pure layout function.
//! - **Assembly** wraps the resulting marks with the input size, warnings (`stats`) and an
//!   accessibility summary.
//!
//! The engine is synchronous, allocation-only and deterministic: the same input always yields a
//! deeply equal model, which makes it safe to run on any thread (see `microviz_worker`).
//!
//! ```
//! use microviz_charts::compute_value;
//! use serde_json::json;
//!
//! let model = compute_value(&json!({
//!     "data": [{ "name": "Used", "pct": 70 }, { "name": "Free", "pct": 30 }],
//!     "size": { "width": 120, "height": 8 },
//!     "spec": { "type": "segmented-bar" },
//! }));
//! assert_eq!(model.marks.len(), 2);
//! ```
//!
//! Rendering is out of scope; a model is a plain, serializable value.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod allocate;
mod arc;
mod assemble;
mod compute;
mod data;
#[cfg(not(feature = "std"))]
mod float;
mod layout;
mod log;
mod normalize;
mod options;
mod paint;
mod parse;
mod partition;
mod prng;
mod variant;
mod variants;

pub use compute::{ComputeInput, compute, compute_value};
pub use data::{ChartData, DataShape, Gauge, Heat, Segment, Size};
pub use layout::Layout;
pub use normalize::{Normalized, normalize};
pub use options::Options;
pub use parse::{ParsedNumbers, parse_number_array};
pub use variant::{LayoutFn, Variant, dispatch};

pub use microviz_core::{
    A11y, A11yItem, CircleMark, ClipRectDef, Def, LineMark, Mark, MaskDef, PathMark, RectMark,
    RenderModel, Stats, interpolate,
};
