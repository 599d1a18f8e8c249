// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `microviz_core`: the render-agnostic output model of the micro-chart engine.
//!
//! This crate provides:
//! - primitive marks ([`Mark`]: rect, circle, line, path, text) with stable string ids
//! - reusable definitions ([`Def`]: masks, clip rects) referenced by id from marks
//! - the [`RenderModel`] envelope (size, marks, defs, warnings, accessibility summary)
//! - fixed-precision SVG path data formatting ([`svg_path_data`])
//! - a pure [`interpolate`] function for animating between two models
//!
//! It intentionally does NOT compute layouts; see `microviz_charts` for the variant catalog.
//!
//! A model is a plain value: renderers walk [`RenderModel::marks`] in order (the order is the
//! paint order), switch on the mark kind, and resolve `mask`/`clip_path` references against
//! [`RenderModel::defs`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod def;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod interpolate;
mod mark;
mod model;
mod path;

pub use def::{ClipRectDef, Def, MaskDef};
pub use format::{format_fixed, format_number};
pub use interpolate::{interpolate, lerp};
pub use mark::{CURRENT_COLOR, CircleMark, LineMark, Mark, MarkKind, PathMark, RectMark, TextMark};
pub use model::{A11y, A11yItem, RenderModel, Stats};
pub use path::svg_path_data;
