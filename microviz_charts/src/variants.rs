// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout functions, grouped by the geometric primitive they build on.
//!
//! Every function here has the [`LayoutFn`](crate::LayoutFn) signature and is pure: empty data or
//! a degenerate plot area yields an empty layout, and options are clamped rather than rejected.

pub(crate) mod bars;
pub(crate) mod binned;
pub(crate) mod chips;
pub(crate) mod grid;
pub(crate) mod helix;
pub(crate) mod pipeline;
pub(crate) mod radial;
pub(crate) mod series;
pub(crate) mod steps;
