// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized chart input.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// A width/height pair in device-independent pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One named, colored share of a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Display name.
    pub name: String,
    /// Share as a percentage. Finite and `>= 0`; segments need not sum to 100.
    pub pct: f64,
    /// Any CSS color string.
    pub color: String,
}

/// A single bounded value (`value` of `max`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gauge {
    /// Upper bound, always `> 0`.
    pub max: f64,
    /// Current value, clamped to `[0, max]`.
    pub value: f64,
}

/// Values for a heat grid, with optional per-cell opacity overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Heat {
    /// Cell values in row-major order.
    pub series: Vec<f64>,
    /// Opacity overrides aligned with `series`; `None` derives opacity from the value.
    pub opacities: Vec<Option<f64>>,
}

/// The data shape a variant consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataShape {
    /// `[{ name, pct, color }]`.
    Segments,
    /// `[number]`.
    Series,
    /// Either of the above, decided by the first element.
    SeriesOrSegments,
    /// `{ max, value }`.
    Gauge,
    /// `{ series, opacities }`.
    Heat,
}

/// Normalized data: bounded, finite, and typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ChartData {
    /// No usable data.
    #[default]
    Empty,
    /// Segment list.
    Segments(Vec<Segment>),
    /// Numeric series.
    Series(Vec<f64>),
    /// Single gauge value.
    Gauge(Gauge),
    /// Heat grid values.
    Heat(Heat),
}

impl ChartData {
    /// Returns the segments, or an empty slice for other shapes.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Segments(s) => s,
            _ => &[],
        }
    }

    /// Returns the numeric series, or an empty slice for other shapes.
    ///
    /// Heat data exposes its `series`.
    pub fn series(&self) -> &[f64] {
        match self {
            Self::Series(s) => s,
            Self::Heat(h) => &h.series,
            _ => &[],
        }
    }

    /// Returns `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Segments(s) => s.is_empty(),
            Self::Series(s) => s.is_empty(),
            Self::Gauge(_) => false,
            Self::Heat(h) => h.series.is_empty(),
        }
    }
}
