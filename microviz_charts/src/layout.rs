// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout output and the helpers every variant shares.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use microviz_core::{CircleMark, Def, LineMark, Mark, PathMark, RectMark, format_number};

use crate::data::{Segment, Size};
use crate::partition::{Span, partition, snap_spans};

/// Marks and defs produced by one layout function, before assembly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Marks in paint order.
    pub marks: Vec<Mark>,
    /// Definitions referenced by the marks.
    pub defs: Vec<Def>,
}

impl Layout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mark.
    pub(crate) fn push(&mut self, mark: impl Into<Mark>) {
        self.marks.push(mark.into());
    }

    /// Appends a definition.
    pub(crate) fn push_def(&mut self, def: impl Into<Def>) {
        self.defs.push(def.into());
    }

    /// Returns `true` when the layout has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// The drawable area after insetting the viewport by `pad` on every side.
///
/// Returns `None` when nothing is left to draw into.
pub(crate) fn plot_rect(size: Size, pad: f64) -> Option<Rect> {
    let pad = pad.max(0.0);
    let rect = Rect::new(pad, pad, size.width - pad, size.height - pad);
    (rect.width() > 0.0 && rect.height() > 0.0).then_some(rect)
}

/// Stable id of the mark for segment `index`: `"<type>-<index>"`.
pub(crate) fn segment_id(kind: &str, index: usize) -> String {
    alloc::format!("{kind}-{index}")
}

/// Tooltip/label text of a segment: `"<name>: <pct>%"`.
pub(crate) fn segment_title(segment: &Segment) -> String {
    alloc::format!("{}: {}%", segment.name, format_number(segment.pct, 2))
}

/// Class name of a mark role within a variant, e.g. `"mv-barcode-bin"`.
pub(crate) fn class_name(kind: &str, part: &str) -> String {
    alloc::format!("mv-{kind}-{part}")
}

/// Marks that represent one data segment.
pub(crate) trait SegmentMark: Sized {
    /// Sets the segment's id, class and title.
    fn segment(self, kind: &str, index: usize, segment: &Segment) -> Self;
}

macro_rules! impl_segment_mark {
    ($($ty:ty),*) => {
        $(
            impl SegmentMark for $ty {
                fn segment(self, kind: &str, index: usize, segment: &Segment) -> Self {
                    self.with_id(segment_id(kind, index))
                        .with_class(class_name(kind, "segment"))
                        .with_title(segment_title(segment))
                }
            }
        )*
    };
}

impl_segment_mark!(RectMark, CircleMark, LineMark, PathMark);

/// Segment percentages in order.
pub(crate) fn weights(segments: &[Segment]) -> Vec<f64> {
    segments.iter().map(|s| s.pct).collect()
}

/// Where `v` sits between `min` and `max`, as a fraction of the range.
///
/// Ranges too wide for an `f64` are measured at half scale. Callers ensure `max > min`.
pub(crate) fn unit_position(v: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.is_finite() {
        (v - min) / range
    } else {
        (v / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    }
}

/// The largest percentage, or `0` for an empty list.
pub(crate) fn max_pct(segments: &[Segment]) -> f64 {
    segments.iter().map(|s| s.pct).fold(0.0, f64::max)
}

/// `count` equal spans along a length, integer-snapped when `snap` is set.
pub(crate) fn equal_spans(count: usize, origin: f64, length: f64, gap: f64, snap: bool) -> Vec<Span> {
    let ones = alloc::vec![1.0; count];
    spans(&ones, origin, length, gap, snap)
}

/// Proportional spans, integer-snapped when `snap` is set.
pub(crate) fn spans(weights: &[f64], origin: f64, length: f64, gap: f64, snap: bool) -> Vec<Span> {
    if snap {
        snap_spans(weights, origin, length, gap)
    } else {
        partition(weights, origin, length, gap)
    }
}

/// Reduces `series` to `bins` values; each bin takes the maximum of the samples it covers.
///
/// When there are more bins than samples, bins repeat the nearest preceding sample.
pub(crate) fn bin_max(series: &[f64], bins: usize, magnitude: bool) -> Vec<f64> {
    let n = series.len();
    if n == 0 || bins == 0 {
        return Vec::new();
    }
    let value = |v: f64| if magnitude { v.abs() } else { v };
    (0..bins)
        .map(|k| {
            let start = k * n / bins;
            let end = ((k + 1) * n / bins).max(start + 1).min(n);
            series[start..end]
                .iter()
                .copied()
                .map(value)
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_insets_and_rejects_degenerate_sizes() {
        let r = plot_rect(Size::new(100.0, 20.0), 2.0).unwrap();
        assert_eq!(r, Rect::new(2.0, 2.0, 98.0, 18.0));
        assert!(plot_rect(Size::new(4.0, 20.0), 2.0).is_none());
        assert!(plot_rect(Size::new(0.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn segment_labels() {
        let s = Segment {
            name: String::from("Rust"),
            pct: 12.5,
            color: String::from("red"),
        };
        assert_eq!(segment_id("bar", 3), "bar-3");
        assert_eq!(segment_title(&s), "Rust: 12.5%");
        assert_eq!(class_name("bar", "segment"), "mv-bar-segment");
    }

    #[test]
    fn binning_takes_maxima() {
        assert_eq!(bin_max(&[1.0, 5.0, 2.0, 3.0], 2, false), [5.0, 3.0]);
        assert_eq!(bin_max(&[-4.0, 1.0], 1, true), [4.0]);
        assert_eq!(bin_max(&[1.0, 2.0], 4, false), [1.0, 1.0, 2.0, 2.0]);
    }
}
