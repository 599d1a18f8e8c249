// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floored pills: `pixel-pill` and `stacked-chips`.
//!
//! Both guarantee that a non-zero segment never renders below a minimum length, trading strict
//! proportionality for visibility of tiny shares.

extern crate alloc;

use alloc::vec::Vec;

use microviz_core::RectMark;

use crate::data::{ChartData, Segment, Size};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::layout::{Layout, SegmentMark, max_pct, plot_rect};
use crate::options::Options;
use crate::partition::{partition_with_floor, share_of, snap_lengths};

/// A row of pills, one per non-zero segment, each at least `minPx` wide.
pub(crate) fn pixel_pill(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "pixel-pill";
    let mut layout = Layout::new();
    let snap = options.flag("snap", true);
    let Some(mut plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    if snap {
        plot = plot.round();
    }
    let visible: Vec<(usize, &Segment)> = data
        .segments()
        .iter()
        .enumerate()
        .filter(|(_, s)| s.pct > 0.0)
        .collect();
    if visible.is_empty() {
        return layout;
    }
    let gap = options.non_negative("gap", 1.0);
    let gap = if snap { gap.round() } else { gap };
    let min = options.non_negative("minPx", 2.0);
    // Snapping floors lengths, so the floor itself must be whole.
    let min = if snap { min.ceil() } else { min };
    let radius = options
        .non_negative("radius", plot.height() / 2.0)
        .min(plot.height() / 2.0);

    let weights: Vec<f64> = visible.iter().map(|(_, s)| s.pct).collect();
    let mut lengths: Vec<f64> = partition_with_floor(&weights, plot.x0, plot.width(), gap, min)
        .iter()
        .map(|s| s.len)
        .collect();
    if snap {
        let usable = (plot.width() - gap * (lengths.len() - 1) as f64).max(0.0);
        lengths = snap_lengths(&lengths, usable);
    }

    let mut x = plot.x0;
    for ((index, segment), len) in visible.into_iter().zip(lengths) {
        layout.push(
            RectMark::new(x, plot.y0, len, plot.height())
                .with_radius(radius.min(len / 2.0))
                .with_fill(&segment.color)
                .segment(KIND, index, segment),
        );
        x += len + gap;
    }
    layout
}

/// One chip per segment stacked in rows, width following the share relative to the largest one
/// with a `minLength` floor.
pub(crate) fn stacked_chips(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "stacked-chips";
    let mut layout = Layout::new();
    let segments = data.segments();
    let max = max_pct(segments);
    if segments.is_empty() || max <= 0.0 {
        return layout;
    }
    let snap = options.flag("snap", false);
    let Some(mut plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    if snap {
        plot = plot.round();
    }
    let n = segments.len() as f64;
    let gap = options.non_negative("gap", 2.0);
    let row = ((plot.height() - gap * (n - 1.0)) / n).max(0.0);
    let min = options.non_negative("minLength", 4.0);
    let min = if snap { min.ceil() } else { min };
    let min = min.min(plot.width());
    let radius = options.non_negative("radius", row / 2.0).min(row / 2.0);

    for (i, segment) in segments.iter().enumerate() {
        let mut w = share_of(plot.width(), segment.pct, max);
        if segment.pct > 0.0 {
            w = w.max(min);
        }
        let mut y = plot.y0 + i as f64 * (row + gap);
        let mut h = row;
        if snap {
            w = w.round();
            y = y.round();
            h = h.round();
        }
        layout.push(
            RectMark::new(plot.x0, y, w, h)
                .with_radius(radius.min(w / 2.0))
                .with_fill(&segment.color)
                .segment(KIND, i, segment),
        );
    }
    layout
}
