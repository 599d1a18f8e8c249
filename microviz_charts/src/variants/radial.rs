// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial layouts: `donut`, `segmented-ring`, `nano-ring`, `concentric-arcs`, and `radial-bars`.
//!
//! Sweeps are fractions of a full turn, clockwise from 12 o'clock. Ring variants draw arcs as
//! dashed stroked circles; `donut` emits explicit slice outlines. No data means no marks: there
//! is never a placeholder full circle.

use kurbo::{Point, Rect};
use microviz_core::{CURRENT_COLOR, CircleMark, LineMark, PathMark, svg_path_data};

use crate::arc::{polar, ring_dash, slice_path};
use crate::data::{ChartData, Segment, Size};
use crate::layout::{Layout, SegmentMark, class_name, max_pct, plot_rect, weights};
use crate::options::Options;
use crate::partition::{scaled_weights, share_of, total};

/// Opacity of unfilled ring tracks.
const TRACK_OPACITY: f64 = 0.15;

/// Center and outer radius of the largest circle that fits the plot.
fn circle_in(plot: Rect) -> (Point, f64) {
    (plot.center(), plot.width().min(plot.height()) / 2.0)
}

/// A visible segment's position around the circle.
struct Sector<'a> {
    index: usize,
    segment: &'a Segment,
    start: f64,
    sweep: f64,
}

/// Walks the non-zero segments, yielding each one's start and sweep in turns.
///
/// `gap` (in turns) is split evenly on both sides of every sector when more than one is visible.
fn sectors(segments: &[Segment], gap: f64) -> impl Iterator<Item = Sector<'_>> {
    let scaled = scaled_weights(&weights(segments), 1.0);
    let total = total(&scaled);
    let visible = segments.iter().filter(|s| s.pct > 0.0).count();
    let gap = if visible > 1 { gap.clamp(0.0, 1.0 / visible as f64) } else { 0.0 };
    let mut cum = 0.0;
    segments
        .iter()
        .zip(scaled)
        .enumerate()
        .filter(move |_| total > 0.0)
        .filter_map(move |(index, (segment, weight))| {
            if segment.pct <= 0.0 {
                return None;
            }
            let share = weight / total;
            let start = cum;
            cum += share;
            Some(Sector {
                index,
                segment,
                start: start + gap / 2.0,
                sweep: (share - gap).max(0.0),
            })
        })
}

fn degrees_to_turns(degrees: f64) -> f64 {
    degrees / 360.0
}

/// Explicit annular slices.
pub(crate) fn donut(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "donut";
    let mut layout = Layout::new();
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let (center, outer) = circle_in(plot);
    let thickness = options.clamped("thickness", outer * 0.4, 0.0, outer);
    let pad = degrees_to_turns(options.clamped("padAngle", 0.0, 0.0, 360.0));

    for sector in sectors(data.segments(), pad) {
        let path = slice_path(center, outer, outer - thickness, sector.start, sector.sweep);
        layout.push(
            PathMark::new(svg_path_data(&path))
                .with_fill(&sector.segment.color)
                .segment(KIND, sector.index, sector.segment),
        );
    }
    layout
}

/// Ring geometry shared by the dashed-circle variants.
struct Ring {
    center: Point,
    radius: f64,
    width: f64,
}

impl Ring {
    /// A ring of stroke `width` inscribed in the plot.
    fn inscribed(plot: Rect, width: f64) -> Self {
        let (center, outer) = circle_in(plot);
        let width = width.clamp(0.0, outer);
        Self {
            center,
            radius: outer - width / 2.0,
            width,
        }
    }

    fn arc(&self, color: &str, start: f64, sweep: f64) -> CircleMark {
        let (dasharray, offset) = ring_dash(self.radius, start, sweep);
        CircleMark::ring(self.center.x, self.center.y, self.radius, color, self.width)
            .with_dash(dasharray, offset)
    }

    fn track(&self, kind: &str, color: &str, opacity: f64) -> CircleMark {
        CircleMark::ring(self.center.x, self.center.y, self.radius, color, self.width)
            .with_stroke_opacity(opacity)
            .with_class(class_name(kind, "track"))
    }
}

fn outer_radius(size: Size, options: &Options<'_>) -> Option<(Rect, f64)> {
    let plot = plot_rect(size, options.non_negative("pad", 0.0))?;
    let (_, outer) = circle_in(plot);
    Some((plot, outer))
}

/// One dashed arc per segment, separated by an angular `gap` (degrees).
pub(crate) fn segmented_ring(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "segmented-ring";
    let mut layout = Layout::new();
    let Some((plot, outer)) = outer_radius(size, options) else {
        return layout;
    };
    let ring = Ring::inscribed(plot, options.non_negative("thickness", outer * 0.25));
    let gap = degrees_to_turns(options.clamped("gap", 4.0, 0.0, 360.0));
    for sector in sectors(data.segments(), gap) {
        layout.push(
            ring.arc(&sector.segment.color, sector.start, sector.sweep)
                .segment(KIND, sector.index, sector.segment),
        );
    }
    layout
}

/// A compact ring: a faint full track with contiguous arcs on top.
pub(crate) fn nano_ring(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "nano-ring";
    let mut layout = Layout::new();
    let Some((plot, outer)) = outer_radius(size, options) else {
        return layout;
    };
    let ring = Ring::inscribed(plot, options.non_negative("thickness", outer * 0.2));
    let mut sectors = sectors(data.segments(), 0.0).peekable();
    if sectors.peek().is_none() {
        return layout;
    }
    let track_color = options.color("trackColor", CURRENT_COLOR);
    let track_opacity = options.clamped("trackOpacity", TRACK_OPACITY, 0.0, 1.0);
    layout.push(ring.track(KIND, &track_color, track_opacity));
    for sector in sectors {
        layout.push(
            ring.arc(&sector.segment.color, sector.start, sector.sweep)
                .segment(KIND, sector.index, sector.segment),
        );
    }
    layout
}

/// One ring per segment, outermost first, each sweeping `pct / max` of a turn.
pub(crate) fn concentric_arcs(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "concentric-arcs";
    let mut layout = Layout::new();
    let segments = data.segments();
    if segments.is_empty() {
        return layout;
    }
    let Some((plot, outer)) = outer_radius(size, options) else {
        return layout;
    };
    let n = segments.len() as f64;
    let gap = options.non_negative("gap", 1.0);
    let default_thickness = ((outer * 0.8 - gap * (n - 1.0)) / n).max(0.0);
    let thickness = options.clamped("thickness", default_thickness, 0.0, outer);
    let max = options.number("max", 100.0);
    let max = if max > 0.0 { max } else { 100.0 };
    let tracks = options.flag("tracks", true);
    let track_color = options.color("trackColor", CURRENT_COLOR);
    let track_opacity = options.clamped("trackOpacity", TRACK_OPACITY, 0.0, 1.0);
    let center = plot.center();

    for (i, segment) in segments.iter().enumerate() {
        let radius = outer - thickness * (i as f64 + 0.5) - gap * i as f64;
        if radius <= 0.0 {
            break;
        }
        let ring = Ring {
            center,
            radius,
            width: thickness,
        };
        if tracks {
            layout.push(ring.track(KIND, &track_color, track_opacity));
        }
        layout.push(
            ring.arc(&segment.color, 0.0, (segment.pct / max).clamp(0.0, 1.0))
                .segment(KIND, i, segment),
        );
    }
    layout
}

/// Evenly spaced spokes whose length follows each share relative to the largest one.
pub(crate) fn radial_bars(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "radial-bars";
    let mut layout = Layout::new();
    let segments = data.segments();
    let max = max_pct(segments);
    if segments.is_empty() || max <= 0.0 {
        return layout;
    }
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let (center, outer) = circle_in(plot);
    let stroke_width = options.clamped("strokeWidth", 2.0, 0.0, outer);
    let inner = options.clamped("innerRadius", outer * 0.3, 0.0, outer);
    // Round caps overhang the end point by half the stroke width.
    let available = (outer - inner - stroke_width / 2.0).max(0.0);
    let min_length = options.non_negative("minLength", 2.0).min(available);
    let linecap = options.text("linecap").unwrap_or("round");

    let n = segments.len() as f64;
    for (i, segment) in segments.iter().enumerate() {
        let mut length = share_of(available, segment.pct, max);
        if segment.pct > 0.0 {
            length = length.max(min_length);
        }
        let turns = i as f64 / n;
        let from = polar(center, inner, turns);
        let to = polar(center, inner + length, turns);
        layout.push(
            LineMark::new(from.x, from.y, to.x, to.y)
                .with_stroke(&segment.color, stroke_width)
                .with_linecap(linecap)
                .segment(KIND, i, segment),
        );
    }
    layout
}
