// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series lines: `sparkline` and `range-band`.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use microviz_core::{CURRENT_COLOR, CircleMark, ClipRectDef, PathMark, svg_path_data};

use crate::data::{ChartData, Size};
use crate::layout::{Layout, class_name, plot_rect, unit_position};
use crate::options::Options;
use crate::prng::{Mulberry32, seed_from_series};

/// Maps a series onto the plot: evenly spaced in x, min..max stretched over the height.
///
/// A single value sits at the horizontal center; a flat series sits on the mid-line.
fn project(series: &[f64], plot: Rect) -> Vec<Point> {
    let n = series.len();
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = if n > 1 { plot.width() / (n - 1) as f64 } else { 0.0 };
    series
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = if n > 1 {
                plot.x0 + step * i as f64
            } else {
                plot.center().x
            };
            let y = if max > min {
                plot.y1 - unit_position(v, min, max) * plot.height()
            } else {
                plot.center().y
            };
            Point::new(x, y)
        })
        .collect()
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(*p);
        } else {
            path.line_to(*p);
        }
    }
    path
}

/// The plot inset vertically by half the stroke width, so peaks are not clipped.
fn line_plot(size: Size, options: &Options<'_>, stroke_width: f64) -> Option<Rect> {
    let plot = plot_rect(size, options.non_negative("pad", 0.0))?;
    let half = (stroke_width / 2.0).min(plot.height() / 2.0);
    Some(Rect::new(plot.x0, plot.y0 + half, plot.x1, plot.y1 - half))
}

/// A polyline through the series, with an optional filled area and end dot.
pub(crate) fn sparkline(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "sparkline";
    let mut layout = Layout::new();
    let series = data.series();
    if series.is_empty() {
        return layout;
    }
    let stroke_width = options.non_negative("strokeWidth", 1.5);
    let Some(plot) = line_plot(size, options, stroke_width) else {
        return layout;
    };
    let color = options.color("color", CURRENT_COLOR);
    let points = project(series, plot);

    if options.flag("area", false) {
        let mut area = polyline(&points);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            area.line_to(Point::new(last.x, plot.y1));
            area.line_to(Point::new(first.x, plot.y1));
            area.close_path();
        }
        layout.push(
            PathMark::new(svg_path_data(&area))
                .with_fill(&color)
                .with_fill_opacity(options.clamped("areaOpacity", 0.2, 0.0, 1.0))
                .with_class(class_name(KIND, "area")),
        );
    }

    layout.push(
        PathMark::stroked(svg_path_data(&polyline(&points)), &color, stroke_width)
            .with_class(class_name(KIND, "line")),
    );

    if let Some(last) = points.last().filter(|_| options.flag("dot", false)) {
        let r = options.non_negative("dotRadius", stroke_width.max(2.0));
        layout.push(
            CircleMark::new(last.x, last.y, r)
                .with_fill(&color)
                .with_class(class_name(KIND, "dot")),
        );
    }
    layout
}

/// A center line inside a seeded, jittered band, clipped to the plot.
///
/// The band's half-width at each point is `bandWidth / 2` scaled by a factor in `[0.5, 1.5)`
/// drawn from a [`Mulberry32`] seeded by `bandSeed` (or by the series itself when absent), so the
/// same data and seed always give the same path.
pub(crate) fn range_band(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "range-band";
    let mut layout = Layout::new();
    let series = data.series();
    if series.is_empty() {
        return layout;
    }
    let Some(outer) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let band_width = options.clamped("bandWidth", outer.height() * 0.3, 0.0, outer.height());
    let stroke_width = options.non_negative("strokeWidth", 1.5);
    let half = band_width / 2.0;
    let inner = Rect::new(
        outer.x0,
        outer.y0 + half.min(outer.height() / 2.0),
        outer.x1,
        outer.y1 - half.min(outer.height() / 2.0),
    );
    let color = options.color("color", CURRENT_COLOR);
    let points = project(series, inner);

    let seed = options
        .seed("bandSeed")
        .unwrap_or_else(|| seed_from_series(series));
    let mut rng = Mulberry32::new(seed);
    let offsets: Vec<(f64, f64)> = points
        .iter()
        .map(|_| {
            let up = half * (0.5 + rng.next_f64());
            let down = half * (0.5 + rng.next_f64());
            (up, down)
        })
        .collect();

    let mut band = BezPath::new();
    for (i, (p, (up, _))) in points.iter().zip(&offsets).enumerate() {
        let q = Point::new(p.x, p.y - up);
        if i == 0 {
            band.move_to(q);
        } else {
            band.line_to(q);
        }
    }
    for (p, (_, down)) in points.iter().zip(&offsets).rev() {
        band.line_to(Point::new(p.x, p.y + down));
    }
    band.close_path();

    let clip_id = alloc::format!("{KIND}-clip");
    layout.push_def(ClipRectDef {
        id: clip_id.clone(),
        x: outer.x0,
        y: outer.y0,
        w: outer.width(),
        h: outer.height(),
    });
    layout.push(
        PathMark::new(svg_path_data(&band))
            .with_fill(&color)
            .with_fill_opacity(options.clamped("bandOpacity", 0.2, 0.0, 1.0))
            .with_clip_path(&clip_id)
            .with_class(class_name(KIND, "band")),
    );
    layout.push(
        PathMark::stroked(svg_path_data(&polyline(&points)), &color, stroke_width)
            .with_clip_path(&clip_id)
            .with_class(class_name(KIND, "line")),
    );
    layout
}
