// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell grids: `pixel-grid`, `heatgrid`, `bitfield`, and `dot-matrix`.
//!
//! Cells are filled row-major. Grid dimensions are clamped to [`MAX_CELLS_PER_AXIS`] per axis, so
//! the number of marks is bounded by the declared `cols`/`rows`/`bits`/`dots`.

extern crate alloc;

use kurbo::Rect;
use microviz_core::{CURRENT_COLOR, CircleMark, RectMark, format_number};

use crate::allocate::{allocate, bin_sequence};
use crate::data::{ChartData, Size};
use crate::layout::{
    Layout, class_name, equal_spans, plot_rect, segment_title, unit_position, weights,
};
use crate::options::Options;

/// Upper bound on `cols` and `rows`.
pub(crate) const MAX_CELLS_PER_AXIS: usize = 64;

/// Upper bound on `bits`.
pub(crate) const MAX_BITS: usize = 256;

/// Upper bound on `dots`.
pub(crate) const MAX_DOTS: usize = 400;

/// Lowest derived heat opacity, so the smallest value is still visible.
const MIN_HEAT_OPACITY: f64 = 0.1;

#[derive(Clone, Debug)]
struct GridOptions {
    pad: f64,
    gap: f64,
    snap: bool,
    radius: f64,
}

impl GridOptions {
    fn read(options: &Options<'_>) -> Self {
        Self {
            pad: options.non_negative("pad", 0.0),
            gap: options.non_negative("gap", 1.0),
            snap: options.flag("snap", true),
            radius: options.non_negative("radius", 0.0),
        }
    }

    fn plot(&self, size: Size) -> Option<Rect> {
        let plot = plot_rect(size, self.pad)?;
        Some(if self.snap { plot.round() } else { plot })
    }

    /// Calls `cell` with the rect of each of the first `count` cells of a `cols`-wide grid.
    fn cells(&self, plot: Rect, cols: usize, count: usize, mut cell: impl FnMut(usize, Rect)) {
        let rows = count.div_ceil(cols);
        let xs = equal_spans(cols, plot.x0, plot.width(), self.gap, self.snap);
        let ys = equal_spans(rows, plot.y0, plot.height(), self.gap, self.snap);
        for k in 0..count {
            let (x, y) = (&xs[k % cols], &ys[k / cols]);
            cell(k, Rect::new(x.start, y.start, x.end(), y.end()));
        }
    }
}

fn rows_for(count: usize, cols: usize) -> usize {
    count.div_ceil(cols.max(1))
}

/// A `cols` × `rows` grid of cells allocated to segments by share.
pub(crate) fn pixel_grid(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "pixel-grid";
    let mut layout = Layout::new();
    let segments = data.segments();
    let opts = GridOptions::read(options);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let cols = options.count("cols", 10, 1, MAX_CELLS_PER_AXIS);
    let rows = options.count("rows", 10, 1, MAX_CELLS_PER_AXIS);

    let counts = allocate(&weights(segments), cols * rows, true);
    let sequence = bin_sequence(&counts, options.flag("interleave", false));
    opts.cells(plot, cols, sequence.len(), |k, cell| {
        let segment = &segments[sequence[k]];
        layout.push(
            RectMark::new(cell.x0, cell.y0, cell.width(), cell.height())
                .with_radius(opts.radius)
                .with_fill(&segment.color)
                .with_class(class_name(KIND, "cell"))
                .with_title(segment_title(segment)),
        );
    });
    layout
}

/// One cell per value; opacity follows the value's position between the series min and max,
/// unless an explicit per-cell opacity is given.
pub(crate) fn heatgrid(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "heatgrid";
    let mut layout = Layout::new();
    let ChartData::Heat(heat) = data else {
        return layout;
    };
    let opts = GridOptions::read(options);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let n = heat.series.len();
    let cols = options.count("cols", n.min(24), 1, MAX_CELLS_PER_AXIS);
    let rows = rows_for(n, cols).min(MAX_CELLS_PER_AXIS);
    let count = n.min(cols * rows);
    let color = options.color("color", CURRENT_COLOR);

    let min = heat.series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = heat.series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    opts.cells(plot, cols, count, |k, cell| {
        let v = heat.series[k];
        let derived = if max > min {
            MIN_HEAT_OPACITY + (1.0 - MIN_HEAT_OPACITY) * unit_position(v, min, max)
        } else {
            1.0
        };
        let opacity = heat.opacities.get(k).copied().flatten().unwrap_or(derived);
        layout.push(
            RectMark::new(cell.x0, cell.y0, cell.width(), cell.height())
                .with_radius(opts.radius)
                .with_fill(&color)
                .with_fill_opacity(opacity)
                .with_class(class_name(KIND, "cell"))
                .with_title(format_number(v, 2)),
        );
    });
    layout
}

/// One on/off cell per value (non-zero is on), up to `bits` cells.
pub(crate) fn bitfield(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "bitfield";
    let mut layout = Layout::new();
    let series = data.series();
    if series.is_empty() {
        return layout;
    }
    let opts = GridOptions::read(options);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let bits = options
        .count("bits", series.len(), 1, MAX_BITS)
        .min(series.len());
    let cols = options.count("cols", bits, 1, MAX_CELLS_PER_AXIS);
    let count = bits.min(cols * MAX_CELLS_PER_AXIS);
    let color = options.color("color", CURRENT_COLOR);
    let on = options.clamped("onOpacity", 1.0, 0.0, 1.0);
    let off = options.clamped("offOpacity", 0.15, 0.0, 1.0);

    opts.cells(plot, cols, count, |k, cell| {
        let set = series[k] != 0.0;
        layout.push(
            RectMark::new(cell.x0, cell.y0, cell.width(), cell.height())
                .with_radius(opts.radius)
                .with_fill(&color)
                .with_fill_opacity(if set { on } else { off })
                .with_class(class_name(KIND, if set { "on" } else { "off" })),
        );
    });
    layout
}

/// `dots` circles in `cols` columns, allocated to segments by share.
pub(crate) fn dot_matrix(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "dot-matrix";
    let mut layout = Layout::new();
    let segments = data.segments();
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let cols = options.count("cols", 10, 1, MAX_CELLS_PER_AXIS);
    let dots = options
        .count("dots", 20, 1, MAX_DOTS)
        .min(cols * MAX_CELLS_PER_AXIS);
    let rows = rows_for(dots, cols);
    let gap = options.non_negative("gap", 1.0);

    let counts = allocate(&weights(segments), dots, true);
    let sequence = bin_sequence(&counts, options.flag("interleave", false));
    let cw = plot.width() / cols as f64;
    let ch = plot.height() / rows as f64;
    let r = ((cw.min(ch) - gap) / 2.0).max(0.0);
    for (k, &s) in sequence.iter().enumerate() {
        let segment = &segments[s];
        let cx = plot.x0 + ((k % cols) as f64 + 0.5) * cw;
        let cy = plot.y0 + ((k / cols) as f64 + 0.5) * ch;
        layout.push(
            CircleMark::new(cx, cy, r)
                .with_fill(&segment.color)
                .with_class(class_name(KIND, "dot"))
                .with_title(segment_title(segment)),
        );
    }
    layout
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use microviz_core::Mark;
    use serde_json::json;

    use super::*;
    use crate::data::Heat;
    use crate::variants::test_util::{is_whole, rects, segments};

    #[test]
    fn pixel_grid_fills_rows_first_with_whole_pixels() {
        let spec = json!({ "cols": 4, "rows": 2, "gap": 0 });
        let l = pixel_grid(&segments(&[75.0, 25.0]), Size::new(40.0, 20.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!(r.len(), 8);
        assert_eq!((r[0].x, r[0].y, r[0].w, r[0].h), (0.0, 0.0, 10.0, 10.0));
        assert_eq!((r[4].x, r[4].y), (0.0, 10.0));
        assert_eq!(r.iter().filter(|r| r.fill == "c1").count(), 2);
        assert!(r.iter().all(|r| is_whole(r.x) && is_whole(r.w)));
    }

    #[test]
    fn pixel_grid_default_is_ten_by_ten() {
        let spec = json!({});
        let l = pixel_grid(&segments(&[1.0]), Size::new(109.0, 109.0), &Options::new(&spec));
        assert_eq!(l.marks.len(), 100);
    }

    #[test]
    fn heat_opacity_spans_min_to_max_with_overrides() {
        let spec = json!({ "cols": 3 });
        let data = ChartData::Heat(Heat {
            series: vec![0.0, 5.0, 10.0],
            opacities: vec![None, None, Some(0.3)],
        });
        let l = heatgrid(&data, Size::new(32.0, 10.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!(r[0].fill_opacity, Some(MIN_HEAT_OPACITY));
        assert_eq!(r[1].fill_opacity, Some(0.55));
        assert_eq!(r[2].fill_opacity, Some(0.3));
        assert_eq!(r[1].title.as_deref(), Some("5"));
    }

    #[test]
    fn heatgrid_wraps_rows() {
        let spec = json!({ "cols": 2 });
        let data = ChartData::Heat(Heat {
            series: vec![1.0; 5],
            opacities: vec![None; 5],
        });
        let l = heatgrid(&data, Size::new(21.0, 32.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!(r.len(), 5);
        assert_eq!(r[4].y, 22.0);
        assert_eq!(r[4].fill_opacity, None);
    }

    #[test]
    fn bitfield_marks_set_bits() {
        let spec = json!({ "bits": 3 });
        let data = ChartData::Series(vec![1.0, 0.0, 2.0, 1.0]);
        let l = bitfield(&data, Size::new(32.0, 10.0), &Options::new(&spec));
        let classes: Vec<_> = l.marks.iter().filter_map(Mark::class_name).collect();
        assert_eq!(classes, ["mv-bitfield-on", "mv-bitfield-off", "mv-bitfield-on"]);
    }

    #[test]
    fn dot_matrix_lays_out_circles_in_columns() {
        let spec = json!({ "dots": 4, "cols": 2, "gap": 0 });
        let l = dot_matrix(&segments(&[1.0, 1.0]), Size::new(20.0, 20.0), &Options::new(&spec));
        let circles: Vec<_> = l
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Circle(c) => Some((c.cx, c.cy, c.r, c.fill.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            circles,
            [
                (5.0, 5.0, 5.0, "c0"),
                (15.0, 5.0, 5.0, "c0"),
                (5.0, 15.0, 5.0, "c1"),
                (15.0, 15.0, 5.0, "c1"),
            ]
        );
    }

    #[test]
    fn empty_grids_draw_nothing() {
        let spec = json!({});
        let o = Options::new(&spec);
        for f in [pixel_grid, heatgrid, bitfield, dot_matrix] {
            assert!(f(&ChartData::Empty, Size::new(50.0, 50.0), &o).is_empty());
        }
    }
}
