// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area partitions: `stepped-area` and `layered-waves`.

use core::f64::consts::{FRAC_PI_3, TAU};

use kurbo::{BezPath, Point};
use microviz_core::{CURRENT_COLOR, PathMark, RectMark, svg_path_data};

use crate::data::{ChartData, Size};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::layout::{Layout, SegmentMark, class_name, max_pct, plot_rect, spans, weights};
use crate::options::Options;
use crate::partition::share_of;

/// Samples per plot width used to flatten wave edges.
const WAVE_SAMPLES: f64 = 48.0;

/// Upper bound on the `waves` option.
const MAX_WAVES: f64 = 16.0;

/// Columns whose width follows the share and whose height follows the share relative to the
/// largest one, topped by a single step outline.
pub(crate) fn stepped_area(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "stepped-area";
    let mut layout = Layout::new();
    let segments = data.segments();
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let gap = options.non_negative("gap", 0.0);
    let snap = options.flag("snap", false);
    let fill_opacity = options.clamped("fillOpacity", 1.0, 0.0, 1.0);
    let max = max_pct(segments);

    let spans = spans(&weights(segments), plot.x0, plot.width(), gap, snap);
    let mut outline = BezPath::new();
    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate() {
        let mut h = share_of(plot.height(), segment.pct, max);
        if snap {
            h = h.round();
        }
        let top = plot.y1 - h;
        layout.push(
            RectMark::new(span.start, top, span.len, h)
                .with_fill(&segment.color)
                .with_fill_opacity(fill_opacity)
                .segment(KIND, i, segment),
        );
        if i == 0 {
            outline.move_to(Point::new(span.start, top));
        } else {
            outline.line_to(Point::new(span.start, top));
        }
        outline.line_to(Point::new(span.end(), top));
    }

    if !spans.is_empty() && options.flag("outline", true) {
        layout.push(
            PathMark::stroked(
                svg_path_data(&outline),
                options.color("stroke", CURRENT_COLOR),
                options.non_negative("strokeWidth", 1.5),
            )
            .with_class(class_name(KIND, "outline")),
        );
    }
    layout
}

/// Overlapping layers that each reach the cumulative end of their segment, with a sinusoidal top
/// edge. The widest layer is painted first.
pub(crate) fn layered_waves(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "layered-waves";
    let mut layout = Layout::new();
    let segments = data.segments();
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let amplitude = options.clamped("amplitude", plot.height() * 0.1, 0.0, plot.height() / 2.0);
    let waves = options.clamped("waves", 2.0, 0.0, MAX_WAVES);
    let opacity = options.clamped("layerOpacity", 0.85, 0.0, 1.0);

    let spans = spans(&weights(segments), plot.x0, plot.width(), 0.0, false);
    let edge = |x: f64, phase: f64| {
        let t = (x - plot.x0) / plot.width();
        plot.y0 + amplitude + amplitude * (TAU * waves * t + phase).sin()
    };

    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate().rev() {
        let end = span.end();
        let phase = i as f64 * FRAC_PI_3;
        let share = (end - plot.x0) / plot.width();
        #[allow(clippy::cast_possible_truncation, reason = "bounded by WAVE_SAMPLES")]
        let steps = ((WAVE_SAMPLES * share).ceil() as usize).max(1);

        let mut path = BezPath::new();
        path.move_to(Point::new(plot.x0, plot.y1));
        path.line_to(Point::new(plot.x0, edge(plot.x0, phase)));
        for k in 1..=steps {
            let x = plot.x0 + (end - plot.x0) * k as f64 / steps as f64;
            path.line_to(Point::new(x, edge(x, phase)));
        }
        path.line_to(Point::new(end, plot.y1));
        path.close_path();

        layout.push(
            PathMark::new(svg_path_data(&path))
                .with_fill(&segment.color)
                .with_fill_opacity(opacity)
                .segment(KIND, i, segment),
        );
    }
    layout
}

#[cfg(test)]
mod tests {
    use microviz_core::Mark;
    use serde_json::json;

    use super::*;
    use crate::variants::test_util::{rects, segments};

    #[test]
    fn steps_scale_height_to_the_largest_share() {
        let spec = json!({});
        let l = stepped_area(&segments(&[50.0, 25.0]), Size::new(30.0, 20.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!((r[0].x, r[0].w, r[0].y, r[0].h), (0.0, 20.0, 0.0, 20.0));
        assert_eq!((r[1].x, r[1].w, r[1].y, r[1].h), (20.0, 10.0, 10.0, 10.0));
        let Some(Mark::Path(outline)) = l.marks.last() else {
            panic!("outline should be last");
        };
        assert_eq!(
            outline.d,
            "M 0.00 0.00 L 20.00 0.00 L 20.00 10.00 L 30.00 10.00"
        );
        assert_eq!(outline.fill, "none");
    }

    #[test]
    fn outline_can_be_disabled() {
        let spec = json!({ "outline": false });
        let l = stepped_area(&segments(&[1.0, 2.0]), Size::new(30.0, 20.0), &Options::new(&spec));
        assert_eq!(l.marks.len(), 2);
    }

    #[test]
    fn widest_wave_layer_paints_first() {
        let spec = json!({ "amplitude": 0 });
        let l = layered_waves(&segments(&[1.0, 1.0]), Size::new(40.0, 10.0), &Options::new(&spec));
        let ids: alloc::vec::Vec<_> = l.marks.iter().filter_map(Mark::id).collect();
        assert_eq!(ids, ["layered-waves-1", "layered-waves-0"]);
        let Mark::Path(narrow) = &l.marks[1] else {
            panic!("layers are paths");
        };
        // Flat top with zero amplitude; the first layer ends at half the width.
        assert!(narrow.d.starts_with("M 0.00 10.00 L 0.00 0.00"));
        assert!(narrow.d.ends_with("L 20.00 0.00 L 20.00 10.00 Z"));
    }

    #[test]
    fn wave_edges_stay_inside_the_plot() {
        let spec = json!({ "amplitude": 100, "waves": 3 });
        let l = layered_waves(&segments(&[3.0, 1.0]), Size::new(50.0, 12.0), &Options::new(&spec));
        for m in &l.marks {
            let Mark::Path(p) = m else { continue };
            for tok in p.d.split(' ') {
                if let Ok(v) = tok.parse::<f64>() {
                    assert!((-0.001..=50.001).contains(&v), "{v} in {}", p.d);
                }
            }
        }
    }
}
