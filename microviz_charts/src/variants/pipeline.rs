// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `pipeline`: directional stages whose tips overlap the next stage.

use kurbo::{BezPath, Point};
use microviz_core::{PathMark, svg_path_data};

use crate::data::{ChartData, Size};
use crate::layout::{Layout, SegmentMark, plot_rect, spans, weights};
use crate::options::Options;

const KIND: &str = "pipeline";

/// Default tip length as a fraction of the plot height.
const DEFAULT_OVERLAP: f64 = 0.4;

/// Chevron-shaped stages laid out left to right.
///
/// Every stage but the last ends in a tip that reaches `overlap` pixels into its successor. Marks
/// are emitted last stage first so each tip paints over the stage after it. With `notch`, stages
/// after the first are cut in at the left to receive the previous tip.
pub(crate) fn pipeline(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    let mut layout = Layout::new();
    let segments = data.segments();
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let overlap = options.non_negative("overlap", plot.height() * DEFAULT_OVERLAP);
    let gap = options.non_negative("gap", 0.0);
    let notch = options.flag("notch", false);
    let snap = options.flag("snap", false);

    let spans = spans(&weights(segments), plot.x0, plot.width(), gap, snap);
    let last = spans.len().saturating_sub(1);
    let mid = plot.y0 + plot.height() / 2.0;
    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate().rev() {
        let (x0, x1) = (span.start, span.end());
        let mut path = BezPath::new();
        path.move_to(Point::new(x0, plot.y0));
        path.line_to(Point::new(x1, plot.y0));
        if i != last {
            path.line_to(Point::new(x1 + overlap, mid));
        }
        path.line_to(Point::new(x1, plot.y1));
        path.line_to(Point::new(x0, plot.y1));
        if notch && i != 0 {
            path.line_to(Point::new(x0 + overlap, mid));
        }
        path.close_path();

        layout.push(
            PathMark::new(svg_path_data(&path))
                .with_fill(&segment.color)
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
    use crate::variants::test_util::segments;

    fn path_of<'a>(layout: &'a Layout, id: &str) -> &'a str {
        match layout.marks.iter().find(|m| m.id() == Some(id)) {
            Some(Mark::Path(p)) => &p.d,
            other => panic!("no path {id}: {other:?}"),
        }
    }

    #[test]
    fn stage_paths_match_the_chevron_formula() {
        let spec = json!({ "overlap": 8, "pad": 0 });
        let l = pipeline(
            &segments(&[50.0, 30.0, 20.0]),
            Size::new(100.0, 10.0),
            &Options::new(&spec),
        );
        assert_eq!(
            path_of(&l, "pipeline-0"),
            "M 0.00 0.00 L 50.00 0.00 L 58.00 5.00 L 50.00 10.00 L 0.00 10.00 Z"
        );
        assert_eq!(
            path_of(&l, "pipeline-2"),
            "M 80.00 0.00 L 100.00 0.00 L 100.00 10.00 L 80.00 10.00 Z"
        );
    }

    #[test]
    fn stages_paint_last_to_first() {
        let spec = json!({});
        let l = pipeline(&segments(&[1.0, 1.0, 1.0]), Size::new(90.0, 10.0), &Options::new(&spec));
        let ids: alloc::vec::Vec<_> = l.marks.iter().filter_map(Mark::id).collect();
        assert_eq!(ids, ["pipeline-2", "pipeline-1", "pipeline-0"]);
        // Default overlap is 0.4 of the height.
        assert!(path_of(&l, "pipeline-0").contains("L 34.00 5.00"));
    }

    #[test]
    fn notched_stages_receive_the_previous_tip() {
        let spec = json!({ "overlap": 4, "notch": true });
        let l = pipeline(&segments(&[1.0, 1.0]), Size::new(40.0, 10.0), &Options::new(&spec));
        assert_eq!(
            path_of(&l, "pipeline-1"),
            "M 20.00 0.00 L 40.00 0.00 L 40.00 10.00 L 20.00 10.00 L 24.00 5.00 Z"
        );
    }

    #[test]
    fn a_single_stage_is_flat() {
        let spec = json!({});
        let l = pipeline(&segments(&[5.0]), Size::new(10.0, 4.0), &Options::new(&spec));
        assert_eq!(path_of(&l, "pipeline-0"), "M 0.00 0.00 L 10.00 0.00 L 10.00 4.00 L 0.00 4.00 Z");
    }
}
