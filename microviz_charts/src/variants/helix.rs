// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `dna-helix`: two woven strands with segment-colored rungs.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::TAU;

use kurbo::{BezPath, Point};
use microviz_core::{CURRENT_COLOR, LineMark, PathMark, svg_path_data};

use crate::allocate::{allocate, bin_sequence};
use crate::data::{ChartData, Size};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::layout::{Layout, class_name, plot_rect, segment_title, weights};
use crate::options::Options;

const KIND: &str = "dna-helix";

/// Upper bound on `rungs`.
pub(crate) const MAX_RUNGS: usize = 120;

/// Upper bound on `turns`.
pub(crate) const MAX_TURNS: f64 = 16.0;

/// Line segments per half turn of strand.
const STRAND_SAMPLES: usize = 12;

/// Two sinusoidal strands crossing every half turn, with rungs between them.
///
/// Each half turn is drawn back strand, then its rungs, then front strand; the strand in front
/// alternates at every crossing. Rungs are allocated to segments like barcode bins.
pub(crate) fn dna_helix(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    let mut layout = Layout::new();
    let segments = data.segments();
    let Some(plot) = plot_rect(size, options.non_negative("pad", 0.0)) else {
        return layout;
    };
    let turns = options.clamped("turns", 2.0, 0.5, MAX_TURNS);
    let rung_count = options.count("rungs", 24, 1, MAX_RUNGS);
    let strand_width = options.non_negative("strandWidth", 1.5);
    let rung_width = options.non_negative("rungWidth", 1.5);
    let strand_color = options.color("strandColor", CURRENT_COLOR);
    let back_opacity = options.clamped("backOpacity", 0.45, 0.0, 1.0);

    let counts = allocate(&weights(segments), rung_count, true);
    let sequence = bin_sequence(&counts, options.flag("interleave", false));
    if sequence.is_empty() {
        return layout;
    }

    let mid = plot.center().y;
    let amplitude = (plot.height() / 2.0 - strand_width / 2.0).max(0.0);
    let strand = |x: f64, sign: f64| {
        let phase = TAU * turns * (x - plot.x0) / plot.width();
        mid + sign * amplitude * phase.sin()
    };
    let half_width = plot.width() / (2.0 * turns);
    #[allow(clippy::cast_possible_truncation, reason = "turns is at most MAX_TURNS")]
    let halves = (2.0 * turns).ceil() as usize;

    let rung_step = plot.width() / sequence.len() as f64;
    let mut rungs = sequence
        .iter()
        .enumerate()
        .map(|(j, &s)| (plot.x0 + (j as f64 + 0.5) * rung_step, s))
        .peekable();

    for k in 0..halves {
        let from = plot.x0 + k as f64 * half_width;
        let to = (from + half_width).min(plot.x1);
        let (front, back) = if k % 2 == 0 { (1.0, -1.0) } else { (-1.0, 1.0) };

        layout.push(
            PathMark::stroked(strand_piece(&strand, back, from, to), &strand_color, strand_width)
                .with_stroke_opacity(back_opacity)
                .with_class(class_name(KIND, "strand-back")),
        );
        let last = k + 1 == halves;
        while let Some((x, s)) = rungs.next_if(|(x, _)| *x < to || last) {
            let segment = &segments[s];
            layout.push(
                LineMark::new(x, strand(x, 1.0), x, strand(x, -1.0))
                    .with_stroke(&segment.color, rung_width)
                    .with_class(class_name(KIND, "rung"))
                    .with_title(segment_title(segment)),
            );
        }
        layout.push(
            PathMark::stroked(strand_piece(&strand, front, from, to), &strand_color, strand_width)
                .with_class(class_name(KIND, "strand-front")),
        );
    }
    layout
}

fn strand_piece(strand: &impl Fn(f64, f64) -> f64, sign: f64, from: f64, to: f64) -> String {
    let points: Vec<Point> = (0..=STRAND_SAMPLES)
        .map(|i| {
            let x = from + (to - from) * i as f64 / STRAND_SAMPLES as f64;
            Point::new(x, strand(x, sign))
        })
        .collect();
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    svg_path_data(&path)
}

#[cfg(test)]
mod tests {
    use microviz_core::Mark;
    use serde_json::json;

    use super::*;
    use crate::variants::test_util::segments;

    fn classes(layout: &Layout) -> Vec<&str> {
        layout.marks.iter().filter_map(Mark::class_name).collect()
    }

    #[test]
    fn halves_alternate_back_rungs_front() {
        let spec = json!({ "turns": 1, "rungs": 4 });
        let l = dna_helix(&segments(&[1.0, 1.0]), Size::new(40.0, 10.0), &Options::new(&spec));
        assert_eq!(
            classes(&l),
            [
                "mv-dna-helix-strand-back",
                "mv-dna-helix-rung",
                "mv-dna-helix-rung",
                "mv-dna-helix-strand-front",
                "mv-dna-helix-strand-back",
                "mv-dna-helix-rung",
                "mv-dna-helix-rung",
                "mv-dna-helix-strand-front",
            ]
        );
    }

    #[test]
    fn rungs_connect_the_strands() {
        let spec = json!({ "turns": 1, "rungs": 4, "strandWidth": 0 });
        let l = dna_helix(&segments(&[3.0, 1.0]), Size::new(40.0, 10.0), &Options::new(&spec));
        let rungs: Vec<_> = l
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Line(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(rungs.len(), 4);
        // First rung at x = 5, an eighth of a turn in.
        assert_eq!(rungs[0].x1, 5.0);
        assert!((rungs[0].y1 + rungs[0].y2 - 10.0).abs() < 1e-9);
        assert!(rungs[0].y1 > rungs[0].y2);
        assert_eq!(rungs.iter().filter(|r| r.stroke == "c1").count(), 1);
    }

    #[test]
    fn front_strand_swaps_at_each_crossing() {
        let spec = json!({ "turns": 1, "rungs": 2, "strandWidth": 0 });
        let l = dna_helix(&segments(&[1.0]), Size::new(40.0, 10.0), &Options::new(&spec));
        let fronts: Vec<&str> = l
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Path(p) if p.class_name.as_deref() == Some("mv-dna-helix-strand-front") => {
                    Some(p.d.as_str())
                }
                _ => None,
            })
            .collect();
        // Mid-way through each half turn, the front strand is the lower one.
        assert!(fronts[0].contains("L 10.00 10.00"));
        assert!(fronts[1].contains("L 30.00 10.00"));
    }

    #[test]
    fn no_segments_no_helix() {
        let spec = json!({});
        assert!(dna_helix(&ChartData::Empty, Size::new(40.0, 10.0), &Options::new(&spec)).is_empty());
    }
}
