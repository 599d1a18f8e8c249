// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear partitions: `bar`, `stacked-bar`, `segmented-bar`, `vertical-stack`, and `gauge`.

extern crate alloc;

use alloc::string::String;

use kurbo::Rect;
use microviz_core::{CURRENT_COLOR, MaskDef, RectMark, format_number};

use crate::data::{ChartData, Size};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::layout::{Layout, SegmentMark, class_name, plot_rect, spans, weights};
use crate::options::Options;
use crate::partition::share_of;

/// Opacity of the unfilled track behind stacked bars and gauges.
const TRACK_OPACITY: f64 = 0.15;

/// Options shared by the horizontal bar family.
#[derive(Clone, Debug)]
struct BarOptions {
    pad: f64,
    gap: f64,
    /// Corner radius; `None` means half the plot height.
    radius: Option<f64>,
    snap: bool,
    track_color: String,
    track_opacity: f64,
}

impl BarOptions {
    fn read(options: &Options<'_>, gap: f64, snap: bool) -> Self {
        Self {
            pad: options.non_negative("pad", 0.0),
            gap: options.non_negative("gap", gap),
            radius: options.number_opt("radius").map(|r| r.max(0.0)),
            snap: options.flag("snap", snap),
            track_color: options.color("trackColor", CURRENT_COLOR),
            track_opacity: options.clamped("trackOpacity", TRACK_OPACITY, 0.0, 1.0),
        }
    }

    fn plot(&self, size: Size) -> Option<Rect> {
        let plot = plot_rect(size, self.pad)?;
        Some(if self.snap { plot.round() } else { plot })
    }

    fn radius(&self, plot: Rect) -> f64 {
        let half = plot.height() / 2.0;
        self.radius.unwrap_or(half).min(half)
    }

    fn track(&self, kind: &str, plot: Rect, radius: f64) -> RectMark {
        RectMark::new(plot.x0, plot.y0, plot.width(), plot.height())
            .with_radius(radius)
            .with_fill(&self.track_color)
            .with_fill_opacity(self.track_opacity)
            .with_class(class_name(kind, "track"))
    }
}

/// A single horizontal bar split into contiguous segments, clipped by a rounded mask.
pub(crate) fn bar(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "bar";
    let mut layout = Layout::new();
    let segments = data.segments();
    let opts = BarOptions::read(options, 0.0, false);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let spans = spans(&weights(segments), plot.x0, plot.width(), 0.0, opts.snap);
    if spans.is_empty() {
        return layout;
    }

    let mask_id = alloc::format!("{KIND}-mask");
    layout.push_def(MaskDef {
        id: mask_id.clone(),
        x: plot.x0,
        y: plot.y0,
        w: plot.width(),
        h: plot.height(),
        rx: opts.radius(plot),
    });
    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate() {
        layout.push(
            RectMark::new(span.start, plot.y0, span.len, plot.height())
                .with_fill(&segment.color)
                .with_mask(&mask_id)
                .segment(KIND, i, segment),
        );
    }
    layout
}

/// A track with segments laid over it, optionally separated by gaps.
pub(crate) fn stacked_bar(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "stacked-bar";
    let mut layout = Layout::new();
    let segments = data.segments();
    let mut opts = BarOptions::read(options, 0.0, false);
    opts.radius = Some(opts.radius.unwrap_or(0.0));
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let spans = spans(&weights(segments), plot.x0, plot.width(), opts.gap, opts.snap);
    if spans.is_empty() {
        return layout;
    }

    let radius = opts.radius(plot);
    layout.push(opts.track(KIND, plot, radius));
    // Without gaps the segments butt together, so only the track is rounded.
    let segment_radius = if opts.gap > 0.0 { radius } else { 0.0 };
    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate() {
        layout.push(
            RectMark::new(span.start, plot.y0, span.len, plot.height())
                .with_radius(segment_radius.min(span.len / 2.0))
                .with_fill(&segment.color)
                .segment(KIND, i, segment),
        );
    }
    layout
}

/// Integer-snapped segments separated by gaps, each drawn as a pill.
pub(crate) fn segmented_bar(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "segmented-bar";
    let mut layout = Layout::new();
    let segments = data.segments();
    let opts = BarOptions::read(options, 2.0, true);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let radius = opts.radius(plot);
    let spans = spans(&weights(segments), plot.x0, plot.width(), opts.gap, opts.snap);
    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate() {
        layout.push(
            RectMark::new(span.start, plot.y0, span.len, plot.height())
                .with_radius(radius.min(span.len / 2.0))
                .with_fill(&segment.color)
                .segment(KIND, i, segment),
        );
    }
    layout
}

/// Segments stacked bottom-up along the vertical axis.
pub(crate) fn vertical_stack(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "vertical-stack";
    let mut layout = Layout::new();
    let segments = data.segments();
    let opts = BarOptions::read(options, 0.0, false);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let radius = opts.radius.unwrap_or(0.0).min(plot.width() / 2.0);
    let spans = spans(&weights(segments), 0.0, plot.height(), opts.gap, opts.snap);
    for (i, (segment, span)) in segments.iter().zip(&spans).enumerate() {
        layout.push(
            RectMark::new(plot.x0, plot.y1 - span.end(), plot.width(), span.len)
                .with_radius(radius.min(span.len / 2.0))
                .with_fill(&segment.color)
                .segment(KIND, i, segment),
        );
    }
    layout
}

/// A single value against its maximum: track plus value bar.
pub(crate) fn gauge(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "gauge";
    let mut layout = Layout::new();
    let ChartData::Gauge(gauge) = data else {
        return layout;
    };
    let opts = BarOptions::read(options, 0.0, false);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let radius = opts.radius(plot);
    let mut w = share_of(plot.width(), gauge.value, gauge.max);
    if opts.snap {
        w = w.round();
    }

    layout.push(opts.track(KIND, plot, radius));
    layout.push(
        RectMark::new(plot.x0, plot.y0, w, plot.height())
            .with_radius(radius.min(w / 2.0))
            .with_fill(options.color("color", CURRENT_COLOR))
            .with_id(alloc::format!("{KIND}-value"))
            .with_class(class_name(KIND, "value"))
            .with_title(alloc::format!(
                "{} of {}",
                format_number(gauge.value, 2),
                format_number(gauge.max, 2)
            )),
    );
    layout
}

#[cfg(test)]
mod tests {
    use microviz_core::{Def, Mark};
    use serde_json::json;

    use super::*;
    use crate::data::Gauge;
    use crate::variants::test_util::{is_whole, rects, segments};

    #[test]
    fn bar_is_proportional_to_the_sum_and_masked() {
        let spec = json!({ "type": "bar" });
        let l = bar(&segments(&[30.0, 10.0]), Size::new(100.0, 10.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!(r.len(), 2);
        assert_eq!((r[0].x, r[0].w), (0.0, 75.0));
        assert_eq!((r[1].x, r[1].w), (75.0, 25.0));
        assert_eq!(r[0].mask.as_deref(), Some("bar-mask"));
        assert_eq!(r[1].id.as_deref(), Some("bar-1"));
        assert_eq!(r[1].title.as_deref(), Some("S1: 10%"));
        let [Def::Mask(mask)] = l.defs.as_slice() else {
            panic!("expected one mask, got {:?}", l.defs);
        };
        assert_eq!(mask.rx, 5.0);
    }

    #[test]
    fn stacked_bar_has_a_track_and_gaps() {
        let spec = json!({ "gap": 2, "radius": 3 });
        let l = stacked_bar(&segments(&[50.0, 50.0]), Size::new(102.0, 6.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!(r.len(), 3);
        assert_eq!(r[0].class_name.as_deref(), Some("mv-stacked-bar-track"));
        assert_eq!(r[0].fill_opacity, Some(TRACK_OPACITY));
        assert_eq!((r[1].x, r[1].w), (0.0, 50.0));
        assert_eq!((r[2].x, r[2].w), (52.0, 50.0));
        assert_eq!(r[2].rx, Some(3.0));
    }

    #[test]
    fn segmented_bar_snaps_to_whole_pixels() {
        let spec = json!({});
        let l = segmented_bar(
            &segments(&[1.0, 1.0, 1.0]),
            Size::new(100.0, 8.0),
            &Options::new(&spec),
        );
        let r = rects(&l.marks);
        let widths: alloc::vec::Vec<f64> = r.iter().map(|r| r.w).collect();
        assert_eq!(widths.iter().sum::<f64>(), 96.0);
        assert!(r.iter().all(|r| is_whole(r.x) && is_whole(r.w)));
        assert_eq!(r[2].x + r[2].w, 100.0);
    }

    #[test]
    fn vertical_stack_grows_upwards() {
        let spec = json!({});
        let l = vertical_stack(&segments(&[75.0, 25.0]), Size::new(4.0, 40.0), &Options::new(&spec));
        let r = rects(&l.marks);
        assert_eq!((r[0].y, r[0].h), (10.0, 30.0));
        assert_eq!((r[1].y, r[1].h), (0.0, 10.0));
    }

    #[test]
    fn gauge_fills_its_share_of_the_track() {
        let spec = json!({ "color": "teal" });
        let data = ChartData::Gauge(Gauge {
            max: 200.0,
            value: 50.0,
        });
        let l = gauge(&data, Size::new(80.0, 8.0), &Options::new(&spec));
        let Mark::Rect(value) = &l.marks[1] else {
            panic!("value bar should be a rect");
        };
        assert_eq!(value.w, 20.0);
        assert_eq!(value.fill, "teal");
        assert_eq!(value.title.as_deref(), Some("50 of 200"));
    }

    #[test]
    fn empty_data_draws_nothing() {
        let spec = json!({});
        let o = Options::new(&spec);
        let size = Size::new(100.0, 10.0);
        for f in [bar, stacked_bar, segmented_bar, vertical_stack, gauge] {
            let l = f(&ChartData::Empty, size, &o);
            assert!(l.marks.is_empty() && l.defs.is_empty());
        }
    }
}
