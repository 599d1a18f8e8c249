// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binned columns: `barcode`, `equalizer`, and `waveform`.
//!
//! Each variant quantizes its data into a fixed number of bins laid out as equal-width columns.
//! Segment data is turned into bins by largest-remainder allocation (every visible segment keeps
//! at least one bin when there are enough), optionally interleaved so small segments are not all
//! pushed to the tail.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use microviz_core::{CURRENT_COLOR, RectMark};

use crate::allocate::{allocate, bin_sequence};
use crate::data::{ChartData, Segment, Size};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::layout::{
    Layout, bin_max, class_name, equal_spans, max_pct, plot_rect, segment_title, weights,
};
use crate::options::Options;

/// Upper bound on the `bins` option.
pub(crate) const MAX_BINS: usize = 1024;

/// Default waveform bin count cap when `bins` is not given.
const WAVEFORM_DEFAULT_MAX_BINS: usize = 256;

/// Equalizer bins for segment data when `bins` is not given.
const EQUALIZER_SEGMENT_BINS: usize = 16;

/// Options common to the binned variants.
#[derive(Clone, Debug)]
struct BinOptions {
    pad: f64,
    gap: f64,
    snap: bool,
    interleave: bool,
    radius: f64,
    color: String,
}

impl BinOptions {
    fn read(options: &Options<'_>, gap: f64, snap: bool) -> Self {
        Self {
            pad: options.non_negative("pad", 0.0),
            gap: options.non_negative("gap", gap),
            snap: options.flag("snap", snap),
            interleave: options.flag("interleave", false),
            radius: options.non_negative("radius", 0.0),
            color: options.color("color", CURRENT_COLOR),
        }
    }

    fn plot(&self, size: Size) -> Option<Rect> {
        let plot = plot_rect(size, self.pad)?;
        Some(if self.snap { plot.round() } else { plot })
    }
}

/// The segment index of every bin, in layout order.
fn segment_bins(segments: &[Segment], bins: usize, interleave: bool) -> Vec<usize> {
    let counts = allocate(&weights(segments), bins, true);
    bin_sequence(&counts, interleave)
}

/// Full-height bins colored by segment.
pub(crate) fn barcode(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "barcode";
    let mut layout = Layout::new();
    let segments = data.segments();
    let opts = BinOptions::read(options, 1.0, true);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let bins = options.count("bins", 48, 1, MAX_BINS);

    let sequence = segment_bins(segments, bins, opts.interleave);
    let spans = equal_spans(sequence.len(), plot.x0, plot.width(), opts.gap, opts.snap);
    for (&s, span) in sequence.iter().zip(&spans) {
        let segment = &segments[s];
        layout.push(
            RectMark::new(span.start, plot.y0, span.len, plot.height())
                .with_radius(opts.radius)
                .with_fill(&segment.color)
                .with_class(class_name(KIND, "bin"))
                .with_title(segment_title(segment)),
        );
    }
    layout
}

/// Bars growing from the bottom edge.
///
/// Series data is reduced to `bins` maxima (default: one bin per value) and scaled to the largest
/// value. Segment data allocates `bins` (default 16) among segments; each bar's height follows its
/// segment's share relative to the largest one.
pub(crate) fn equalizer(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "equalizer";
    let mut layout = Layout::new();
    let opts = BinOptions::read(options, 1.0, false);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };

    // (fill, title, relative height) per bin.
    let bars: Vec<(&str, Option<String>, f64)> = match data {
        ChartData::Series(series) => {
            let bins = options.count("bins", series.len(), 1, MAX_BINS);
            let values = bin_max(series, bins, false);
            let max = values.iter().copied().fold(0.0, f64::max);
            values
                .into_iter()
                .map(|v| {
                    let rel = if max > 0.0 { v.max(0.0) / max } else { 0.0 };
                    (opts.color.as_str(), None, rel)
                })
                .collect()
        }
        ChartData::Segments(segments) => {
            let bins = options.count("bins", EQUALIZER_SEGMENT_BINS, 1, MAX_BINS);
            let max = max_pct(segments);
            segment_bins(segments, bins, opts.interleave)
                .into_iter()
                .map(|s| {
                    let segment = &segments[s];
                    (
                        segment.color.as_str(),
                        Some(segment_title(segment)),
                        segment.pct / max,
                    )
                })
                .collect()
        }
        _ => Vec::new(),
    };

    let spans = equal_spans(bars.len(), plot.x0, plot.width(), opts.gap, opts.snap);
    let min_height = options.non_negative("minHeight", 0.0);
    for ((fill, title, rel), span) in bars.into_iter().zip(&spans) {
        let mut h = (plot.height() * rel).max(min_height).min(plot.height());
        if opts.snap {
            h = h.round();
        }
        let mut mark = RectMark::new(span.start, plot.y1 - h, span.len, h)
            .with_radius(opts.radius)
            .with_fill(fill)
            .with_class(class_name(KIND, "bar"));
        if let Some(title) = title {
            mark = mark.with_title(title);
        }
        layout.push(mark);
    }
    layout
}

/// Bars centered on the mid-line, height following each bin's peak magnitude.
pub(crate) fn waveform(data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
    const KIND: &str = "waveform";
    let mut layout = Layout::new();
    let series = data.series();
    if series.is_empty() {
        return layout;
    }
    let opts = BinOptions::read(options, 1.0, false);
    let Some(plot) = opts.plot(size) else {
        return layout;
    };
    let default_bins = series.len().min(WAVEFORM_DEFAULT_MAX_BINS);
    let bins = options.count("bins", default_bins, 1, MAX_BINS);
    let min_height = options.non_negative("minHeight", 1.0);

    let values = bin_max(series, bins, true);
    let max = values.iter().copied().fold(0.0, f64::max);
    let mid = plot.y0 + plot.height() / 2.0;
    let spans = equal_spans(values.len(), plot.x0, plot.width(), opts.gap, opts.snap);
    for (v, span) in values.into_iter().zip(&spans) {
        let rel = if max > 0.0 { v / max } else { 0.0 };
        let mut h = (plot.height() * rel).max(min_height).min(plot.height());
        let mut y = mid - h / 2.0;
        if opts.snap {
            h = h.round();
            y = y.round();
        }
        layout.push(
            RectMark::new(span.start, y, span.len, h)
                .with_radius(opts.radius.min(span.len / 2.0))
                .with_fill(&opts.color)
                .with_class(class_name(KIND, "bar")),
        );
    }
    layout
}
