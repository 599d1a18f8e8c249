// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed catalog of chart variants and their dispatch table.

extern crate alloc;

use alloc::string::String;

use crate::data::{ChartData, DataShape, Size};
use crate::layout::Layout;
use crate::options::Options;
use crate::paint::palette_color;
use crate::variants::{binned, bars, chips, grid, helix, pipeline, radial, series, steps};

/// A variant layout: a pure function of normalized data, size, and options.
pub type LayoutFn = fn(&ChartData, Size, &Options<'_>) -> Layout;

/// One named chart layout algorithm, selected by `spec.type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `bar`
    Bar,
    /// `stacked-bar`
    StackedBar,
    /// `segmented-bar`
    SegmentedBar,
    /// `vertical-stack`
    VerticalStack,
    /// `gauge`
    Gauge,
    /// `pipeline`
    Pipeline,
    /// `stepped-area`
    SteppedArea,
    /// `layered-waves`
    LayeredWaves,
    /// `barcode`
    Barcode,
    /// `equalizer`
    Equalizer,
    /// `waveform`
    Waveform,
    /// `pixel-grid`
    PixelGrid,
    /// `heatgrid`
    Heatgrid,
    /// `bitfield`
    Bitfield,
    /// `dot-matrix`
    DotMatrix,
    /// `donut`
    Donut,
    /// `segmented-ring`
    SegmentedRing,
    /// `nano-ring`
    NanoRing,
    /// `concentric-arcs`
    ConcentricArcs,
    /// `radial-bars`
    RadialBars,
    /// `sparkline`
    Sparkline,
    /// `range-band`
    RangeBand,
    /// `dna-helix`
    DnaHelix,
    /// `pixel-pill`
    PixelPill,
    /// `stacked-chips`
    StackedChips,
}

impl Variant {
    /// Every variant, in catalog order.
    pub const ALL: [Self; 25] = [
        Self::Bar,
        Self::StackedBar,
        Self::SegmentedBar,
        Self::VerticalStack,
        Self::Gauge,
        Self::Pipeline,
        Self::SteppedArea,
        Self::LayeredWaves,
        Self::Barcode,
        Self::Equalizer,
        Self::Waveform,
        Self::PixelGrid,
        Self::Heatgrid,
        Self::Bitfield,
        Self::DotMatrix,
        Self::Donut,
        Self::SegmentedRing,
        Self::NanoRing,
        Self::ConcentricArcs,
        Self::RadialBars,
        Self::Sparkline,
        Self::RangeBand,
        Self::DnaHelix,
        Self::PixelPill,
        Self::StackedChips,
    ];

    /// The `type` discriminant.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::StackedBar => "stacked-bar",
            Self::SegmentedBar => "segmented-bar",
            Self::VerticalStack => "vertical-stack",
            Self::Gauge => "gauge",
            Self::Pipeline => "pipeline",
            Self::SteppedArea => "stepped-area",
            Self::LayeredWaves => "layered-waves",
            Self::Barcode => "barcode",
            Self::Equalizer => "equalizer",
            Self::Waveform => "waveform",
            Self::PixelGrid => "pixel-grid",
            Self::Heatgrid => "heatgrid",
            Self::Bitfield => "bitfield",
            Self::DotMatrix => "dot-matrix",
            Self::Donut => "donut",
            Self::SegmentedRing => "segmented-ring",
            Self::NanoRing => "nano-ring",
            Self::ConcentricArcs => "concentric-arcs",
            Self::RadialBars => "radial-bars",
            Self::Sparkline => "sparkline",
            Self::RangeBand => "range-band",
            Self::DnaHelix => "dna-helix",
            Self::PixelPill => "pixel-pill",
            Self::StackedChips => "stacked-chips",
        }
    }

    /// Looks up a variant by its `type` discriminant.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// The data shape this variant consumes.
    pub const fn shape(self) -> DataShape {
        match self {
            Self::Gauge => DataShape::Gauge,
            Self::Heatgrid => DataShape::Heat,
            Self::Equalizer => DataShape::SeriesOrSegments,
            Self::Waveform | Self::Bitfield | Self::Sparkline | Self::RangeBand => {
                DataShape::Series
            }
            _ => DataShape::Segments,
        }
    }

    /// Name given to segment `index` when the input omits one.
    pub fn fallback_name(self, index: usize) -> String {
        match self {
            Self::Pipeline => alloc::format!("Stage {}", index + 1),
            _ => alloc::format!("Segment {}", index + 1),
        }
    }

    /// Color given to segment `index` when the input omits one.
    ///
    /// Categorical variants cycle the palette; monochrome variants inherit `currentColor`.
    pub fn fallback_color(self, index: usize) -> String {
        match self {
            Self::RadialBars => String::from(microviz_core::CURRENT_COLOR),
            _ => palette_color(index),
        }
    }

    /// The layout function for this variant.
    pub fn layout_fn(self) -> LayoutFn {
        match self {
            Self::Bar => bars::bar,
            Self::StackedBar => bars::stacked_bar,
            Self::SegmentedBar => bars::segmented_bar,
            Self::VerticalStack => bars::vertical_stack,
            Self::Gauge => bars::gauge,
            Self::Pipeline => pipeline::pipeline,
            Self::SteppedArea => steps::stepped_area,
            Self::LayeredWaves => steps::layered_waves,
            Self::Barcode => binned::barcode,
            Self::Equalizer => binned::equalizer,
            Self::Waveform => binned::waveform,
            Self::PixelGrid => grid::pixel_grid,
            Self::Heatgrid => grid::heatgrid,
            Self::Bitfield => grid::bitfield,
            Self::DotMatrix => grid::dot_matrix,
            Self::Donut => radial::donut,
            Self::SegmentedRing => radial::segmented_ring,
            Self::NanoRing => radial::nano_ring,
            Self::ConcentricArcs => radial::concentric_arcs,
            Self::RadialBars => radial::radial_bars,
            Self::Sparkline => series::sparkline,
            Self::RangeBand => series::range_band,
            Self::DnaHelix => helix::dna_helix,
            Self::PixelPill => chips::pixel_pill,
            Self::StackedChips => chips::stacked_chips,
        }
    }

    /// Runs this variant's layout.
    pub fn layout(self, data: &ChartData, size: Size, options: &Options<'_>) -> Layout {
        (self.layout_fn())(data, size, options)
    }
}

/// Maps a `type` discriminant to its layout function; `None` for unknown types.
pub fn dispatch(type_name: &str) -> Option<LayoutFn> {
    Variant::from_name(type_name).map(Variant::layout_fn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for v in Variant::ALL {
            assert_eq!(Variant::from_name(v.name()), Some(v));
        }
    }

    #[test]
    fn unknown_types_do_not_dispatch() {
        assert!(dispatch("pie-in-the-sky").is_none());
        assert!(dispatch("").is_none());
        assert!(dispatch("Bar").is_none());
        assert!(dispatch("bar").is_some());
    }

    #[test]
    fn fallbacks_depend_on_the_variant() {
        assert_eq!(Variant::Pipeline.fallback_name(0), "Stage 1");
        assert_eq!(Variant::Bar.fallback_name(2), "Segment 3");
        assert_eq!(Variant::RadialBars.fallback_color(0), "currentColor");
        assert_ne!(Variant::Bar.fallback_color(0), Variant::Bar.fallback_color(1));
    }
}
