// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wraps a variant's [`Layout`] into a [`RenderModel`].

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use microviz_core::{A11y, A11yItem, Mark, RenderModel, Stats, format_number};

use crate::data::ChartData;
use crate::layout::Layout;
use crate::normalize::Normalized;

/// ARIA role of every chart.
const ROLE: &str = "img";

/// Builds the model: size passthrough, warnings as `stats`, and the accessibility summary.
pub(crate) fn assemble(input: Normalized<'_>, layout: Layout) -> RenderModel {
    let a11y = A11y {
        role: String::from(ROLE),
        label: label(&input),
        items: items(&layout.marks),
    };
    RenderModel {
        width: input.size.width,
        height: input.size.height,
        marks: layout.marks,
        defs: layout.defs,
        stats: (!input.warnings.is_empty()).then(|| Stats {
            warnings: input.warnings,
        }),
        a11y: Some(a11y),
    }
}

fn label(input: &Normalized<'_>) -> String {
    if let Some(title) = input.options.text("title") {
        return title.to_string();
    }
    match input.variant {
        Some(variant) => alloc::format!("{} chart: {}", variant.name(), summary(&input.data)),
        None => String::from("chart"),
    }
}

/// A short, screen-reader friendly description of the data.
fn summary(data: &ChartData) -> String {
    match data {
        ChartData::Empty => String::from("no data"),
        ChartData::Segments(segments) if segments.is_empty() => String::from("no data"),
        ChartData::Segments(segments) => segments
            .iter()
            .map(|s| alloc::format!("{} {}%", s.name, format_number(s.pct, 2)))
            .collect::<Vec<_>>()
            .join(", "),
        ChartData::Series(series) if series.is_empty() => String::from("no data"),
        ChartData::Series(series) => series_summary(series),
        ChartData::Gauge(gauge) => alloc::format!(
            "{} of {}",
            format_number(gauge.value, 2),
            format_number(gauge.max, 2)
        ),
        ChartData::Heat(heat) if heat.series.is_empty() => String::from("no data"),
        ChartData::Heat(heat) => alloc::format!("{} cells", heat.series.len()),
    }
}

fn series_summary(series: &[f64]) -> String {
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let noun = if series.len() == 1 { "value" } else { "values" };
    alloc::format!(
        "{} {noun}, min {}, max {}",
        series.len(),
        format_number(min, 2),
        format_number(max, 2)
    )
}

fn items(marks: &[Mark]) -> Vec<A11yItem> {
    marks
        .iter()
        .filter_map(|mark| {
            let id = mark.id()?;
            Some(A11yItem {
                id: id.to_string(),
                label: mark.title().unwrap_or(id).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use microviz_core::{CircleMark, RectMark};
    use serde_json::{Value, json};

    use super::*;
    use crate::data::{Gauge, Heat, Segment};
    use crate::normalize::normalize;

    fn seg(name: &str, pct: f64) -> Segment {
        Segment {
            name: name.to_string(),
            pct,
            color: String::from("red"),
        }
    }

    #[test]
    fn summaries_per_shape() {
        assert_eq!(summary(&ChartData::Empty), "no data");
        assert_eq!(
            summary(&ChartData::Segments(vec![seg("A", 62.5), seg("B", 37.5)])),
            "A 62.5%, B 37.5%"
        );
        assert_eq!(
            summary(&ChartData::Series(vec![3.0, -1.0, 2.0])),
            "3 values, min -1, max 3"
        );
        assert_eq!(summary(&ChartData::Series(vec![4.0])), "1 value, min 4, max 4");
        assert_eq!(
            summary(&ChartData::Gauge(Gauge {
                max: 100.0,
                value: 42.0
            })),
            "42 of 100"
        );
        assert_eq!(
            summary(&ChartData::Heat(Heat {
                series: vec![1.0; 6],
                opacities: vec![None; 6],
            })),
            "6 cells"
        );
    }

    #[test]
    fn items_follow_marks_with_ids() {
        let mut layout = Layout::new();
        layout.push(RectMark::new(0.0, 0.0, 1.0, 1.0).with_class("track"));
        layout.push(
            RectMark::new(0.0, 0.0, 1.0, 1.0)
                .with_id("bar-0")
                .with_title("A: 50%"),
        );
        layout.push(CircleMark::new(0.0, 0.0, 1.0).with_id("dot"));
        let items = items(&layout.marks);
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].id.as_str(), items[0].label.as_str()), ("bar-0", "A: 50%"));
        assert_eq!((items[1].id.as_str(), items[1].label.as_str()), ("dot", "dot"));
    }

    #[test]
    fn stats_only_when_warned() {
        let spec = json!({ "type": "bar" });
        let clean = normalize(&json!([]), &json!({ "width": 10, "height": 4 }), &spec);
        let model = assemble(clean, Layout::new());
        assert!(model.stats.is_none());
        assert_eq!(model.a11y.as_ref().map(|a| a.label.as_str()), Some("bar chart: no data"));

        let dirty = normalize(&json!([]), &json!({ "width": -10, "height": 4 }), &spec);
        let model = assemble(dirty, Layout::new());
        assert_eq!(model.warnings().len(), 1);
        assert_eq!(model.width, 0.0);
    }

    #[test]
    fn title_overrides_label_and_unknown_types_are_generic() {
        let size = json!({ "width": 10, "height": 4 });
        let titled = json!({ "type": "bar", "title": "Disk usage" });
        let model = assemble(normalize(&Value::Null, &size, &titled), Layout::new());
        assert_eq!(model.a11y.map(|a| a.label), Some(String::from("Disk usage")));

        let unknown = json!({ "type": "pie-3d" });
        let model = assemble(normalize(&Value::Null, &size, &unknown), Layout::new());
        let a11y = model.a11y.as_ref().map(|a| (a.role.as_str(), a.label.as_str()));
        assert_eq!(a11y, Some(("img", "chart")));
        assert_eq!((model.width, model.height), (10.0, 4.0));
        assert!(model.marks.is_empty());
    }
}
