// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input validation and coercion.
//!
//! The normalizer never fails: every defect it repairs is described in `warnings`, which the
//! assembler surfaces as `stats.warnings`. Benign defaults (a missing segment name or color) are
//! not defects and produce no warning.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_json::{Map, Value};

use crate::data::{ChartData, DataShape, Gauge, Heat, Segment, Size};
use crate::log::{debug, warn};
use crate::options::Options;
use crate::parse::parse_number_array;
use crate::variant::Variant;

/// Gauge maximum used when none (or an invalid one) is given.
const DEFAULT_GAUGE_MAX: f64 = 100.0;

/// Typed, bounded chart input plus the warnings collected while producing it.
#[derive(Clone, Debug, Default)]
pub struct Normalized<'a> {
    /// Normalized data; [`ChartData::Empty`] for unknown variants.
    pub data: ChartData,
    /// Finite, non-negative size.
    pub size: Size,
    /// The resolved variant, if `type` named a known one.
    pub variant: Option<Variant>,
    /// The raw `type` string, when the `spec` object had one.
    pub type_name: Option<&'a str>,
    /// Options read from the `spec` object.
    pub options: Options<'a>,
    /// Human-readable descriptions of every repaired defect.
    pub warnings: Vec<String>,
}

/// Validates and coerces raw input; never fails.
pub fn normalize<'a>(raw_data: &Value, raw_size: &Value, raw_spec: &'a Value) -> Normalized<'a> {
    let mut warnings = Warnings::default();
    let size = normalize_size(raw_size, &mut warnings);

    let type_name = raw_spec.get("type").and_then(Value::as_str);
    let variant = match type_name {
        Some(name) => {
            let variant = Variant::from_name(name);
            if variant.is_none() {
                warn!(type_name = name, "unknown chart type");
                warnings.push(alloc::format!("unknown chart type \"{name}\""));
            }
            variant
        }
        None if raw_spec.is_object() => {
            warnings.push(String::from("spec.type: missing chart type"));
            None
        }
        None => {
            warnings.push(String::from("spec: expected an object with a \"type\""));
            None
        }
    };

    let data = match variant {
        Some(v) => normalize_data(raw_data, v, &mut warnings),
        None => ChartData::Empty,
    };

    Normalized {
        data,
        size,
        variant,
        type_name,
        options: Options::new(raw_spec),
        warnings: warnings.0,
    }
}

#[derive(Default)]
struct Warnings(Vec<String>);

impl Warnings {
    fn push(&mut self, message: String) {
        debug!(%message, "input coerced");
        self.0.push(message);
    }
}

fn normalize_size(raw: &Value, warnings: &mut Warnings) -> Size {
    let Some(obj) = raw.as_object() else {
        warnings.push(String::from("size: expected {width, height}; using 0x0"));
        return Size::default();
    };
    Size::new(
        dimension(obj, "width", warnings),
        dimension(obj, "height", warnings),
    )
}

fn dimension(obj: &Map<String, Value>, key: &str, warnings: &mut Warnings) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            Some(v) if v.is_finite() => {
                warnings.push(alloc::format!("size.{key}: negative value {v} clamped to 0"));
                0.0
            }
            _ => {
                warnings.push(alloc::format!("size.{key}: not a finite number; using 0"));
                0.0
            }
        },
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => {
                let v = v.max(0.0);
                warnings.push(alloc::format!("size.{key}: coerced \"{s}\" to {v}"));
                v
            }
            _ => {
                warnings.push(alloc::format!("size.{key}: \"{s}\" is not a number; using 0"));
                0.0
            }
        },
        _ => {
            warnings.push(alloc::format!("size.{key}: missing or not a number; using 0"));
            0.0
        }
    }
}

fn is_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn normalize_data(raw: &Value, variant: Variant, warnings: &mut Warnings) -> ChartData {
    if is_blank(raw) {
        return ChartData::Empty;
    }
    let shape = match variant.shape() {
        DataShape::SeriesOrSegments => match raw {
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                DataShape::Segments
            }
            _ => DataShape::Series,
        },
        shape => shape,
    };
    let data = match shape {
        DataShape::Segments => segments(raw, variant, warnings).map(ChartData::Segments),
        DataShape::Series | DataShape::SeriesOrSegments => {
            series(raw, "data", warnings).map(ChartData::Series)
        }
        DataShape::Gauge => gauge(raw, warnings).map(ChartData::Gauge),
        DataShape::Heat => heat(raw, warnings).map(ChartData::Heat),
    };
    match data {
        Some(d) if !d.is_empty() => d,
        _ => ChartData::Empty,
    }
}

fn segments(raw: &Value, variant: Variant, warnings: &mut Warnings) -> Option<Vec<Segment>> {
    let Value::Array(items) = raw else {
        warnings.push(String::from("data: expected an array of {name, pct, color}"));
        return None;
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            warnings.push(alloc::format!("data[{i}]: dropped non-object segment"));
            continue;
        };
        let Some(pct) = segment_pct(obj, i, warnings) else {
            continue;
        };
        // Fallbacks are numbered by input position, dropped entries included.
        let name = match obj.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => variant.fallback_name(i),
        };
        let color = match obj.get("color") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => variant.fallback_color(i),
        };
        out.push(Segment { name, pct, color });
    }
    Some(out)
}

fn segment_pct(obj: &Map<String, Value>, i: usize, warnings: &mut Warnings) -> Option<f64> {
    let pct = match obj.get("pct") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let parsed = s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            if let Some(v) = parsed.filter(|v| *v >= 0.0) {
                warnings.push(alloc::format!("data[{i}].pct: coerced \"{s}\" to {v}"));
            }
            parsed
        }
        _ => None,
    };
    match pct {
        Some(v) if v.is_finite() && v >= 0.0 => Some(v),
        Some(v) if v.is_finite() => {
            warnings.push(alloc::format!("data[{i}]: dropped segment with negative pct {v}"));
            None
        }
        _ => {
            warnings.push(alloc::format!("data[{i}]: dropped segment without a finite pct"));
            None
        }
    }
}

fn series(raw: &Value, path: &str, warnings: &mut Warnings) -> Option<Vec<f64>> {
    match raw {
        Value::String(text) => {
            let parsed = parse_number_array(text, true);
            if let Some(dropped) = &parsed.dropped {
                warnings.push(alloc::format!(
                    "{path}: dropped {} non-numeric token(s)",
                    dropped.len()
                ));
            }
            Some(parsed.data)
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item.as_f64().filter(|v| v.is_finite()) {
                    Some(v) => out.push(v),
                    None => {
                        warnings.push(alloc::format!("{path}[{i}]: dropped non-numeric value"));
                    }
                }
            }
            Some(out)
        }
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(|v| alloc::vec![v]),
        _ => {
            warnings.push(alloc::format!("{path}: expected an array of numbers"));
            None
        }
    }
}

fn gauge(raw: &Value, warnings: &mut Warnings) -> Option<Gauge> {
    let (raw_max, raw_value) = match raw {
        Value::Object(obj) => (obj.get("max"), obj.get("value")),
        Value::Number(_) => (None, Some(raw)),
        _ => {
            warnings.push(String::from("data: expected {max, value}"));
            return None;
        }
    };

    let max = match raw_max.map(Value::as_f64) {
        None => DEFAULT_GAUGE_MAX,
        Some(Some(m)) if m.is_finite() && m > 0.0 => m,
        Some(_) => {
            warnings.push(alloc::format!(
                "data.max: expected a positive number; using {DEFAULT_GAUGE_MAX}"
            ));
            DEFAULT_GAUGE_MAX
        }
    };

    let Some(value) = raw_value.and_then(Value::as_f64).filter(|v| v.is_finite()) else {
        warnings.push(String::from("data.value: missing or not a finite number"));
        return None;
    };
    let clamped = value.clamp(0.0, max);
    if clamped != value {
        warnings.push(alloc::format!("data.value: {value} clamped to [0, {max}]"));
    }
    Some(Gauge {
        max,
        value: clamped,
    })
}

fn heat(raw: &Value, warnings: &mut Warnings) -> Option<Heat> {
    let (raw_series, raw_opacities) = match raw {
        Value::Object(obj) => (obj.get("series").unwrap_or(&Value::Null), obj.get("opacities")),
        _ => (raw, None),
    };
    if is_blank(raw_series) {
        return None;
    }
    let series = series(raw_series, "data.series", warnings)?;

    let mut opacities = alloc::vec![None; series.len()];
    match raw_opacities {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().take(series.len()).enumerate() {
                match item {
                    Value::Null => {}
                    _ => match item.as_f64().filter(|v| v.is_finite()) {
                        Some(v) => {
                            let c = v.clamp(0.0, 1.0);
                            if c != v {
                                warnings.push(alloc::format!(
                                    "data.opacities[{i}]: {v} clamped to [0, 1]"
                                ));
                            }
                            opacities[i] = Some(c);
                        }
                        None => warnings.push(alloc::format!(
                            "data.opacities[{i}]: ignored non-numeric value"
                        )),
                    },
                }
            }
        }
        Some(_) => warnings.push(String::from("data.opacities: expected an array")),
    }
    Some(Heat { series, opacities })
}
