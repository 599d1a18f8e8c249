// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive marks.
//!
//! A [`Mark`] is one drawing instruction. On the wire every mark is an object tagged by a `type`
//! field (`rect`, `circle`, `line`, `path`, `text`); consumers must switch on the tag before
//! reading kind-specific fields.

extern crate alloc;

use alloc::string::String;

use kurbo::Rect;
use serde::Serialize;

/// Default paint for fills and strokes: inherit from the host element.
pub const CURRENT_COLOR: &str = "currentColor";

/// The geometric kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    /// An axis-aligned (optionally rounded) rectangle.
    Rect,
    /// A circle, optionally stroked with a dash array.
    Circle,
    /// A straight line segment.
    Line,
    /// A vector path given as SVG path data.
    Path,
    /// A text run. Reserved; built-in layouts never emit it.
    Text,
}

/// A single primitive drawing instruction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    /// See [`RectMark`].
    Rect(RectMark),
    /// See [`CircleMark`].
    Circle(CircleMark),
    /// See [`LineMark`].
    Line(LineMark),
    /// See [`PathMark`].
    Path(PathMark),
    /// See [`TextMark`].
    Text(TextMark),
}

impl Mark {
    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Circle(_) => MarkKind::Circle,
            Self::Line(_) => MarkKind::Line,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns the stable id, if the mark carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Rect(m) => m.id.as_deref(),
            Self::Circle(m) => m.id.as_deref(),
            Self::Line(m) => m.id.as_deref(),
            Self::Path(m) => m.id.as_deref(),
            Self::Text(m) => m.id.as_deref(),
        }
    }

    /// Returns the human-readable title, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Rect(m) => m.title.as_deref(),
            Self::Circle(m) => m.title.as_deref(),
            Self::Line(m) => m.title.as_deref(),
            Self::Path(m) => m.title.as_deref(),
            Self::Text(m) => m.title.as_deref(),
        }
    }

    /// Returns the class name, if any.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Rect(m) => m.class_name.as_deref(),
            Self::Circle(m) => m.class_name.as_deref(),
            Self::Line(m) => m.class_name.as_deref(),
            Self::Path(m) => m.class_name.as_deref(),
            Self::Text(m) => m.class_name.as_deref(),
        }
    }

    /// Optional bounds hint.
    ///
    /// Path bounds are not tracked (the geometry is already serialized) and text is not
    /// measured, so both return `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(Rect::new(r.x, r.y, r.x + r.w, r.y + r.h)),
            Self::Circle(c) => Some(Rect::new(c.cx - c.r, c.cy - c.r, c.cx + c.r, c.cy + c.r)),
            Self::Line(l) => Some(Rect::new(
                l.x1.min(l.x2),
                l.y1.min(l.y2),
                l.x1.max(l.x2),
                l.y1.max(l.y2),
            )),
            Self::Path(_) | Self::Text(_) => None,
        }
    }
}

macro_rules! identity_setters {
    ($ty:ty) => {
        impl $ty {
            /// Sets the stable id (used for animation keying and focus targeting).
            pub fn with_id(mut self, id: impl Into<String>) -> Self {
                self.id = Some(id.into());
                self
            }

            /// Sets the class name.
            pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
                self.class_name = Some(class_name.into());
                self
            }

            /// Sets the human-readable title (also used as the accessibility label).
            pub fn with_title(mut self, title: impl Into<String>) -> Self {
                self.title = Some(title.into());
                self
            }
        }
    };
}

fn opacity(v: f64) -> Option<f64> {
    let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
    (v < 1.0).then_some(v)
}

fn radius(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

/// A rectangle.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectMark {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
    /// Horizontal corner radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    /// Vertical corner radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    /// Fill paint (any CSS color string).
    pub fill: String,
    /// Fill opacity; omitted when fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Id of a [`crate::Def::Mask`] applied to this rect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// Class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Stable id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RectMark {
    /// Creates a rect filled with `currentColor`.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            rx: None,
            ry: None,
            fill: String::from(CURRENT_COLOR),
            fill_opacity: None,
            mask: None,
            class_name: None,
            id: None,
            title: None,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the fill opacity (clamped to `[0, 1]`; `1` is omitted).
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = opacity(fill_opacity);
        self
    }

    /// Sets both corner radii. Non-positive radii clear the rounding.
    pub fn with_radius(mut self, r: f64) -> Self {
        self.rx = radius(r);
        self.ry = radius(r);
        self
    }

    /// References a mask definition by id.
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }
}

identity_setters!(RectMark);

impl From<RectMark> for Mark {
    fn from(value: RectMark) -> Self {
        Self::Rect(value)
    }
}

/// A circle.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMark {
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Radius.
    pub r: f64,
    /// Fill paint; `"none"` for stroked rings.
    pub fill: String,
    /// Fill opacity; omitted when fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Stroke paint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Stroke opacity; omitted when fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    /// SVG dash array, e.g. `"12.57 50.27"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    /// SVG dash offset paired with `stroke_dasharray`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dashoffset: Option<f64>,
    /// Class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Stable id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CircleMark {
    /// Creates a filled circle.
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self {
            cx,
            cy,
            r,
            fill: String::from(CURRENT_COLOR),
            fill_opacity: None,
            stroke: None,
            stroke_width: None,
            stroke_opacity: None,
            stroke_dasharray: None,
            stroke_dashoffset: None,
            class_name: None,
            id: None,
            title: None,
        }
    }

    /// Creates an unfilled ring stroked with `stroke`.
    pub fn ring(cx: f64, cy: f64, r: f64, stroke: impl Into<String>, stroke_width: f64) -> Self {
        let mut c = Self::new(cx, cy, r);
        c.fill = String::from("none");
        c.stroke = Some(stroke.into());
        c.stroke_width = Some(stroke_width);
        c
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the fill opacity (clamped to `[0, 1]`; `1` is omitted).
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = opacity(fill_opacity);
        self
    }

    /// Sets the stroke opacity (clamped to `[0, 1]`; `1` is omitted).
    pub fn with_stroke_opacity(mut self, stroke_opacity: f64) -> Self {
        self.stroke_opacity = opacity(stroke_opacity);
        self
    }

    /// Sets the dash array and offset.
    pub fn with_dash(mut self, dasharray: impl Into<String>, dashoffset: f64) -> Self {
        self.stroke_dasharray = Some(dasharray.into());
        self.stroke_dashoffset = Some(dashoffset);
        self
    }
}

identity_setters!(CircleMark);

impl From<CircleMark> for Mark {
    fn from(value: CircleMark) -> Self {
        Self::Circle(value)
    }
}

/// A straight line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMark {
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
    /// Stroke paint.
    pub stroke: String,
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke opacity; omitted when fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    /// SVG line cap (`"round"`, `"square"`); omitted for the renderer default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_linecap: Option<String>,
    /// Class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Stable id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl LineMark {
    /// Creates a `currentColor` line of width 1.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke: String::from(CURRENT_COLOR),
            stroke_width: 1.0,
            stroke_opacity: None,
            stroke_linecap: None,
            class_name: None,
            id: None,
            title: None,
        }
    }

    /// Sets the stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<String>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the stroke opacity (clamped to `[0, 1]`; `1` is omitted).
    pub fn with_stroke_opacity(mut self, stroke_opacity: f64) -> Self {
        self.stroke_opacity = opacity(stroke_opacity);
        self
    }

    /// Sets the line cap.
    pub fn with_linecap(mut self, linecap: impl Into<String>) -> Self {
        self.stroke_linecap = Some(linecap.into());
        self
    }
}

identity_setters!(LineMark);

impl From<LineMark> for Mark {
    fn from(value: LineMark) -> Self {
        Self::Line(value)
    }
}

/// A vector path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMark {
    /// SVG path data (see [`crate::svg_path_data`]).
    pub d: String,
    /// Fill paint; `"none"` for open strokes.
    pub fill: String,
    /// Fill opacity; omitted when fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Stroke paint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Stroke opacity; omitted when fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    /// Id of a [`crate::Def::ClipRect`] applied to this path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
    /// Class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Stable id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PathMark {
    /// Creates a filled path.
    pub fn new(d: impl Into<String>) -> Self {
        Self {
            d: d.into(),
            fill: String::from(CURRENT_COLOR),
            fill_opacity: None,
            stroke: None,
            stroke_width: None,
            stroke_opacity: None,
            clip_path: None,
            class_name: None,
            id: None,
            title: None,
        }
    }

    /// Creates an unfilled, stroked path.
    pub fn stroked(d: impl Into<String>, stroke: impl Into<String>, stroke_width: f64) -> Self {
        let mut p = Self::new(d);
        p.fill = String::from("none");
        p.stroke = Some(stroke.into());
        p.stroke_width = Some(stroke_width);
        p
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the fill opacity (clamped to `[0, 1]`; `1` is omitted).
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = opacity(fill_opacity);
        self
    }

    /// Sets the stroke opacity (clamped to `[0, 1]`; `1` is omitted).
    pub fn with_stroke_opacity(mut self, stroke_opacity: f64) -> Self {
        self.stroke_opacity = opacity(stroke_opacity);
        self
    }

    /// References a clip rect definition by id.
    pub fn with_clip_path(mut self, clip: impl Into<String>) -> Self {
        self.clip_path = Some(clip.into());
        self
    }
}

identity_setters!(PathMark);

impl From<PathMark> for Mark {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

/// A text run positioned at an anchor point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMark {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Text content (unshaped).
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Fill paint.
    pub fill: String,
    /// Class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Stable id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TextMark {
    /// Creates a 12px `currentColor` text mark.
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font_size: 12.0,
            fill: String::from(CURRENT_COLOR),
            class_name: None,
            id: None,
            title: None,
        }
    }
}

identity_setters!(TextMark);

impl From<TextMark> for Mark {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use serde_json::json;

    use super::*;

    #[test]
    fn rect_serializes_with_type_tag_and_camel_case() {
        let m: Mark = RectMark::new(1.0, 2.0, 3.0, 4.0)
            .with_fill("#ff0000")
            .with_fill_opacity(0.5)
            .with_mask("m0")
            .with_class("bar-segment")
            .with_id("bar-0")
            .into();
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "rect",
                "x": 1.0, "y": 2.0, "w": 3.0, "h": 4.0,
                "fill": "#ff0000",
                "fillOpacity": 0.5,
                "mask": "m0",
                "className": "bar-segment",
                "id": "bar-0",
            })
        );
    }

    #[test]
    fn full_opacity_and_zero_radius_are_omitted() {
        let r = RectMark::new(0.0, 0.0, 1.0, 1.0)
            .with_fill_opacity(1.0)
            .with_radius(0.0);
        assert_eq!(r.fill_opacity, None);
        assert_eq!(r.rx, None);
        let r = r.with_fill_opacity(f64::NAN);
        assert_eq!(r.fill_opacity, None);
    }

    #[test]
    fn ring_is_unfilled_and_dashed() {
        let m: Mark = CircleMark::ring(5.0, 5.0, 4.0, "#000", 2.0)
            .with_dash("6.28 18.85", 6.28)
            .into();
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["type"], "circle");
        assert_eq!(v["fill"], "none");
        assert_eq!(v["strokeDasharray"], "6.28 18.85");
        assert_eq!(v["strokeWidth"], 2.0);
    }

    #[test]
    fn bounds_cover_geometry_kinds() {
        let line: Mark = LineMark::new(4.0, 1.0, 2.0, 3.0).into();
        assert_eq!(line.bounds(), Some(Rect::new(2.0, 1.0, 4.0, 3.0)));
        let circle: Mark = CircleMark::new(5.0, 5.0, 2.0).into();
        assert_eq!(circle.bounds(), Some(Rect::new(3.0, 3.0, 7.0, 7.0)));
        let path: Mark = PathMark::new("M 0.00 0.00").into();
        assert_eq!(path.bounds(), None);
        assert_eq!(path.kind(), MarkKind::Path);
    }
}
