// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable definitions referenced by marks.

extern crate alloc;

use alloc::string::String;

use serde::Serialize;

/// A reusable definition, referenced from marks by its string id.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Def {
    /// A rounded-rect luminance mask (`RectMark::mask`).
    #[serde(rename = "mask")]
    Mask(MaskDef),
    /// A rectangular clip (`PathMark::clip_path`).
    #[serde(rename = "clipRect")]
    ClipRect(ClipRectDef),
}

impl Def {
    /// Returns the id marks use to reference this definition.
    pub fn id(&self) -> &str {
        match self {
            Self::Mask(m) => &m.id,
            Self::ClipRect(c) => &c.id,
        }
    }
}

impl From<MaskDef> for Def {
    fn from(value: MaskDef) -> Self {
        Self::Mask(value)
    }
}

impl From<ClipRectDef> for Def {
    fn from(value: ClipRectDef) -> Self {
        Self::ClipRect(value)
    }
}

/// A mask whose visible region is a (rounded) rectangle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaskDef {
    /// Definition id.
    pub id: String,
    /// Left edge of the visible region.
    pub x: f64,
    /// Top edge of the visible region.
    pub y: f64,
    /// Width of the visible region.
    pub w: f64,
    /// Height of the visible region.
    pub h: f64,
    /// Corner radius of the visible region.
    pub rx: f64,
}

/// A rectangular clip region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClipRectDef {
    /// Definition id.
    pub id: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defs_serialize_with_wire_tags() {
        let mask = Def::Mask(MaskDef {
            id: String::from("bar-mask"),
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 4.0,
            rx: 2.0,
        });
        let clip = Def::ClipRect(ClipRectDef {
            id: String::from("clip"),
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 4.0,
        });
        assert_eq!(serde_json::to_value(&mask).unwrap()["type"], json!("mask"));
        assert_eq!(serde_json::to_value(&clip).unwrap()["type"], json!("clipRect"));
        assert_eq!(clip.id(), "clip");
    }
}
