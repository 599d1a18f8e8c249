// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolation between two render models.
//!
//! This is the pure half of animation: the host owns the previous model and the frame clock,
//! and calls [`interpolate`] once per frame with an eased `t`.
//!
//! Pairing rules:
//! - same mark count with matching kinds at every index: marks pair by index;
//! - otherwise marks pair by id; unpaired marks (and index pairs whose kinds differ) hard-cut,
//!   i.e. the `a` side is shown before `t = 0.5` and the `b` side from `t = 0.5`;
//! - a count mismatch with no ids on `b` hard-cuts the whole model.
//!
//! Numeric fields lerp. Strings snap at `t >= 0.5`, except path data and dash arrays, which tween
//! token-wise when both sides share the same command skeleton.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::format::format_fixed;
use crate::mark::{CircleMark, LineMark, Mark, PathMark, RectMark, TextMark};
use crate::model::RenderModel;
use crate::path::PATH_DECIMALS;

/// Linear interpolation; returns `a` exactly when `a == b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Produces the intermediate model at `t` (clamped to `[0, 1]`) between `a` and `b`.
///
/// `a` and `b` are expected to come from the same variant and option shape. Mismatched shapes
/// follow the pairing rules in the module docs rather than failing.
pub fn interpolate(a: &RenderModel, b: &RenderModel, t: f64) -> RenderModel {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let late = t >= 0.5;

    let marks = if same_shape(&a.marks, &b.marks) {
        a.marks
            .iter()
            .zip(&b.marks)
            .map(|(ma, mb)| tween_mark(ma, mb, t))
            .collect()
    } else if b.marks.iter().any(|m| m.id().is_some()) {
        pair_by_id(&a.marks, &b.marks, t)
    } else {
        let src = if late { b } else { a };
        src.marks.clone()
    };

    let snap = if late { b } else { a };
    RenderModel {
        width: lerp(a.width, b.width, t),
        height: lerp(a.height, b.height, t),
        marks,
        defs: snap.defs.clone(),
        stats: snap.stats.clone(),
        a11y: snap.a11y.clone(),
    }
}

fn same_shape(a: &[Mark], b: &[Mark]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(ma, mb)| ma.kind() == mb.kind())
}

fn pair_by_id(a: &[Mark], b: &[Mark], t: f64) -> Vec<Mark> {
    let late = t >= 0.5;
    let (base, other) = if late { (b, a) } else { (a, b) };
    let partners: HashMap<&str, &Mark> = other
        .iter()
        .filter_map(|m| m.id().map(|id| (id, m)))
        .collect();

    base.iter()
        .map(|m| {
            let partner = m
                .id()
                .and_then(|id| partners.get(id))
                .filter(|p| p.kind() == m.kind());
            match partner {
                Some(p) if late => tween_mark(p, m, t),
                Some(p) => tween_mark(m, p, t),
                None => m.clone(),
            }
        })
        .collect()
}

fn snap<T: Clone>(a: &T, b: &T, t: f64) -> T {
    if t >= 0.5 { b.clone() } else { a.clone() }
}

fn tween_opt(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b, t)),
        _ => snap(&a, &b, t),
    }
}

fn tween_mark(a: &Mark, b: &Mark, t: f64) -> Mark {
    match (a, b) {
        (Mark::Rect(a), Mark::Rect(b)) => Mark::Rect(tween_rect(a, b, t)),
        (Mark::Circle(a), Mark::Circle(b)) => Mark::Circle(tween_circle(a, b, t)),
        (Mark::Line(a), Mark::Line(b)) => Mark::Line(tween_line(a, b, t)),
        (Mark::Path(a), Mark::Path(b)) => Mark::Path(tween_path(a, b, t)),
        (Mark::Text(a), Mark::Text(b)) => Mark::Text(tween_text(a, b, t)),
        _ => snap(a, b, t),
    }
}

fn tween_rect(a: &RectMark, b: &RectMark, t: f64) -> RectMark {
    RectMark {
        x: lerp(a.x, b.x, t),
        y: lerp(a.y, b.y, t),
        w: lerp(a.w, b.w, t),
        h: lerp(a.h, b.h, t),
        rx: tween_opt(a.rx, b.rx, t),
        ry: tween_opt(a.ry, b.ry, t),
        fill: snap(&a.fill, &b.fill, t),
        fill_opacity: tween_opt(a.fill_opacity, b.fill_opacity, t),
        mask: snap(&a.mask, &b.mask, t),
        class_name: snap(&a.class_name, &b.class_name, t),
        id: snap(&a.id, &b.id, t),
        title: snap(&a.title, &b.title, t),
    }
}

fn tween_circle(a: &CircleMark, b: &CircleMark, t: f64) -> CircleMark {
    let stroke_dasharray = match (&a.stroke_dasharray, &b.stroke_dasharray) {
        (Some(da), Some(db)) => Some(tween_numeric_text(da, db, t)),
        _ => snap(&a.stroke_dasharray, &b.stroke_dasharray, t),
    };
    CircleMark {
        cx: lerp(a.cx, b.cx, t),
        cy: lerp(a.cy, b.cy, t),
        r: lerp(a.r, b.r, t),
        fill: snap(&a.fill, &b.fill, t),
        fill_opacity: tween_opt(a.fill_opacity, b.fill_opacity, t),
        stroke: snap(&a.stroke, &b.stroke, t),
        stroke_width: tween_opt(a.stroke_width, b.stroke_width, t),
        stroke_opacity: tween_opt(a.stroke_opacity, b.stroke_opacity, t),
        stroke_dasharray,
        stroke_dashoffset: tween_opt(a.stroke_dashoffset, b.stroke_dashoffset, t),
        class_name: snap(&a.class_name, &b.class_name, t),
        id: snap(&a.id, &b.id, t),
        title: snap(&a.title, &b.title, t),
    }
}

fn tween_line(a: &LineMark, b: &LineMark, t: f64) -> LineMark {
    LineMark {
        x1: lerp(a.x1, b.x1, t),
        y1: lerp(a.y1, b.y1, t),
        x2: lerp(a.x2, b.x2, t),
        y2: lerp(a.y2, b.y2, t),
        stroke: snap(&a.stroke, &b.stroke, t),
        stroke_width: lerp(a.stroke_width, b.stroke_width, t),
        stroke_opacity: tween_opt(a.stroke_opacity, b.stroke_opacity, t),
        stroke_linecap: snap(&a.stroke_linecap, &b.stroke_linecap, t),
        class_name: snap(&a.class_name, &b.class_name, t),
        id: snap(&a.id, &b.id, t),
        title: snap(&a.title, &b.title, t),
    }
}

fn tween_path(a: &PathMark, b: &PathMark, t: f64) -> PathMark {
    PathMark {
        d: tween_numeric_text(&a.d, &b.d, t),
        fill: snap(&a.fill, &b.fill, t),
        fill_opacity: tween_opt(a.fill_opacity, b.fill_opacity, t),
        stroke: snap(&a.stroke, &b.stroke, t),
        stroke_width: tween_opt(a.stroke_width, b.stroke_width, t),
        stroke_opacity: tween_opt(a.stroke_opacity, b.stroke_opacity, t),
        clip_path: snap(&a.clip_path, &b.clip_path, t),
        class_name: snap(&a.class_name, &b.class_name, t),
        id: snap(&a.id, &b.id, t),
        title: snap(&a.title, &b.title, t),
    }
}

fn tween_text(a: &TextMark, b: &TextMark, t: f64) -> TextMark {
    TextMark {
        x: lerp(a.x, b.x, t),
        y: lerp(a.y, b.y, t),
        text: snap(&a.text, &b.text, t),
        font_size: lerp(a.font_size, b.font_size, t),
        fill: snap(&a.fill, &b.fill, t),
        class_name: snap(&a.class_name, &b.class_name, t),
        id: snap(&a.id, &b.id, t),
        title: snap(&a.title, &b.title, t),
    }
}

/// Tweens two whitespace-separated strings of numbers and command letters.
///
/// Falls back to a snap when the token skeletons differ.
fn tween_numeric_text(a: &str, b: &str, t: f64) -> String {
    if a == b {
        return a.to_string();
    }
    let ta: SmallVec<[&str; 32]> = a.split_whitespace().collect();
    let tb: SmallVec<[&str; 32]> = b.split_whitespace().collect();
    if ta.len() != tb.len() {
        return snap(&a, &b, t).to_string();
    }

    let mut out = String::with_capacity(a.len().max(b.len()));
    for (x, y) in ta.iter().zip(&tb) {
        if !out.is_empty() {
            out.push(' ');
        }
        match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => out.push_str(&format_fixed(lerp(x, y, t), PATH_DECIMALS)),
            (Err(_), Err(_)) if x == y => out.push_str(x),
            _ => return snap(&a, &b, t).to_string(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{A11y, A11yItem, Stats};

    fn model(marks: Vec<Mark>) -> RenderModel {
        let mut m = RenderModel::empty(100.0, 10.0);
        m.marks = marks;
        m
    }

    #[test]
    fn identical_endpoints_are_identity() {
        let mut m = model(vec![
            RectMark::new(1.5, 0.0, 20.25, 10.0)
                .with_fill("#123456")
                .with_id("r0")
                .into(),
            PathMark::new("M 0.00 0.00 L 50.00 0.00 Z").into(),
            CircleMark::ring(5.0, 5.0, 4.0, "#000", 2.0)
                .with_dash("6.28 18.85", 6.28)
                .into(),
            LineMark::new(0.0, 0.0, 3.0, 4.0).into(),
        ]);
        m.stats = Some(Stats {
            warnings: vec![String::from("w")],
        });
        m.a11y = Some(A11y {
            role: String::from("img"),
            label: String::from("chart"),
            items: vec![A11yItem {
                id: String::from("r0"),
                label: String::from("r0"),
            }],
        });
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            assert_eq!(interpolate(&m, &m, t), m, "identity failed at t={t}");
        }
    }

    #[test]
    fn numeric_fields_lerp_and_strings_snap() {
        let a = model(vec![RectMark::new(0.0, 0.0, 10.0, 10.0).with_fill("#000000").into()]);
        let b = model(vec![RectMark::new(10.0, 0.0, 30.0, 10.0).with_fill("#ffffff").into()]);

        let Mark::Rect(r) = &interpolate(&a, &b, 0.25).marks[0] else {
            panic!("expected rect");
        };
        assert_eq!(r.x, 2.5);
        assert_eq!(r.w, 15.0);
        assert_eq!(r.fill, "#000000");

        let Mark::Rect(r) = &interpolate(&a, &b, 0.5).marks[0] else {
            panic!("expected rect");
        };
        assert_eq!(r.fill, "#ffffff");
    }

    #[test]
    fn path_data_tweens_when_skeletons_match() {
        let a = model(vec![PathMark::new("M 0.00 0.00 L 10.00 0.00 Z").into()]);
        let b = model(vec![PathMark::new("M 0.00 10.00 L 20.00 0.00 Z").into()]);
        let Mark::Path(p) = &interpolate(&a, &b, 0.5).marks[0] else {
            panic!("expected path");
        };
        assert_eq!(p.d, "M 0.00 5.00 L 15.00 0.00 Z");

        let c = model(vec![PathMark::new("M 0.00 0.00 L 5.00 5.00 L 9.00 9.00 Z").into()]);
        let Mark::Path(p) = &interpolate(&a, &c, 0.4).marks[0] else {
            panic!("expected path");
        };
        assert_eq!(p.d, "M 0.00 0.00 L 10.00 0.00 Z", "mismatched skeleton snaps");
    }

    #[test]
    fn t_is_clamped() {
        let a = model(vec![LineMark::new(0.0, 0.0, 0.0, 0.0).into()]);
        let b = model(vec![LineMark::new(10.0, 0.0, 10.0, 0.0).into()]);
        let Mark::Line(l) = &interpolate(&a, &b, 2.0).marks[0] else {
            panic!("expected line");
        };
        assert_eq!(l.x1, 10.0);
        let Mark::Line(l) = &interpolate(&a, &b, -1.0).marks[0] else {
            panic!("expected line");
        };
        assert_eq!(l.x1, 0.0);
    }

    #[test]
    fn mismatched_counts_pair_by_id() {
        let a = model(vec![
            RectMark::new(0.0, 0.0, 10.0, 10.0).with_id("s-0").into(),
            RectMark::new(10.0, 0.0, 10.0, 10.0).with_id("s-1").into(),
        ]);
        let b = model(vec![RectMark::new(0.0, 0.0, 20.0, 10.0).with_id("s-0").into()]);

        let early = interpolate(&a, &b, 0.25);
        assert_eq!(early.marks.len(), 2, "a's membership before the midpoint");
        let Mark::Rect(r) = &early.marks[0] else {
            panic!("expected rect");
        };
        assert_eq!(r.w, 12.5);

        let late = interpolate(&a, &b, 0.75);
        assert_eq!(late.marks.len(), 1, "b's membership from the midpoint");
        let Mark::Rect(r) = &late.marks[0] else {
            panic!("expected rect");
        };
        assert_eq!(r.w, 17.5);
    }

    #[test]
    fn mismatched_counts_without_ids_hard_cut() {
        let a = model(vec![LineMark::new(0.0, 0.0, 1.0, 1.0).into()]);
        let b = model(vec![
            LineMark::new(0.0, 0.0, 2.0, 2.0).into(),
            LineMark::new(0.0, 0.0, 3.0, 3.0).into(),
        ]);
        assert_eq!(interpolate(&a, &b, 0.4).marks, a.marks);
        assert_eq!(interpolate(&a, &b, 0.6).marks, b.marks);
    }

    #[test]
    fn kind_mismatch_at_an_index_hard_cuts_that_mark() {
        let a = model(vec![RectMark::new(0.0, 0.0, 1.0, 1.0).into()]);
        let b = model(vec![CircleMark::new(0.0, 0.0, 1.0).into()]);
        assert_eq!(interpolate(&a, &b, 0.2).marks, a.marks);
        assert_eq!(interpolate(&a, &b, 0.8).marks, b.marks);
    }
}
