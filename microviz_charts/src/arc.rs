// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial geometry: dash-array rings and annular slices.
//!
//! Angles here are fractions of a full turn measured clockwise from 12 o'clock, which is how the
//! ring variants describe sweeps. Conversions to kurbo's radians (0 at 3 o'clock, clockwise in a
//! y-down space) happen at the edge.

extern crate alloc;

use alloc::string::String;

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{BezPath, Circle, Point, Shape};
use microviz_core::format_fixed;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Flattening tolerance for slice outlines.
const TOLERANCE: f64 = 0.1;

/// Circumference of a circle of radius `r`.
pub(crate) fn circumference(r: f64) -> f64 {
    TAU * r.max(0.0)
}

/// Dash pattern drawing an arc on a stroked circle.
///
/// Returns `(dasharray, dashoffset)` for an arc that starts `start` turns clockwise from
/// 12 o'clock and sweeps `sweep` turns. SVG circles start at 3 o'clock, hence the quarter-turn
/// shift folded into the offset.
pub(crate) fn ring_dash(r: f64, start: f64, sweep: f64) -> (String, f64) {
    let c = circumference(r);
    let len = (sweep.clamp(0.0, 1.0) * c).max(0.0);
    let dasharray = alloc::format!("{} {}", format_fixed(len, 2), format_fixed(c - len, 2));
    let offset = round2(c * 0.25 - start * c);
    (dasharray, offset)
}

fn round2(v: f64) -> f64 {
    let v = (v * 100.0).round() / 100.0;
    if v == 0.0 { 0.0 } else { v }
}

/// Converts a clockwise-from-top turn fraction into kurbo radians.
pub(crate) fn turn_to_radians(turns: f64) -> f64 {
    turns * TAU - FRAC_PI_2
}

/// Point on a circle at `turns` clockwise from 12 o'clock.
pub(crate) fn polar(center: Point, r: f64, turns: f64) -> Point {
    let a = turn_to_radians(turns);
    Point::new(center.x + r * a.cos(), center.y + r * a.sin())
}

/// Outline of an annular slice (`inner == 0` gives a pie wedge).
pub(crate) fn slice_path(center: Point, outer: f64, inner: f64, start: f64, sweep: f64) -> BezPath {
    let segment = Circle::new(center, outer.max(0.0)).segment(
        inner.clamp(0.0, outer.max(0.0)),
        turn_to_radians(start),
        sweep * TAU,
    );
    segment.path_elements(TOLERANCE).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_arc_dash() {
        let r = 10.0 / TAU;
        let (dash, offset) = ring_dash(r, 0.0, 0.25);
        assert_eq!(dash, "2.50 7.50");
        assert_eq!(offset, 2.5);
        let (_, offset) = ring_dash(r, 0.25, 0.25);
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn polar_starts_at_twelve_o_clock() {
        let p = polar(Point::new(5.0, 5.0), 5.0, 0.0);
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!((p.y - 0.0).abs() < 1e-9);
        let p = polar(Point::new(5.0, 5.0), 5.0, 0.25);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn slice_bounds_stay_inside_the_circle() {
        let p = slice_path(Point::new(50.0, 50.0), 40.0, 20.0, 0.0, 0.25);
        let b = p.bounding_box();
        assert!(b.x0 >= 49.0 && b.x1 <= 90.5, "{b:?}");
        assert!(b.y0 >= 9.5 && b.y1 <= 51.0, "{b:?}");
    }
}
