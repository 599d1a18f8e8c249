// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-precision SVG path data.
//!
//! Path marks carry their geometry as an SVG `d` string. Layouts build geometry with
//! [`kurbo::BezPath`] and serialize it here, so every path in a model shares one textual form:
//! space separated, upper-case absolute commands, two decimals per coordinate.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, PathEl, Point};

use crate::format::format_fixed;

/// Decimal places used for path coordinates.
pub(crate) const PATH_DECIMALS: usize = 2;

/// Serializes `path` as SVG path data, e.g. `"M 0.00 0.00 L 50.00 0.00 Z"`.
pub fn svg_path_data(path: &BezPath) -> String {
    let mut out = String::new();
    for el in path.elements() {
        if !out.is_empty() {
            out.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => {
                out.push('M');
                push_point(&mut out, p);
            }
            PathEl::LineTo(p) => {
                out.push('L');
                push_point(&mut out, p);
            }
            PathEl::QuadTo(p1, p2) => {
                out.push('Q');
                push_point(&mut out, p1);
                push_point(&mut out, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                out.push('C');
                push_point(&mut out, p1);
                push_point(&mut out, p2);
                push_point(&mut out, p3);
            }
            PathEl::ClosePath => out.push('Z'),
        }
    }
    out
}

fn push_point(out: &mut String, p: Point) {
    out.push(' ');
    out.push_str(&format_fixed(p.x, PATH_DECIMALS));
    out.push(' ');
    out.push_str(&format_fixed(p.y, PATH_DECIMALS));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lines_and_close() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((50.0, 0.0));
        p.line_to((58.0, 5.0));
        p.close_path();
        assert_eq!(svg_path_data(&p), "M 0.00 0.00 L 50.00 0.00 L 58.00 5.00 Z");
    }

    #[test]
    fn serializes_curves() {
        let mut p = BezPath::new();
        p.move_to((1.0, 2.0));
        p.quad_to((3.0, 4.0), (5.0, 6.0));
        p.curve_to((1.0, 1.0), (2.0, 2.0), (3.333, -0.0));
        assert_eq!(
            svg_path_data(&p),
            "M 1.00 2.00 Q 3.00 4.00 5.00 6.00 C 1.00 1.00 2.00 2.00 3.33 0.00"
        );
    }

    #[test]
    fn empty_path_is_empty_string() {
        assert_eq!(svg_path_data(&BezPath::new()), "");
    }
}
