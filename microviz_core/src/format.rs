// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting helpers shared by path data, dash arrays, and labels.

extern crate alloc;

use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats `v` with exactly `decimals` fractional digits.
///
/// `-0.0` (and values that round to zero) are normalized so the output never reads `-0.00`.
/// Non-finite values format as `0` followed by the requested decimals.
pub fn format_fixed(v: f64, decimals: usize) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    let v = round_to_decimals(v, decimals);
    let v = if v == 0.0 { 0.0 } else { v }; // normalize `-0.0`
    alloc::format!("{v:.decimals$}")
}

/// Formats `v` with at most `max_decimals` fractional digits, trimming trailing zeros.
///
/// Used for human-readable labels (`"33.33"`, `"50"`).
pub fn format_number(v: f64, max_decimals: usize) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let s = format_fixed(v, max_decimals);
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

fn round_to_decimals(x: f64, decimals: usize) -> f64 {
    if decimals == 0 {
        return x.round();
    }
    let factor = 10_f64.powi(i32::try_from(decimals.min(9)).unwrap_or(9));
    if !factor.is_finite() || factor == 0.0 {
        return x;
    }
    let scaled = x * factor;
    // Values this large have no fractional digits left to round.
    if !scaled.is_finite() {
        return x;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::{format_fixed, format_number};

    #[test]
    fn fixed_pads_to_requested_precision() {
        assert_eq!(format_fixed(0.0, 2), "0.00");
        assert_eq!(format_fixed(50.0, 2), "50.00");
        assert_eq!(format_fixed(1.005, 1), "1.0");
        assert_eq!(format_fixed(12.345_678, 2), "12.35");
    }

    #[test]
    fn fixed_normalizes_negative_zero() {
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
        assert_eq!(format_fixed(-1.5, 2), "-1.50");
    }

    #[test]
    fn number_trims_trailing_zeros() {
        assert_eq!(format_number(50.0, 2), "50");
        assert_eq!(format_number(33.333_333, 2), "33.33");
        assert_eq!(format_number(2.5, 2), "2.5");
        assert_eq!(format_number(-0.0, 2), "0");
    }

    #[test]
    fn huge_values_print_their_digits() {
        let s = format_number(1e308, 2);
        assert!(s.starts_with("1000000000000000"), "{s}");
        assert!(!s.contains('.'));
    }
}
