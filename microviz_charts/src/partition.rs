// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proportional partitioning of a length into spans.
//!
//! All partitioners share one contract: `weights` are the (non-negative) shares, spans are laid
//! out in order starting at `origin`, and `gap` is inserted between consecutive spans. Shares are
//! taken relative to the sum of the weights, so weights need not sum to 100.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A contiguous interval along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Span {
    pub(crate) start: f64,
    pub(crate) len: f64,
}

impl Span {
    pub(crate) fn end(&self) -> f64 {
        self.start + self.len
    }
}

pub(crate) fn total(weights: &[f64]) -> f64 {
    weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum()
}

/// Positive finite weights (others become zero), halved together until their sum times `length`
/// is finite.
///
/// Halving is exact, so every share and boundary computed from the result equals the one computed
/// from the raw weights whenever the raw arithmetic does not overflow.
pub(crate) fn scaled_weights(weights: &[f64], length: f64) -> Vec<f64> {
    let mut out: Vec<f64> = weights
        .iter()
        .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    let peak = out.iter().copied().fold(0.0, f64::max);
    let reach = out.len() as f64 * length.abs().max(1.0);
    let mut scale = 1.0;
    while !(peak * scale * reach).is_finite() {
        scale *= 0.5;
    }
    if scale < 1.0 {
        for w in &mut out {
            *w *= scale;
        }
    }
    out
}

/// `length * value / max`, dividing first when the product would overflow.
pub(crate) fn share_of(length: f64, value: f64, max: f64) -> f64 {
    let product = length * value;
    if product.is_finite() {
        product / max
    } else {
        length * (value / max)
    }
}

fn usable(length: f64, gap: f64, n: usize) -> f64 {
    let gaps = n.saturating_sub(1) as f64;
    (length - gap * gaps).max(0.0)
}

/// Float spans by running cumulative share.
pub(crate) fn partition(weights: &[f64], origin: f64, length: f64, gap: f64) -> Vec<Span> {
    let weights = scaled_weights(weights, length);
    let total = total(&weights);
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    let gap = gap.max(0.0);
    let usable = usable(length.max(0.0), gap, weights.len());

    let mut out = Vec::with_capacity(weights.len());
    let mut cum = 0.0;
    for (i, w) in weights.iter().enumerate() {
        let offset = origin + i as f64 * gap;
        let start = offset + cum * usable / total;
        cum += w.max(0.0);
        let end = offset + cum * usable / total;
        out.push(Span {
            start,
            len: end - start,
        });
    }
    out
}

/// Integer spans whose lengths sum exactly to the usable integer length.
///
/// Boundaries are `round(cum * usable / total)`; the multiplication happens before the division so
/// exact half-pixel boundaries stay exact and round away from zero.
pub(crate) fn snap_spans(weights: &[f64], origin: f64, length: f64, gap: f64) -> Vec<Span> {
    let weights = scaled_weights(weights, length);
    let total = total(&weights);
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    let origin = origin.round();
    let gap = gap.max(0.0).round();
    let usable = usable(length.max(0.0).round(), gap, weights.len());

    let mut out = Vec::with_capacity(weights.len());
    let mut cum = 0.0;
    let mut prev = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cum += w.max(0.0);
        let boundary = (cum * usable / total).round();
        out.push(Span {
            start: origin + prev + i as f64 * gap,
            len: boundary - prev,
        });
        prev = boundary;
    }
    out
}

/// Float spans where every span is at least `min` long.
///
/// Spans that would fall below `min` are pinned at `min` and the rest is re-shared among the
/// remaining weights until nothing changes. When `n * min` does not fit, all spans are equal.
pub(crate) fn partition_with_floor(
    weights: &[f64],
    origin: f64,
    length: f64,
    gap: f64,
    min: f64,
) -> Vec<Span> {
    let n = weights.len();
    let weights = scaled_weights(weights, length);
    if n == 0 || total(&weights) <= 0.0 {
        return Vec::new();
    }
    let gap = gap.max(0.0);
    let min = min.max(0.0);
    let usable = usable(length.max(0.0), gap, n);

    let lens = floored_lengths(&weights, usable, min);
    let mut out = Vec::with_capacity(n);
    let mut cursor = origin;
    for len in lens {
        out.push(Span { start: cursor, len });
        cursor += len + gap;
    }
    out
}

fn floored_lengths(weights: &[f64], usable: f64, min: f64) -> Vec<f64> {
    let n = weights.len();
    let visible = weights.iter().filter(|w| **w > 0.0).count();
    if min * visible as f64 >= usable {
        let each = usable / visible.max(1) as f64;
        return weights
            .iter()
            .map(|w| if *w > 0.0 { each } else { 0.0 })
            .collect();
    }

    let mut pinned = vec![false; n];
    let mut lens = vec![0.0; n];
    loop {
        let pinned_count = pinned.iter().filter(|p| **p).count();
        let free = usable - min * pinned_count as f64;
        let free_total: f64 = weights
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| w.max(0.0))
            .sum();

        let mut changed = false;
        for i in 0..n {
            if pinned[i] {
                lens[i] = min;
                continue;
            }
            lens[i] = if free_total > 0.0 {
                weights[i].max(0.0) * free / free_total
            } else {
                0.0
            };
            if lens[i] < min && weights[i] > 0.0 {
                pinned[i] = true;
                lens[i] = min;
                changed = true;
            }
        }
        if !changed {
            return lens;
        }
    }
}

/// Rounds float lengths to integers summing to `total` (largest remainder).
///
/// Floors come first; the leftover pixels go to the largest fractional parts, ties to the
/// lower index.
pub(crate) fn snap_lengths(lengths: &[f64], total: f64) -> Vec<f64> {
    let mut out: Vec<f64> = lengths.iter().map(|l| l.max(0.0).floor()).collect();
    let assigned: f64 = out.iter().sum();
    let mut leftover = (total.round() - assigned).max(0.0);

    let mut order: Vec<usize> = (0..lengths.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = lengths[a] - out[a];
        let fb = lengths[b] - out[b];
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for i in order {
        if leftover < 1.0 {
            break;
        }
        out[i] += 1.0;
        leftover -= 1.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_proportional_to_sum_not_100() {
        let spans = partition(&[1.0, 3.0], 0.0, 100.0, 0.0);
        assert_eq!(spans[0], Span { start: 0.0, len: 25.0 });
        assert_eq!(spans[1], Span { start: 25.0, len: 75.0 });
    }

    #[test]
    fn partition_inserts_gaps() {
        let spans = partition(&[50.0, 50.0], 10.0, 102.0, 2.0);
        assert_eq!(spans[0], Span { start: 10.0, len: 50.0 });
        assert_eq!(spans[1], Span { start: 62.0, len: 50.0 });
        assert_eq!(spans[1].end(), 112.0);
    }

    #[test]
    fn partition_of_nothing_is_empty() {
        assert!(partition(&[], 0.0, 100.0, 0.0).is_empty());
        assert!(partition(&[0.0, 0.0], 0.0, 100.0, 0.0).is_empty());
    }

    #[test]
    fn snapped_equal_bins_fill_exactly() {
        let spans = snap_spans(&[1.0; 48], 0.0, 200.0, 1.0);
        assert_eq!(spans.len(), 48);
        let wide: Vec<usize> = spans
            .iter()
            .enumerate()
            .filter(|(_, s)| s.len == 4.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(wide, [2, 7, 13, 18, 23, 29, 34, 39, 45]);
        assert_eq!(spans.last().unwrap().end(), 200.0);
    }

    #[test]
    fn floor_pins_small_spans() {
        let spans = partition_with_floor(&[98.0, 1.0, 1.0], 0.0, 100.0, 0.0, 10.0);
        assert_eq!(spans[1].len, 10.0);
        assert_eq!(spans[2].len, 10.0);
        assert!((spans[0].len - 80.0).abs() < 1e-9);
        assert!((spans[2].end() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn floor_degrades_to_equal_spans_when_it_cannot_fit() {
        let spans = partition_with_floor(&[1.0, 2.0, 3.0], 0.0, 12.0, 0.0, 5.0);
        assert!(spans.iter().all(|s| s.len == 4.0));
    }

    #[test]
    fn largest_remainder_rounding_sums_exactly() {
        let out = snap_lengths(&[33.4, 33.3, 33.3], 100.0);
        assert_eq!(out, [34.0, 33.0, 33.0]);
        let out = snap_lengths(&[2.5, 2.5], 5.0);
        assert_eq!(out, [3.0, 2.0]);
    }

    #[test]
    fn scaling_is_exact_and_drops_bad_weights() {
        assert_eq!(scaled_weights(&[1.0, 3.0], 100.0), [1.0, 3.0]);
        let big = 1e308;
        let w = scaled_weights(&[big, big / 2.0, -1.0, f64::NAN], 100.0);
        assert_eq!(w[0], 2.0 * w[1]);
        assert_eq!((w[2], w[3]), (0.0, 0.0));
        assert!((total(&w) * 100.0).is_finite());
    }

    #[test]
    fn huge_weights_still_partition() {
        let spans = partition(&[1e308, 1e308], 0.0, 100.0, 0.0);
        assert!((spans[0].len - 50.0).abs() < 1e-9);
        assert!((spans[1].end() - 100.0).abs() < 1e-9);

        let snapped = snap_spans(&[1e308; 4], 0.0, 100.0, 0.0);
        assert!(snapped.iter().all(|s| s.len == 25.0));

        let floored = partition_with_floor(&[1e308, 1e308, 1.0], 0.0, 100.0, 0.0, 4.0);
        assert!(floored.iter().all(|s| s.len.is_finite()));
        assert_eq!(floored[2].len, 4.0);
    }

    #[test]
    fn share_of_divides_first_on_overflow() {
        assert_eq!(share_of(30.0, 1.0, 3.0), 10.0);
        assert_eq!(share_of(100.0, 1e308, 1e308), 100.0);
    }
}
