// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Allocation of a fixed number of bins (cells, dots, rungs) among weighted segments.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::partition::{scaled_weights, total};

/// Splits `units` among `weights` with the largest-remainder method.
///
/// With `keep_visible`, every non-zero weight receives at least one unit whenever `units` is at
/// least the number of non-zero weights; the extra units are taken from the largest allocations.
pub(crate) fn allocate(weights: &[f64], units: usize, keep_visible: bool) -> Vec<usize> {
    let n = weights.len();
    let scaled = scaled_weights(weights, units as f64);
    let total = total(&scaled);
    let mut counts = vec![0_usize; n];
    if total <= 0.0 || units == 0 {
        return counts;
    }

    let mut fracs = Vec::with_capacity(n);
    let mut assigned = 0;
    for (i, w) in scaled.iter().enumerate() {
        let quota = w * units as f64 / total;
        let floor = quota.floor();
        #[allow(clippy::cast_possible_truncation, reason = "quota is within [0, units]")]
        let whole = floor as usize;
        counts[i] = whole;
        assigned += whole;
        fracs.push((quota - floor, i));
    }

    fracs.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in fracs.iter().take(units.saturating_sub(assigned)) {
        counts[i] += 1;
    }

    if keep_visible {
        let visible = weights.iter().filter(|w| **w > 0.0).count();
        if units >= visible {
            for i in 0..n {
                if weights[i] > 0.0 && counts[i] == 0 {
                    let donor = largest(&counts);
                    if counts[donor] > 1 {
                        counts[donor] -= 1;
                        counts[i] += 1;
                    }
                }
            }
        }
    }
    counts
}

/// Index of the largest count; ties resolve to the lower index.
fn largest(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, c) in counts.iter().enumerate() {
        if *c > counts[best] {
            best = i;
        }
    }
    best
}

/// Expands per-segment counts into a per-bin segment index sequence.
///
/// Without `interleave` the sequence is run-length ordered (`[0, 0, 0, 1, 1, 1]`). With it, each
/// step picks the segment that is furthest behind its ideal share at that point, so small
/// segments surface early and spread out instead of trailing at the end. Ties go to the smaller
/// segment, then to the lower index. Integer arithmetic keeps the order exact.
pub(crate) fn bin_sequence(counts: &[usize], interleave: bool) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    let mut out = Vec::with_capacity(n);
    if !interleave {
        for (i, &c) in counts.iter().enumerate() {
            out.extend(core::iter::repeat_n(i, c));
        }
        return out;
    }

    let total = n as i128;
    let mut assigned = vec![0_usize; counts.len()];
    for step in 0..n {
        let mut best: Option<(usize, i128)> = None;
        for (i, &c) in counts.iter().enumerate() {
            if assigned[i] >= c {
                continue;
            }
            let lag = c as i128 * (step as i128 + 1) - assigned[i] as i128 * total;
            let better = match best {
                None => true,
                Some((b, best_lag)) => lag > best_lag || (lag == best_lag && c < counts[b]),
            };
            if better {
                best = Some((i, lag));
            }
        }
        if let Some((i, _)) = best {
            assigned[i] += 1;
            out.push(i);
        }
    }
    out
}
