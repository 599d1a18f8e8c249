// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lenient access to per-variant options on a spec object.
//!
//! Options are read straight off the `spec` JSON object. Unknown keys are never looked at;
//! wrongly-typed values fall back to the caller's default; out-of-range values are clamped.

extern crate alloc;

use alloc::string::String;

use serde_json::{Map, Value};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::prng::fnv1a;

/// A read-only view over the options of a spec.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Options<'a> {
    /// Wraps a spec value. Non-objects behave like an empty option set.
    pub fn new(spec: &'a Value) -> Self {
        Self {
            map: spec.as_object(),
        }
    }

    /// Returns the raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    /// Reads a finite number; numeric strings are accepted.
    pub fn number_opt(&self, key: &str) -> Option<f64> {
        let v = match self.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Reads a finite number or returns `default`.
    pub fn number(&self, key: &str, default: f64) -> f64 {
        self.number_opt(key).unwrap_or(default)
    }

    /// Reads a number clamped to `>= 0`.
    pub fn non_negative(&self, key: &str, default: f64) -> f64 {
        self.number(key, default).max(0.0)
    }

    /// Reads a number clamped to `[min, max]`.
    pub fn clamped(&self, key: &str, default: f64, min: f64, max: f64) -> f64 {
        self.number(key, default).clamp(min, max)
    }

    /// Reads a whole count (rounded) clamped to `[min, max]`.
    pub fn count_opt(&self, key: &str, min: usize, max: usize) -> Option<usize> {
        let v = self.number_opt(key)?.round();
        Some(to_count(v, min, max))
    }

    /// Reads a whole count (rounded) clamped to `[min, max]`, or `default` (also clamped).
    pub fn count(&self, key: &str, default: usize, min: usize, max: usize) -> usize {
        self.count_opt(key, min, max)
            .unwrap_or_else(|| default.clamp(min, max))
    }

    /// Reads a boolean; numbers are truthy when non-zero and `"true"`/`"false"` strings parse.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map_or(default, |v| v != 0.0),
            Some(Value::String(s)) => match s.trim() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// Reads a non-empty string.
    pub fn text(&self, key: &str) -> Option<&'a str> {
        match self.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Reads a color string or returns `default`.
    pub fn color(&self, key: &str, default: &str) -> String {
        String::from(self.text(key).unwrap_or(default))
    }

    /// Reads a PRNG seed: numbers are truncated to `u32` (wrapping), strings are hashed.
    pub fn seed(&self, key: &str) -> Option<u32> {
        match self.get(key)? {
            Value::String(s) => Some(fnv1a(s.as_bytes())),
            Value::Number(n) => {
                let v = n.as_f64()?;
                if !v.is_finite() {
                    return None;
                }
                #[allow(clippy::cast_possible_truncation, reason = "seeds wrap by design")]
                let seed = (v.trunc() as i64) as u32;
                Some(seed)
            }
            _ => None,
        }
    }
}

fn to_count(v: f64, min: usize, max: usize) -> usize {
    if v.is_nan() || v <= min as f64 {
        return min;
    }
    if v >= max as f64 {
        return max;
    }
    #[allow(clippy::cast_possible_truncation, reason = "clamped before cast")]
    let n = v as usize;
    n
}
