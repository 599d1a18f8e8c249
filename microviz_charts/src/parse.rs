// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text to number-array coercion for free-form input fields.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

/// Result of [`parse_number_array`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParsedNumbers {
    /// Finite numbers in input order.
    pub data: Vec<f64>,
    /// Tokens that did not parse, verbatim. Only reported in strict mode, and `None` (never
    /// empty) when nothing was dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped: Option<Vec<String>>,
}

/// Splits `text` on commas, semicolons, pipes and whitespace and parses each token as a number.
///
/// A single surrounding `[` … `]` pair is ignored so JSON arrays paste cleanly, and tokens may be
/// wrapped in double quotes. Empty tokens are skipped; tokens that are not finite numbers are
/// dropped. With `strict`, dropped tokens are reported in [`ParsedNumbers::dropped`].
///
/// ```
/// use microviz_charts::parse_number_array;
///
/// let parsed = parse_number_array("[1, 2.5; x | 4]", true);
/// assert_eq!(parsed.data, [1.0, 2.5, 4.0]);
/// assert_eq!(parsed.dropped, Some(vec![String::from("x")]));
/// ```
pub fn parse_number_array(text: &str, strict: bool) -> ParsedNumbers {
    let mut body = text.trim();
    if let Some(inner) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        body = inner;
    }

    let mut data = Vec::new();
    let mut dropped = Vec::new();
    for token in body
        .split(|c: char| matches!(c, ',' | ';' | '|') || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match parse_token(token) {
            Some(v) => data.push(v),
            None if strict => dropped.push(String::from(token)),
            None => {}
        }
    }

    ParsedNumbers {
        data,
        dropped: (!dropped.is_empty()).then_some(dropped),
    }
}

fn parse_token(token: &str) -> Option<f64> {
    let unquoted = token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token);
    let v = unquoted.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn mixed_delimiters() {
        let p = parse_number_array("1,2;3|4 5\t6\n7", false);
        assert_eq!(p.data, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(p.dropped, None);
    }

    #[test]
    fn json_array_with_quoted_numbers() {
        let p = parse_number_array(r#"["1", 2, -3.5e1]"#, true);
        assert_eq!(p.data, [1.0, 2.0, -35.0]);
        assert_eq!(p.dropped, None);
    }

    #[test]
    fn strict_mode_reports_original_tokens() {
        let p = parse_number_array("1, abc, NaN, 2, inf, {x}", true);
        assert_eq!(p.data, [1.0, 2.0]);
        assert_eq!(
            p.dropped,
            Some(vec![
                String::from("abc"),
                String::from("NaN"),
                String::from("inf"),
                String::from("{x}"),
            ])
        );
    }

    #[test]
    fn lenient_mode_never_reports_drops() {
        let p = parse_number_array("1, abc", false);
        assert_eq!(p.data, [1.0]);
        assert_eq!(p.dropped, None);
    }

    #[test]
    fn dropped_is_omitted_from_the_wire_form_when_clean() {
        let v = serde_json::to_value(parse_number_array("1 2", true)).unwrap();
        assert!(v.get("dropped").is_none());
        let v = serde_json::to_value(parse_number_array("1 x", true)).unwrap();
        assert_eq!(v["dropped"], serde_json::json!(["x"]));
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_number_array("  ", true), ParsedNumbers::default());
        assert_eq!(parse_number_array("[]", true), ParsedNumbers::default());
    }
}
