// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Duration tokens as they appear in benchmark logs.
//!
//! The load generator prints latencies the way Go formats a `time.Duration`
//! (`850ns`, `12.5µs`, `1.234567ms`, `1.5s`). The parser reads them back as
//! milliseconds. A token without a unit suffix is taken to be milliseconds
//! already.

use std::time::Duration;

use crate::error::{BenchDiffError, BenchDiffResult};

/// How a suffixed number maps onto milliseconds.
#[derive(Debug, Clone, Copy)]
enum Scale {
    Div(f64),
    Mul(f64),
}

/// Unit suffixes, most specific first: every two-letter suffix also ends in `s`.
const SUFFIXES: &[(&str, Scale)] = &[
    ("ns", Scale::Div(1e6)),
    ("\u{00b5}s", Scale::Div(1e3)), // MICRO SIGN, what Go prints
    ("\u{03bc}s", Scale::Div(1e3)), // GREEK SMALL LETTER MU
    ("us", Scale::Div(1e3)),
    ("ms", Scale::Mul(1.0)),
    ("s", Scale::Mul(1e3)),
];

/// Convert a latency token into milliseconds.
pub fn to_ms(token: &str) -> BenchDiffResult<f64> {
    let (number, scale) = SUFFIXES
        .iter()
        .find_map(|(suffix, scale)| token.strip_suffix(suffix).map(|n| (n, *scale)))
        .unwrap_or((token, Scale::Mul(1.0)));

    let value: f64 = number.parse().map_err(|_| BenchDiffError::InvalidDuration {
        token: token.to_string(),
    })?;

    Ok(match scale {
        Scale::Div(d) => value / d,
        Scale::Mul(m) => value * m,
    })
}

/// Parse a duration given on the command line (`10s`, `500ms`, `1m30s`).
///
/// Accepts a bare number (milliseconds, as in [`to_ms`]) or a sequence of
/// number+unit segments as Go's `time.ParseDuration` does, with units `ns`,
/// `us`/`µs`, `ms`, `s`, `m` and `h`. Negative durations are rejected.
pub fn parse_duration(token: &str) -> BenchDiffResult<Duration> {
    let invalid = || BenchDiffError::InvalidDuration {
        token: token.to_string(),
    };

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let ms = if !token.is_empty() && token.chars().all(is_number) {
        to_ms(token)?
    } else {
        if token.is_empty() {
            return Err(invalid());
        }
        let mut rest = token;
        let mut total = 0.0;
        while !rest.is_empty() {
            let unit_at = rest.find(|c| !is_number(c)).unwrap_or(rest.len());
            let (number, tail) = rest.split_at(unit_at);
            let (unit, next) = tail.split_at(tail.find(is_number).unwrap_or(tail.len()));
            let value: f64 = number.parse().map_err(|_| invalid())?;
            total += match segment_scale(unit).ok_or_else(invalid)? {
                Scale::Div(d) => value / d,
                Scale::Mul(m) => value * m,
            };
            rest = next;
        }
        total
    };

    if ms < 0.0 {
        return Err(invalid());
    }

    Duration::try_from_secs_f64(ms / 1_000.0).map_err(|_| invalid())
}

fn segment_scale(unit: &str) -> Option<Scale> {
    match unit {
        "m" => Some(Scale::Mul(60_000.0)),
        "h" => Some(Scale::Mul(3_600_000.0)),
        _ => SUFFIXES
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, scale)| *scale),
    }
}

/// Format a duration the way Go's `time.Duration` prints it below one minute.
///
/// Anything from one second up is printed in seconds, so the output always
/// parses back through [`to_ms`].
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }

    let (unit, digits, suffix) = if nanos < 1_000_000 {
        (1_000, 3, "\u{00b5}s")
    } else if nanos < 1_000_000_000 {
        (1_000_000, 6, "ms")
    } else {
        (1_000_000_000, 9, "s")
    };

    let whole = nanos / unit;
    let frac = nanos % unit;
    if frac == 0 {
        return format!("{}{}", whole, suffix);
    }

    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}{}", whole, frac.trim_end_matches('0'), suffix)
}
