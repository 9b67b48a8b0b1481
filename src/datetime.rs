//! Date parsing and formatting for `$date … $format …` expressions.
//!
//! Format patterns use day.js-style tokens (`YYYY`, `MM`, `DD`, `HH`, `mm`,
//! `ss`, …), which are the tokens mapping schemas are written with. They are
//! translated to chrono format items before rendering; characters that are
//! not recognized tokens pass through literally.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::value::Value;

/// Ordered longest-first so that e.g. `MM` is never read as two `M` tokens.
const TOKENS: &[(&str, &str)] = &[
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("YYYY", "%Y"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("A", "%p"),
    ("a", "%P"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("Z", "%:z"),
];

/// Parse a scalar as a date and render it with a day.js-style pattern.
///
/// Returns `None` when the value cannot be interpreted as a date; the date
/// evaluator maps that to a missing result.
///
/// # Examples
///
/// ```
/// use remold::datetime::format_value;
/// use remold::Value;
///
/// let value = Value::String("2021-03-04T10:30:00Z".to_string());
/// assert_eq!(format_value(&value, "DD/MM/YYYY"), Some("04/03/2021".to_string()));
/// ```
pub fn format_value(value: &Value, pattern: &str) -> Option<String> {
    let parsed = parse_value(value)?;
    Some(parsed.format(&translate_pattern(pattern)).to_string())
}

fn parse_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_str(s.trim()),
        Value::Integer(n) => parse_epoch(*n),
        Value::Float(n) => parse_epoch(*n as i64),
        _ => None,
    }
}

fn parse_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Some(dt.naive_utc());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // bare epoch written as a string
    s.parse::<i64>().ok().and_then(parse_epoch)
}

fn parse_epoch(n: i64) -> Option<NaiveDateTime> {
    // heuristically treat large magnitudes as milliseconds
    let dt = if n.abs() >= 100_000_000_000 {
        DateTime::<Utc>::from_timestamp_millis(n)?
    } else {
        DateTime::<Utc>::from_timestamp(n, 0)?
    };
    Some(dt.naive_utc())
}

fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        for (token, replacement) in TOKENS {
            if rest.starts_with(token) {
                out.push_str(replacement);
                rest = &rest[token.len()..];
                continue 'outer;
            }
        }

        let ch = rest.chars().next().unwrap_or_default();
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}
