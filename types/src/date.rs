//! Moment style date patterns
//!
//! Supported tokens: `YYYY YY MMMM MMM MM M Do DD D dddd ddd HH H hh h mm m ss s A a`.
//! Text inside `[...]` is copied literally, any other character is copied as is.

use chrono::{DateTime, Datelike, FixedOffset};

// Longest tokens first so `MMMM` wins over `MM`
const TOKENS: [&str; 21] = [
    "YYYY", "MMMM", "dddd", "MMM", "ddd", "YY", "MM", "Do", "DD", "HH", "hh", "mm", "ss", "M",
    "D", "H", "h", "m", "s", "A", "a",
];

/// Format `date` in its own offset using a moment style `pattern`
///
/// The pattern is translated to chrono's strftime syntax, `Do` is the only
/// token chrono has no specifier for.
pub fn format(date: &DateTime<FixedOffset>, pattern: &str) -> String {
    date.format(&to_strftime(date, pattern)).to_string()
}

fn to_strftime(date: &DateTime<FixedOffset>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('[') {
            match stripped.find(']') {
                Some(end) => {
                    push_literal(&mut out, &stripped[..end]);
                    rest = &stripped[end + 1..];
                    continue;
                }
                None => {
                    push_literal(&mut out, rest);
                    break;
                }
            }
        }

        match TOKENS.iter().find(|token| rest.starts_with(**token)) {
            Some(token) => {
                match specifier(token) {
                    Some(specifier) => out.push_str(specifier),
                    None => push_literal(&mut out, &ordinal(date.day())),
                }
                rest = &rest[token.len()..];
            }
            None => {
                let ch = rest.chars().next().unwrap_or_default();
                push_literal(&mut out, &rest[..ch.len_utf8()]);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

fn specifier(token: &str) -> Option<&'static str> {
    let specifier = match token {
        "YYYY" => "%Y",
        "YY" => "%y",
        "MMMM" => "%B",
        "MMM" => "%b",
        "MM" => "%m",
        "M" => "%-m",
        "DD" => "%d",
        "D" => "%-d",
        "dddd" => "%A",
        "ddd" => "%a",
        "HH" => "%H",
        "H" => "%-H",
        "hh" => "%I",
        "h" => "%-I",
        "mm" => "%M",
        "m" => "%-M",
        "ss" => "%S",
        "s" => "%-S",
        "A" => "%p",
        "a" => "%P",
        _ => return None,
    };

    Some(specifier)
}

fn push_literal(out: &mut String, text: &str) {
    out.push_str(&text.replace('%', "%%"));
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    format!("{day}{suffix}")
}
