//! Numeral style number patterns
//!
//! A pattern is built from `0`, `,` (thousands grouping), `.` followed by
//! fixed `0`s and optional `[0]`s, a `+` to always show the sign, `$`
//! before or after the number and a trailing `%` (value times 100).

const DEFAULT_PATTERN: &str = "0,0";

#[derive(Debug, Default, PartialEq)]
struct Pattern {
    always_sign: bool,
    grouped: bool,
    fixed_decimals: usize,
    optional_decimals: usize,
    currency_prefix: Option<&'static str>,
    currency_suffix: Option<&'static str>,
    percent: Option<&'static str>,
}

impl Pattern {
    fn parse(pattern: &str) -> Self {
        let trimmed = pattern.trim_start_matches(['+', '-']);
        let currency_first = trimmed.starts_with('$');
        let currency_last = !currency_first && pattern.ends_with('$');

        let (integer, decimals) = match pattern.find('.') {
            Some(dot) => (&pattern[..dot], &pattern[dot + 1..]),
            None => (pattern, ""),
        };

        let (fixed, optional) = match decimals.find('[') {
            Some(open) => (&decimals[..open], &decimals[open..]),
            None => (decimals, ""),
        };

        let zeros = |part: &str| part.chars().filter(|ch| *ch == '0').count();

        Pattern {
            always_sign: pattern.contains('+'),
            grouped: integer.contains(','),
            fixed_decimals: zeros(fixed),
            optional_decimals: zeros(optional),
            currency_prefix: currency_first.then(|| {
                if trimmed.starts_with("$ ") { "$ " } else { "$" }
            }),
            currency_suffix: currency_last.then(|| {
                if pattern.ends_with(" $") { " $" } else { "$" }
            }),
            percent: pattern.contains('%').then(|| {
                if pattern.contains(" %") { " %" } else { "%" }
            }),
        }
    }
}

/// Format `value` with a numeral style `pattern`, `0,0` when empty
pub fn format_number(value: f64, pattern: &str) -> String {
    let pattern = if pattern.trim().is_empty() {
        DEFAULT_PATTERN
    } else {
        pattern
    };
    let pattern = Pattern::parse(pattern);

    let value = if pattern.percent.is_some() {
        value * 100.0
    } else {
        value
    };

    let decimals = pattern.fixed_decimals + pattern.optional_decimals;
    let mut digits = format!("{:.*}", decimals, value.abs());

    if pattern.optional_decimals > 0 {
        let keep = digits.len() - pattern.optional_decimals;
        while digits.len() > keep && digits.ends_with('0') {
            digits.pop();
        }
        if digits.ends_with('.') {
            digits.pop();
        }
    }

    let (integer, fraction) = match digits.find('.') {
        Some(dot) => digits.split_at(dot),
        None => (digits.as_str(), ""),
    };

    let is_zero = digits.chars().all(|ch| ch == '0' || ch == '.');
    let sign = if value < 0.0 && !is_zero {
        "-"
    } else if pattern.always_sign && !is_zero {
        "+"
    } else {
        ""
    };

    let mut out = String::with_capacity(digits.len() + 8);
    out.push_str(sign);
    out.push_str(pattern.currency_prefix.unwrap_or_default());
    if pattern.grouped {
        out.push_str(&group_thousands(integer));
    } else {
        out.push_str(integer);
    }
    out.push_str(fraction);
    out.push_str(pattern.currency_suffix.unwrap_or_default());
    out.push_str(pattern.percent.unwrap_or_default());
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1234.56, "0,0", "1,235")]
    #[case(1234.567, "0,0.00", "1,234.57")]
    #[case(1234567.0, "0,0", "1,234,567")]
    #[case(123.0, "0,0", "123")]
    #[case(-1234.0, "0,0", "-1,234")]
    #[case(1234.0, "0", "1234")]
    #[case(0.5, "0%", "50%")]
    #[case(0.256, "0.0 %", "25.6 %")]
    #[case(1000.0, "$0,0.00", "$1,000.00")]
    #[case(-12.0, "$ 0", "-$ 12")]
    #[case(12.0, "0 $", "12 $")]
    #[case(1.5, "0.[00]", "1.5")]
    #[case(2.0, "0.[00]", "2")]
    #[case(2.126, "0.0[0]", "2.13")]
    #[case(2.1, "0.0[0]", "2.1")]
    #[case(5.0, "+0", "+5")]
    #[case(-5.0, "+0", "-5")]
    #[case(0.0, "+0", "0")]
    #[case(-0.001, "0.00", "0.00")]
    #[case(9876.0, "", "9,876")]
    fn patterns(#[case] value: f64, #[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(expected, format_number(value, pattern));
    }

    #[test]
    fn parse_pattern() {
        assert_eq!(
            Pattern {
                always_sign: true,
                grouped: true,
                fixed_decimals: 1,
                optional_decimals: 2,
                currency_prefix: Some("$"),
                ..Default::default()
            },
            Pattern::parse("+$0,0.0[00]")
        );
    }
}
