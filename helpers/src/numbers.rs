/// Parse an integer, rejecting anything but an optional sign followed by digits
///
/// No whitespace, no partial parse: `"12px"` is `None`, not `12`.
pub fn strict_parse_int(input: &str) -> Option<i64> {
    let mut chars = input.chars();

    let first = chars.next()?;
    if !(first.is_ascii_digit() || first == '+' || first == '-') {
        return None;
    }

    if !chars.all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    input.parse::<i64>().ok()
}

/// Parse a finite float
///
/// The first character must be a digit, a sign, `.`, `e` or `E`.
pub fn strict_parse_float(input: &str) -> Option<f64> {
    let first = input.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.' | 'e' | 'E')) {
        return None;
    }

    input.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("012", Some(12))]
    #[case("-5", Some(-5))]
    #[case("+20", Some(20))]
    #[case("", None)]
    #[case("+", None)]
    #[case("-", None)]
    #[case("1.5", None)]
    #[case("12px", None)]
    #[case(" 12", None)]
    #[case("1-2", None)]
    #[case("99999999999999999999", None)]
    fn ints(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(expected, strict_parse_int(input));
    }

    #[rstest]
    #[case("1", Some(1.0))]
    #[case("-2.5", Some(-2.5))]
    #[case(".5", Some(0.5))]
    #[case("1e3", Some(1000.0))]
    #[case("1E-2", Some(0.01))]
    #[case("abc", None)]
    #[case("e", None)]
    #[case("1.2.3", None)]
    #[case("+inf", None)]
    #[case("-nan", None)]
    #[case("1e999", None)]
    fn floats(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(expected, strict_parse_float(input));
    }
}
