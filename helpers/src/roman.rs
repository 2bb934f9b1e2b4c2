/// Value of a roman numeral, `None` if `input` is not one
///
/// Case insensitive, no trimming. `I` may repeat up to four times in a row,
/// other symbols up to three times. Only one subtraction in a row is allowed
/// (`CDM` is rejected).
pub fn roman_to_number(input: &str) -> Option<u32> {
    if input.is_empty() {
        return None;
    }

    let mut result: u32 = 0;
    let mut subtracted = false;
    let mut prev_value = u32::MAX;
    let mut run = 0;

    for ch in input.chars() {
        let value = symbol_value(ch.to_ascii_uppercase())?;

        if value > prev_value {
            if subtracted {
                return None;
            }
            // prev_value was added on the previous step, take it back twice
            result = result - prev_value + (value - prev_value);
            subtracted = true;
        } else {
            result += value;
            subtracted = false;
        }

        run = if value == prev_value { run + 1 } else { 1 };
        prev_value = value;

        let max_run = if value == 1 { 4 } else { 3 };
        if run > max_run {
            return None;
        }
    }

    Some(result)
}

fn symbol_value(ch: char) -> Option<u32> {
    match ch {
        'M' => Some(1000),
        'D' => Some(500),
        'C' => Some(100),
        'L' => Some(50),
        'X' => Some(10),
        'V' => Some(5),
        'I' => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn number_to_roman(mut number: u32) -> String {
        const TABLE: [(u32, &str); 13] = [
            (1000, "M"),
            (900, "CM"),
            (500, "D"),
            (400, "CD"),
            (100, "C"),
            (90, "XC"),
            (50, "L"),
            (40, "XL"),
            (10, "X"),
            (9, "IX"),
            (5, "V"),
            (4, "IV"),
            (1, "I"),
        ];

        let mut out = String::new();
        for (value, symbol) in TABLE {
            while number >= value {
                out.push_str(symbol);
                number -= value;
            }
        }
        out
    }

    #[test]
    fn round_trip() {
        for number in 1..=3999 {
            assert_eq!(
                Some(number),
                roman_to_number(&number_to_roman(number)),
                "{}",
                number_to_roman(number)
            );
        }
    }

    #[rstest]
    #[case("I", 1)]
    #[case("II", 2)]
    #[case("III", 3)]
    #[case("IIII", 4)]
    #[case("IV", 4)]
    #[case("VI", 6)]
    #[case("xii", 12)]
    #[case("XCIV", 94)]
    #[case("MCMXCIX", 1999)]
    #[case("MIM", 1999)]
    #[case("MCML", 1950)]
    #[case("MLM", 1950)]
    fn valid(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(Some(expected), roman_to_number(input));
    }

    #[rstest]
    #[case("")]
    #[case("IIIII")]
    #[case("XXXX")]
    #[case("CDM")]
    #[case("ABC")]
    #[case(" X")]
    fn invalid(#[case] input: &str) {
        assert_eq!(None, roman_to_number(input));
    }
}
