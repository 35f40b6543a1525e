//! pt-BR presentation helpers: money in, money out.

use rust_decimal::Decimal;

/// Formats a value as Brazilian Real, e.g. `R$ 1.234,56`. Negative values
/// carry the sign ahead of the symbol.
pub fn format_currency(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("-R$ {}", format_number(-value, 2))
    } else {
        format!("R$ {}", format_number(value, 2))
    }
}

/// Formats with a fixed number of fraction digits, `.` grouping thousands
/// and `,` as the decimal mark.
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp(decimals);
    let plain = format!("{rounded:.prec$}", prec = decimals as usize);

    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped},{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Parses locale-formatted currency input such as `R$ 1.234,56`.
///
/// Dots are thousands separators and are stripped, the comma is the decimal
/// mark. Empty or unparseable input yields zero, the same contract the
/// simulator's form fields have always had.
pub fn parse_currency(value: &str) -> Decimal {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, 'R' | '$' | '.') && !c.is_whitespace())
        .collect();

    cleaned.replace(',', ".").parse().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1234.56), "R$ 1.234,56")]
    #[case(dec!(0), "R$ 0,00")]
    #[case(dec!(1000000), "R$ 1.000.000,00")]
    #[case(dec!(999.9), "R$ 999,90")]
    #[case(dec!(-1.5), "-R$ 1,50")]
    fn formats_currency(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_currency(value), expected);
    }

    #[test]
    fn formats_numbers_with_fixed_fraction_digits() {
        assert_eq!(format_number(dec!(1234.5), 2), "1.234,50");
        assert_eq!(format_number(dec!(1234567.891), 2), "1.234.567,89");
        assert_eq!(format_number(dec!(999), 0), "999");
    }

    #[rstest]
    #[case("R$ 1.234,56", dec!(1234.56))]
    #[case("R$ 150.000,00", dec!(150000.00))]
    #[case("150000", dec!(150000))]
    // A bare dot is a thousands separator, never a decimal mark.
    #[case("1.234", dec!(1234))]
    #[case("", dec!(0))]
    #[case("abc", dec!(0))]
    fn parses_currency_input(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_currency(raw), expected);
    }
}
