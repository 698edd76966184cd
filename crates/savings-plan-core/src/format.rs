use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Fraction digits kept when rendering intermediate figures in the first-year trace.
const TRACE_FRACTION_DIGITS: u32 = 3;

/// Render an amount for the summary panel and the per-year rows.
///
/// Fractional yen are dropped by truncating the magnitude, the sign is taken
/// from the value before truncation, and the integer part is grouped with
/// `,` every three digits. Zero renders as `"0"`.
pub fn format_amount(value: Money) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let whole = value.abs().trunc().normalize();
    format!("{sign}{}", group_thousands(&whole.to_string()))
}

/// Render a figure the way the trace text shows it: grouped integer part and
/// at most three fraction digits, trailing zeros dropped.
pub fn format_trace_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(TRACE_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let digits = rounded.abs().to_string();
    match digits.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{sign}{}.{frac_part}", group_thousands(int_part))
        }
        None => format!("{sign}{}", group_thousands(&digits)),
    }
}

/// Render a percentage as entered, e.g. `12` or `3.5`.
pub fn format_percent(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Insert `,` between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_is_plain() {
        assert_eq!(format_amount(Decimal::ZERO), "0");
        assert_eq!(format_amount(dec!(0.000)), "0");
    }

    #[test]
    fn test_fractional_yen_dropped() {
        assert_eq!(format_amount(dec!(1767291.4322984)), "1,767,291");
        assert_eq!(format_amount(dec!(999.999)), "999");
    }

    #[test]
    fn test_negative_keeps_sign_after_truncation() {
        assert_eq!(format_amount(dec!(-1234.9)), "-1,234");
        assert_eq!(format_amount(dec!(-1000000)), "-1,000,000");
        // Sign comes from the value before truncation
        assert_eq!(format_amount(dec!(-0.4)), "-0");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(format_amount(dec!(1)), "1");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(100000)), "100,000");
        assert_eq!(format_amount(dec!(1234567890)), "1,234,567,890");
    }

    #[test]
    fn test_trace_number_three_fraction_digits() {
        assert_eq!(format_trace_number(dec!(1060500)), "1,060,500");
        assert_eq!(format_trace_number(dec!(1121605.0000)), "1,121,605");
        assert_eq!(format_trace_number(dec!(1234.56789)), "1,234.568");
        assert_eq!(format_trace_number(dec!(0.1)), "0.1");
        assert_eq!(format_trace_number(dec!(-2500.25)), "-2,500.25");
        assert_eq!(format_trace_number(dec!(0.0001)), "0");
    }

    #[test]
    fn test_percent_as_entered() {
        assert_eq!(format_percent(dec!(12)), "12");
        assert_eq!(format_percent(dec!(3.50)), "3.5");
    }
}
