//! Form-field handling in front of the engine.
//!
//! Amounts are entered in units of 10,000 yen (man-en). Anything that does
//! not parse counts as zero, then the usual ranges are enforced.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::projection::{CompoundingMode, ProjectionInput};
use crate::types::Money;
use crate::SavingsPlanResult;

/// Base units per entry unit on the amount fields.
pub const MAN_UNIT: Decimal = dec!(10000);

/// Convert a ten-thousand-unit entry to base units. Entries too large to
/// convert saturate, and the amount clamp then caps them.
pub fn man_to_base(amount_man: Decimal) -> Money {
    amount_man
        .checked_mul(MAN_UNIT)
        .unwrap_or(if amount_man.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Raw form values, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProjectionInput {
    /// Initial amount, in 10,000-yen units.
    #[serde(default)]
    pub principal_man: String,
    /// Monthly contribution, in 10,000-yen units.
    #[serde(default)]
    pub contribution_man: String,
    #[serde(default)]
    pub annual_rate_percent: String,
    #[serde(default)]
    pub horizon_years: String,
    #[serde(default)]
    pub mode: Option<String>,
}

impl RawProjectionInput {
    /// Parse and convert units without clamping. A horizon of zero or less
    /// survives so the caller can show the cleared state.
    pub fn resolve_unclamped(&self) -> SavingsPlanResult<ProjectionInput> {
        let mode = match self.mode.as_deref().map(str::trim) {
            None | Some("") => CompoundingMode::default(),
            Some(name) => CompoundingMode::from_str(name)?,
        };

        Ok(ProjectionInput {
            principal: man_to_base(parse_decimal_or_zero(&self.principal_man)),
            periodic_contribution: man_to_base(parse_decimal_or_zero(&self.contribution_man)),
            annual_rate_percent: parse_decimal_or_zero(&self.annual_rate_percent),
            horizon_years: parse_leading_int_or_zero(&self.horizon_years),
            mode,
        })
    }

    /// Parse, convert and clamp to the allowed ranges.
    pub fn resolve(&self) -> SavingsPlanResult<ProjectionInput> {
        Ok(self.resolve_unclamped()?.clamped())
    }
}

/// Decimal value of a text field, or zero if it is empty or malformed.
pub fn parse_decimal_or_zero(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Leading integer of a text field (`"12.7"` → 12, `"3 years"` → 3), or zero.
pub fn parse_leading_int_or_zero(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let mut end = 0;
    for (i, ch) in trimmed.char_indices() {
        let is_sign = i == 0 && (ch == '-' || ch == '+');
        if ch.is_ascii_digit() || is_sign {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    // Out-of-range values saturate; the clamp pulls them back into [1, 50]
    match trimmed[..end].parse::<i64>() {
        Ok(v) => v.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::MAX_AMOUNT;
    use pretty_assertions::assert_eq;

    fn raw(principal: &str, contribution: &str, rate: &str, years: &str) -> RawProjectionInput {
        RawProjectionInput {
            principal_man: principal.into(),
            contribution_man: contribution.into(),
            annual_rate_percent: rate.into(),
            horizon_years: years.into(),
            mode: None,
        }
    }

    #[test]
    fn test_man_units_converted() {
        let input = raw("100", "5", "3.5", "20").resolve().unwrap();
        assert_eq!(input.principal, dec!(1_000_000));
        assert_eq!(input.periodic_contribution, dec!(50_000));
        assert_eq!(input.annual_rate_percent, dec!(3.5));
        assert_eq!(input.horizon_years, 20);
        assert_eq!(input.mode, CompoundingMode::Monthly);
    }

    #[test]
    fn test_unparsable_counts_as_zero() {
        let input = raw("", "abc", "n/a", "").resolve_unclamped().unwrap();
        assert_eq!(input.principal, Decimal::ZERO);
        assert_eq!(input.periodic_contribution, Decimal::ZERO);
        assert_eq!(input.annual_rate_percent, Decimal::ZERO);
        assert_eq!(input.horizon_years, 0);
        assert!(input.is_clear());
    }

    #[test]
    fn test_ranges_clamped() {
        let input = raw("-10", "-1", "25", "75").resolve().unwrap();
        assert_eq!(input.principal, Decimal::ZERO);
        assert_eq!(input.periodic_contribution, Decimal::ZERO);
        assert_eq!(input.annual_rate_percent, dec!(20));
        assert_eq!(input.horizon_years, 50);

        let input = raw("1", "1", "-3", "0").resolve().unwrap();
        assert_eq!(input.annual_rate_percent, Decimal::ZERO);
        assert_eq!(input.horizon_years, 1);
    }

    #[test]
    fn test_oversized_entry_saturates_then_caps() {
        let digits = "99999999999999999999999999";
        assert_eq!(man_to_base(parse_decimal_or_zero(digits)), Decimal::MAX);
        assert_eq!(man_to_base(-parse_decimal_or_zero(digits)), Decimal::MIN);

        let input = raw(digits, digits, "5", "10").resolve().unwrap();
        assert_eq!(input.principal, MAX_AMOUNT);
        assert_eq!(input.periodic_contribution, MAX_AMOUNT);

        // Beyond Decimal's 28 digits the text does not parse at all
        assert_eq!(parse_decimal_or_zero(&"9".repeat(40)), Decimal::ZERO);
    }

    #[test]
    fn test_horizon_leading_integer() {
        assert_eq!(parse_leading_int_or_zero("12.7"), 12);
        assert_eq!(parse_leading_int_or_zero(" 3 years"), 3);
        assert_eq!(parse_leading_int_or_zero("-4"), -4);
        assert_eq!(parse_leading_int_or_zero("years"), 0);
        assert_eq!(parse_leading_int_or_zero("-"), 0);
        assert_eq!(parse_leading_int_or_zero("99999999999"), i32::MAX);
    }

    #[test]
    fn test_decimal_fields_accept_exponents() {
        assert_eq!(parse_decimal_or_zero("1e2"), dec!(100));
        assert_eq!(parse_decimal_or_zero(" 0.5 "), dec!(0.5));
    }

    #[test]
    fn test_mode_field() {
        let mut form = raw("1", "1", "1", "1");
        form.mode = Some("annual".into());
        assert_eq!(form.resolve().unwrap().mode, CompoundingMode::Annual);

        form.mode = Some("fortnightly".into());
        assert!(form.resolve().is_err());
    }
}
