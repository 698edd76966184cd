use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::engine::{CompoundingMode, ProjectionInput, MONTHS_PER_YEAR};
use crate::types::{Money, Rate};

/// One month of the monthly-compounding walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStep {
    pub month: u32,
    /// Figure shown on the left of the month's formula.
    pub base_amount: Money,
    /// Balance after the deposit and the month's interest.
    pub amount: Money,
}

/// Explanatory breakdown of the first year, for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FirstYearTrace {
    Monthly {
        principal: Money,
        periodic_contribution: Money,
        annual_rate_percent: Decimal,
        steps: Vec<MonthStep>,
    },
    Annual {
        principal: Money,
        periodic_contribution: Money,
        annual_contribution: Money,
        annual_rate_percent: Decimal,
        after_deposit: Money,
        /// Rounded down to whole yen.
        after_interest: Money,
    },
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound(rate: Rate, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Walk through the first year's arithmetic.
///
/// Derived independently of `project`. In monthly mode the base amount for
/// month m > 1 is `(previous base + contribution) * (1 + r/12)^(m-1)`, which
/// is not the running balance; the `amount` column carries the real one.
pub fn explain_first_year(input: &ProjectionInput) -> FirstYearTrace {
    let (input, _) = input.sanitised();

    match input.mode {
        CompoundingMode::Monthly => {
            let monthly_rate =
                input.annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
            let mut base = Decimal::ZERO;
            let mut amount = input.principal;
            let mut steps = Vec::with_capacity(MONTHS_PER_YEAR as usize);

            for month in 1..=MONTHS_PER_YEAR {
                base = if month == 1 {
                    input.principal
                } else {
                    (base + input.periodic_contribution) * compound(monthly_rate, month - 1)
                };
                amount += input.periodic_contribution;
                amount *= Decimal::ONE + monthly_rate;
                steps.push(MonthStep {
                    month,
                    base_amount: base,
                    amount,
                });
            }

            FirstYearTrace::Monthly {
                principal: input.principal,
                periodic_contribution: input.periodic_contribution,
                annual_rate_percent: input.annual_rate_percent,
                steps,
            }
        }
        CompoundingMode::Annual => {
            let annual_contribution = input.periodic_contribution * Decimal::from(MONTHS_PER_YEAR);
            let after_deposit = input.principal + annual_contribution;
            let after_interest =
                (after_deposit * (Decimal::ONE + input.annual_rate_percent / dec!(100))).floor();

            FirstYearTrace::Annual {
                principal: input.principal,
                periodic_contribution: input.periodic_contribution,
                annual_contribution,
                annual_rate_percent: input.annual_rate_percent,
                after_deposit,
                after_interest,
            }
        }
    }
}
