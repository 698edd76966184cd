use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::{project, CompoundingMode, ProjectionInput, ProjectionResult};
use crate::types::{with_metadata, ComputationOutput, Money};

/// The same plan projected under both compounding modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeComparison {
    pub monthly: ProjectionResult,
    pub annual: ProjectionResult,
    /// Monthly minus annual.
    pub final_balance_difference: Money,
    /// Monthly minus annual.
    pub profit_difference: Money,
    pub by_year: Vec<YearComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearComparison {
    pub year: u32,
    pub monthly_balance: Money,
    pub annual_balance: Money,
    pub difference: Money,
}

/// Project `input` once per mode; its own `mode` field is ignored.
pub fn compare_modes(input: &ProjectionInput) -> ComputationOutput<ModeComparison> {
    let start = Instant::now();
    let (sanitised, warnings) = input.sanitised();

    let run = |mode: CompoundingMode| {
        project(&ProjectionInput {
            mode,
            ..sanitised.clone()
        })
    };
    let monthly = run(CompoundingMode::Monthly);
    let annual = run(CompoundingMode::Annual);

    let by_year = monthly
        .years
        .iter()
        .zip(&annual.years)
        .map(|(m, a)| YearComparison {
            year: m.year,
            monthly_balance: m.balance,
            annual_balance: a.balance,
            difference: m.balance - a.balance,
        })
        .collect();

    let comparison = ModeComparison {
        final_balance_difference: monthly.final_balance - annual.final_balance,
        profit_difference: monthly.total_profit - annual.total_profit,
        monthly,
        annual,
        by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Monthly vs annual compounding of the same contribution schedule",
        &sanitised,
        warnings,
        elapsed,
        comparison,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_beats_annual_on_lump_sum() {
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: Decimal::ZERO,
            annual_rate_percent: dec!(5),
            horizon_years: 20,
            mode: CompoundingMode::Annual,
        };
        let cmp = compare_modes(&input).result;
        assert_eq!(cmp.by_year.len(), 20);
        assert!(cmp.final_balance_difference > Decimal::ZERO);
        assert_eq!(cmp.by_year[19].difference, cmp.final_balance_difference);
    }

    #[test]
    fn test_annual_lump_deposit_can_win() {
        // Annual mode banks the whole year's contributions up front
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: dec!(30_000),
            annual_rate_percent: dec!(5),
            horizon_years: 20,
            mode: CompoundingMode::Monthly,
        };
        let output = compare_modes(&input);
        assert!(output.warnings.is_empty());
        let cmp = output.result;
        assert!(cmp.final_balance_difference < Decimal::ZERO);
        // Same deposits either way, so the balance gap is all profit
        assert_eq!(cmp.monthly.total_contribution, cmp.annual.total_contribution);
        assert_eq!(cmp.final_balance_difference, cmp.profit_difference);
    }

    #[test]
    fn test_zero_rate_modes_agree() {
        let input = ProjectionInput {
            principal: dec!(200_000),
            periodic_contribution: dec!(10_000),
            annual_rate_percent: Decimal::ZERO,
            horizon_years: 5,
            mode: CompoundingMode::Monthly,
        };
        let cmp = compare_modes(&input).result;
        assert_eq!(cmp.final_balance_difference, Decimal::ZERO);
        assert!(cmp.by_year.iter().all(|y| y.difference.is_zero()));
    }
}
