use log::{debug, trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::SavingsPlanError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};

/// Highest annual rate, in percent, the engine will compound at.
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(20);

/// Largest principal or monthly contribution the engine accepts. Fifty years
/// at the top rate stays well inside `Decimal`'s range from here.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// Longest horizon, in years.
pub const MAX_HORIZON_YEARS: i32 = 50;

/// Shortest horizon a running projection may have. Anything below is the clear case.
pub const MIN_HORIZON_YEARS: i32 = 1;

/// Contributions are made once a month in every mode.
pub const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How interest is credited against the monthly contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingMode {
    /// Each month: deposit the contribution, then compound at rate/12.
    #[default]
    Monthly,
    /// Each year: deposit twelve contributions at once, then compound at the full rate.
    Annual,
}

impl CompoundingMode {
    pub const ALL: [CompoundingMode; 2] = [CompoundingMode::Monthly, CompoundingMode::Annual];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundingMode::Monthly => "monthly",
            CompoundingMode::Annual => "annual",
        }
    }

    /// Per-period schedule for this mode.
    fn policy(
        self,
        periodic_contribution: Money,
        annual_rate_percent: Decimal,
    ) -> CompoundingPolicy {
        match self {
            CompoundingMode::Monthly => CompoundingPolicy {
                periods_per_year: MONTHS_PER_YEAR,
                rate_per_period: annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR),
                deposit_per_period: periodic_contribution,
            },
            CompoundingMode::Annual => CompoundingPolicy {
                periods_per_year: 1,
                rate_per_period: annual_rate_percent / dec!(100),
                deposit_per_period: periodic_contribution * Decimal::from(MONTHS_PER_YEAR),
            },
        }
    }
}

impl fmt::Display for CompoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompoundingMode {
    type Err = SavingsPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(CompoundingMode::Monthly),
            "annual" | "annually" | "yearly" | "a" => Ok(CompoundingMode::Annual),
            other => Err(SavingsPlanError::InvalidInput {
                field: "mode".into(),
                reason: format!("Unknown compounding mode '{other}'. Use: monthly, annual"),
            }),
        }
    }
}

/// Input parameters for a savings projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Lump sum present before the first contribution.
    pub principal: Money,
    /// Amount deposited every month, whatever the mode.
    pub periodic_contribution: Money,
    /// Annual interest rate in percent (5 = 5%).
    pub annual_rate_percent: Decimal,
    /// Number of years to project. Zero or less clears the projection.
    pub horizon_years: i32,
    #[serde(default)]
    pub mode: CompoundingMode,
}

/// One row of the year-by-year projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,
    /// Principal plus every contribution made so far.
    pub cumulative_contribution: Money,
    /// Contributions alone, without the principal.
    pub cumulative_periodic_only: Money,
    pub cumulative_profit: Money,
    pub balance: Money,
    /// Growth during this year that did not come from deposits.
    pub interest_earned: Money,
}

/// Output of `project`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub mode: CompoundingMode,
    pub years: Vec<YearRecord>,
    pub final_balance: Money,
    pub total_contribution: Money,
    pub total_profit: Money,
}

/// Per-period parameters shared by both modes.
#[derive(Debug, Clone, Copy)]
struct CompoundingPolicy {
    periods_per_year: u32,
    rate_per_period: Rate,
    deposit_per_period: Money,
}

// ---------------------------------------------------------------------------
// Input sanitisation
// ---------------------------------------------------------------------------

impl ProjectionInput {
    /// Clamp to the ranges the input form allows: amounts in [0, MAX_AMOUNT],
    /// rate in [0, 20] and horizon in [1, 50].
    pub fn clamped(&self) -> Self {
        let mut out = self.sanitised().0;
        out.horizon_years = out.horizon_years.max(MIN_HORIZON_YEARS);
        out
    }

    /// Horizon of zero or less: nothing to project.
    pub fn is_clear(&self) -> bool {
        self.horizon_years < MIN_HORIZON_YEARS
    }

    /// Engine-side clamp. Leaves a non-positive horizon alone so the clear
    /// case still produces an empty result. Returns a warning per adjusted field.
    pub(crate) fn sanitised(&self) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut out = self.clone();

        clamp_amount("principal", &mut out.principal, &mut warnings);
        clamp_amount("periodic_contribution", &mut out.periodic_contribution, &mut warnings);
        if out.annual_rate_percent < Decimal::ZERO {
            warnings.push(format!(
                "annual_rate_percent {} below zero, using 0",
                out.annual_rate_percent
            ));
            out.annual_rate_percent = Decimal::ZERO;
        } else if out.annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
            warnings.push(format!(
                "annual_rate_percent {} above {max}, using {max}",
                out.annual_rate_percent,
                max = MAX_ANNUAL_RATE_PERCENT
            ));
            out.annual_rate_percent = MAX_ANNUAL_RATE_PERCENT;
        }
        if out.horizon_years > MAX_HORIZON_YEARS {
            warnings.push(format!(
                "horizon_years {} above {MAX_HORIZON_YEARS}, using {MAX_HORIZON_YEARS}",
                out.horizon_years
            ));
            out.horizon_years = MAX_HORIZON_YEARS;
        }

        for w in &warnings {
            warn!("{w}");
        }
        (out, warnings)
    }
}

fn clamp_amount(field: &str, amount: &mut Money, warnings: &mut Vec<String>) {
    if *amount < Decimal::ZERO {
        warnings.push(format!("{field} {amount} below zero, using 0"));
        *amount = Decimal::ZERO;
    } else if *amount > MAX_AMOUNT {
        warnings.push(format!("{field} {amount} above {MAX_AMOUNT}, using {MAX_AMOUNT}"));
        *amount = MAX_AMOUNT;
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project the account year by year.
///
/// Out-of-range fields are clamped first (see [`ProjectionInput::clamped`]),
/// except that a horizon of zero or less yields an empty projection whose
/// final balance and total contribution equal the principal.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    let (input, _) = input.sanitised();
    run(&input)
}

/// `project` wrapped in the standard output envelope, with one warning per
/// clamped field.
pub fn project_with_metadata(input: &ProjectionInput) -> ComputationOutput<ProjectionResult> {
    let start = Instant::now();
    let (sanitised, warnings) = input.sanitised();
    let result = run(&sanitised);

    let methodology = match sanitised.mode {
        CompoundingMode::Monthly => {
            "Monthly compounding: deposit then compound at annual rate / 12"
        }
        CompoundingMode::Annual => {
            "Annual compounding: deposit 12 contributions then compound at annual rate"
        }
    };
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(methodology, &sanitised, warnings, elapsed, result)
}

fn run(input: &ProjectionInput) -> ProjectionResult {
    if input.is_clear() {
        debug!("horizon {} years, returning cleared projection", input.horizon_years);
        return ProjectionResult {
            mode: input.mode,
            years: Vec::new(),
            final_balance: input.principal,
            total_contribution: input.principal,
            total_profit: Decimal::ZERO,
        };
    }

    let policy = input
        .mode
        .policy(input.periodic_contribution, input.annual_rate_percent);
    let growth = Decimal::ONE + policy.rate_per_period;
    let annual_contribution = input.periodic_contribution * Decimal::from(MONTHS_PER_YEAR);

    let horizon = input.horizon_years as u32;
    let mut years: Vec<YearRecord> = Vec::with_capacity(horizon as usize);
    let mut balance = input.principal;
    let mut cumulative_contribution = input.principal;

    for year in 1..=horizon {
        let year_start = balance;

        // Deposit first so the new money earns interest in the same period
        for _ in 0..policy.periods_per_year {
            balance += policy.deposit_per_period;
            balance *= growth;
            cumulative_contribution += policy.deposit_per_period;
        }

        let record = YearRecord {
            year,
            cumulative_contribution,
            cumulative_periodic_only: annual_contribution * Decimal::from(year),
            cumulative_profit: balance - cumulative_contribution,
            balance,
            interest_earned: balance - year_start - annual_contribution,
        };
        trace!("{} year {}: balance {}", input.mode, year, balance);
        years.push(record);
    }

    let (total_contribution, total_profit) = years
        .last()
        .map(|r| (r.cumulative_contribution, r.cumulative_profit))
        .unwrap_or((input.principal, Decimal::ZERO));

    debug!(
        "{} projection over {} years: final balance {}",
        input.mode, horizon, balance
    );

    ProjectionResult {
        mode: input.mode,
        years,
        final_balance: balance,
        total_contribution,
        total_profit,
    }
}
