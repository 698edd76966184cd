//! Savings projection engine and its first-year walkthrough

mod engine;
mod trace;

#[cfg(feature = "compare")]
mod compare;

pub use engine::{
    project, project_with_metadata, CompoundingMode, ProjectionInput, ProjectionResult,
    YearRecord, MAX_AMOUNT, MAX_ANNUAL_RATE_PERCENT, MAX_HORIZON_YEARS, MIN_HORIZON_YEARS,
    MONTHS_PER_YEAR,
};
pub use trace::{explain_first_year, FirstYearTrace, MonthStep};

#[cfg(feature = "compare")]
pub use compare::{compare_modes, ModeComparison, YearComparison};
