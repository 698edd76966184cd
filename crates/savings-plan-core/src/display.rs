use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::format::{format_amount, format_percent, format_trace_number};
use crate::input::RawProjectionInput;
use crate::projection::{
    explain_first_year, project, FirstYearTrace, ProjectionInput, ProjectionResult,
};
use crate::types::{with_metadata, ComputationOutput};
use crate::SavingsPlanResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline figures, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPanel {
    pub final_balance: String,
    pub total_contribution: String,
    pub total_profit: String,
}

/// One formatted row per projected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub year: String,
    pub cumulative_contribution: String,
    pub cumulative_periodic_only: String,
    pub cumulative_profit: String,
    pub balance: String,
}

/// Everything a front end shows for one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub summary: SummaryPanel,
    pub rows: Vec<ReportRow>,
    pub trace: Vec<String>,
}

/// Raw projection, trace and their formatted rendering together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionView {
    pub projection: ProjectionResult,
    pub trace: Option<FirstYearTrace>,
    pub report: ProjectionReport,
}

/// First-year walkthrough on its own, as structured steps and rendered lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceView {
    pub trace: Option<FirstYearTrace>,
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Report construction
// ---------------------------------------------------------------------------

impl ProjectionReport {
    /// Zeroed summary and no rows or trace, shown when the horizon is zero or less.
    pub fn cleared() -> Self {
        Self {
            summary: SummaryPanel {
                final_balance: "0".into(),
                total_contribution: "0".into(),
                total_profit: "0".into(),
            },
            rows: Vec::new(),
            trace: Vec::new(),
        }
    }

    pub fn build(result: &ProjectionResult, trace: &FirstYearTrace) -> Self {
        let summary = SummaryPanel {
            final_balance: format_amount(result.final_balance),
            total_contribution: format_amount(result.total_contribution),
            total_profit: format_amount(result.total_profit),
        };

        let rows = result
            .years
            .iter()
            .map(|r| ReportRow {
                year: format!("Year {}", r.year),
                cumulative_contribution: format_amount(r.cumulative_contribution),
                cumulative_periodic_only: format_amount(r.cumulative_periodic_only),
                cumulative_profit: format_amount(r.cumulative_profit),
                balance: format_amount(r.balance),
            })
            .collect();

        Self {
            summary,
            rows,
            trace: render_trace(trace),
        }
    }
}

/// Text lines explaining the first year, worded for the active mode.
pub fn render_trace(trace: &FirstYearTrace) -> Vec<String> {
    match trace {
        FirstYearTrace::Monthly {
            principal,
            periodic_contribution,
            annual_rate_percent,
            steps,
        } => {
            let rate = format_percent(*annual_rate_percent);
            let contribution = format_trace_number(*periodic_contribution);
            let mut lines = vec![
                "Monthly compounding (year 1)".to_string(),
                format!("Initial investment: {}", format_trace_number(*principal)),
                format!("Contribution: {contribution} / month"),
                format!("Monthly rate: annual {rate}% / 12"),
                "Calculation:".to_string(),
            ];
            lines.extend(steps.iter().map(|s| {
                format!(
                    "Month {}: ({} + {contribution}) × (1 + {rate} / 100 / 12) = {}",
                    s.month,
                    format_trace_number(s.base_amount),
                    format_trace_number(s.amount),
                )
            }));
            lines
        }
        FirstYearTrace::Annual {
            principal,
            periodic_contribution,
            annual_contribution,
            annual_rate_percent,
            after_deposit,
            after_interest,
        } => {
            let rate = format_percent(*annual_rate_percent);
            let principal = format_trace_number(*principal);
            let yearly = format_trace_number(*annual_contribution);
            let deposited = format_trace_number(*after_deposit);
            let credited = format_trace_number(*after_interest);
            vec![
                "Annual compounding (year 1)".to_string(),
                format!("Initial investment: {principal}"),
                format!(
                    "Contribution: {} / month × 12 months = {yearly}",
                    format_trace_number(*periodic_contribution)
                ),
                format!("Annual rate: {rate}%"),
                "Calculation:".to_string(),
                format!("1. After deposit: {principal} + {yearly} = {deposited}"),
                format!("2. Interest applied: {deposited} × (1 + {rate}%) = {credited}"),
                format!("3. Final balance: {credited}"),
            ]
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Project, explain and format in one go.
pub fn present(input: &ProjectionInput) -> ComputationOutput<ProjectionView> {
    let start = Instant::now();
    let (sanitised, warnings) = input.sanitised();
    let projection = project(&sanitised);

    let (trace, report) = if sanitised.is_clear() {
        (None, ProjectionReport::cleared())
    } else {
        let trace = explain_first_year(&sanitised);
        let report = ProjectionReport::build(&projection, &trace);
        (Some(trace), report)
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Year-by-year savings projection with first-year walkthrough",
        &sanitised,
        warnings,
        elapsed,
        ProjectionView {
            projection,
            trace,
            report,
        },
    )
}

/// Full path from raw form text to a rendered report.
pub fn present_raw(
    raw: &RawProjectionInput,
) -> SavingsPlanResult<ComputationOutput<ProjectionView>> {
    let input = raw.resolve_unclamped()?;
    Ok(present(&input))
}

/// First-year walkthrough in the output envelope. Empty once the projection
/// is cleared.
pub fn explain(input: &ProjectionInput) -> ComputationOutput<TraceView> {
    let start = Instant::now();
    let (sanitised, warnings) = input.sanitised();

    let view = if sanitised.is_clear() {
        TraceView {
            trace: None,
            lines: Vec::new(),
        }
    } else {
        let trace = explain_first_year(&sanitised);
        TraceView {
            lines: render_trace(&trace),
            trace: Some(trace),
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "First-year walkthrough of the selected compounding mode",
        &sanitised,
        warnings,
        elapsed,
        view,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CompoundingMode;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_explain_reports_rate_clamp() {
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: Decimal::ZERO,
            annual_rate_percent: dec!(35),
            horizon_years: 1,
            mode: CompoundingMode::Annual,
        };
        let output = explain(&input);
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.assumptions["annual_rate_percent"], "20");
        assert_eq!(output.result.lines.last().unwrap(), "3. Final balance: 1,200,000");
    }

    #[test]
    fn test_explain_cleared() {
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: dec!(10_000),
            annual_rate_percent: dec!(5),
            horizon_years: -2,
            mode: CompoundingMode::Monthly,
        };
        let output = explain(&input);
        assert!(output.warnings.is_empty());
        assert!(output.result.trace.is_none());
        assert!(output.result.lines.is_empty());
    }

    #[test]
    fn test_cleared_report() {
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: dec!(10_000),
            annual_rate_percent: dec!(5),
            horizon_years: 0,
            mode: CompoundingMode::Monthly,
        };
        let view = present(&input).result;
        assert_eq!(view.report, ProjectionReport::cleared());
        assert!(view.trace.is_none());
        assert!(view.projection.years.is_empty());
    }

    #[test]
    fn test_annual_report_figures() {
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: Decimal::ZERO,
            annual_rate_percent: dec!(5),
            horizon_years: 2,
            mode: CompoundingMode::Annual,
        };
        let report = present(&input).result.report;
        assert_eq!(
            report.summary,
            SummaryPanel {
                final_balance: "1,102,500".into(),
                total_contribution: "1,000,000".into(),
                total_profit: "102,500".into(),
            }
        );
        assert_eq!(
            report.rows[0],
            ReportRow {
                year: "Year 1".into(),
                cumulative_contribution: "1,000,000".into(),
                cumulative_periodic_only: "0".into(),
                cumulative_profit: "50,000".into(),
                balance: "1,050,000".into(),
            }
        );
        assert_eq!(report.trace[5], "1. After deposit: 1,000,000 + 0 = 1,000,000");
        assert_eq!(report.trace[6], "2. Interest applied: 1,000,000 × (1 + 5%) = 1,050,000");
    }

    #[test]
    fn test_monthly_trace_lines() {
        let input = ProjectionInput {
            principal: dec!(1_000_000),
            periodic_contribution: dec!(50_000),
            annual_rate_percent: dec!(12),
            horizon_years: 1,
            mode: CompoundingMode::Monthly,
        };
        let report = present(&input).result.report;
        assert_eq!(report.trace.len(), 5 + 12);
        assert_eq!(report.trace[3], "Monthly rate: annual 12% / 12");
        assert_eq!(
            report.trace[5],
            "Month 1: (1,000,000 + 50,000) × (1 + 12 / 100 / 12) = 1,060,500"
        );
        assert_eq!(
            report.trace[6],
            "Month 2: (1,060,500 + 50,000) × (1 + 12 / 100 / 12) = 1,121,605"
        );
        assert_eq!(report.summary.final_balance, "1,767,291");
    }

    #[test]
    fn test_present_raw_keeps_clear_case() {
        let raw = RawProjectionInput {
            principal_man: "100".into(),
            contribution_man: "5".into(),
            annual_rate_percent: "3".into(),
            horizon_years: "".into(),
            mode: None,
        };
        let view = present_raw(&raw).unwrap().result;
        assert_eq!(view.report.summary.final_balance, "0");
        assert_eq!(view.projection.final_balance, dec!(1_000_000));
    }
}
