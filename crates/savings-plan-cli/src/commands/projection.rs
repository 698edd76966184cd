use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use savings_plan_core::display;
use savings_plan_core::input::man_to_base;
use savings_plan_core::projection::{self, CompoundingMode, ProjectionInput};

use crate::input;

/// Plan parameters shared by every projection command
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON input file (a ProjectionInput)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial lump sum
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub principal: Decimal,

    /// Amount contributed every month
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub contribution: Decimal,

    /// Annual interest rate in percent (e.g. 5 for 5%), clamped to 0-20
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Horizon in years, at most 50; 0 or less prints the cleared result
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<i32>,

    /// Compounding mode: monthly, annual
    #[arg(long, default_value = "monthly")]
    pub mode: CompoundingMode,

    /// Read --principal and --contribution in units of 10,000 yen
    #[arg(long)]
    pub man: bool,
}

/// Arguments for the year-by-year projection
#[derive(Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for the first-year walkthrough
#[derive(Args)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for the monthly vs annual comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Build the engine input from flags, a JSON file or piped JSON, in that order.
fn resolve_input(args: &PlanArgs) -> Result<ProjectionInput, Box<dyn std::error::Error>> {
    if let Some(years) = args.years {
        let scale = |amount: Decimal| if args.man { man_to_base(amount) } else { amount };
        return Ok(ProjectionInput {
            principal: scale(args.principal),
            periodic_contribution: scale(args.contribution),
            annual_rate_percent: args.rate,
            horizon_years: years,
            mode: args.mode,
        });
    }

    let parsed: ProjectionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--years, --input <file.json> or stdin required for a projection".into());
    };
    debug!("loaded projection input: {:?}", parsed);
    Ok(parsed)
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_input(&args.plan)?;
    let result = display::present(&plan);
    Ok(serde_json::to_value(result)?)
}

pub fn run_explain(args: ExplainArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_input(&args.plan)?;
    let result = display::explain(&plan);
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_input(&args.plan)?;
    let result = projection::compare_modes(&plan);
    Ok(serde_json::to_value(result)?)
}
