mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::projection::{CompareArgs, ExplainArgs, ProjectArgs};

/// Compound-interest savings plan projections
#[derive(Parser)]
#[command(
    name = "savings-plan",
    version,
    about = "Compound-interest savings plan projections",
    long_about = "Projects a savings plan (initial lump sum plus a fixed monthly \
                  contribution) year by year with decimal precision, under monthly \
                  or annual compounding, and explains the first year's arithmetic."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project balances year by year
    Project(ProjectArgs),
    /// Walk through the first year's arithmetic
    Explain(ExplainArgs),
    /// Project the same plan under monthly and annual compounding
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Explain(args) => commands::projection::run_explain(args),
        Commands::Compare(args) => commands::projection::run_compare(args),
        Commands::Version => {
            println!("savings-plan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
