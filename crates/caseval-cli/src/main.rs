mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::ratios::RatiosArgs;
use commands::report::ReportArgs;
use commands::sensitivity::{ScenariosArgs, SweepArgs};
use commands::valuation::{CompsArgs, DcfArgs};

/// Financial valuation and sensitivity analysis for business cases
#[derive(Parser)]
#[command(
    name = "caseval",
    version,
    about = "Financial valuation and sensitivity analysis for business cases",
    long_about = "Run discounted cash flow valuations, comparable multiples \
                  valuations, categorized ratio analysis, sensitivity sweeps and \
                  scenario analysis with decimal precision, plus narrative report \
                  generation for any result."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a discounted cash flow valuation
    Dcf(DcfArgs),
    /// Apply revenue/EBITDA multiples for a comparables valuation
    Comps(CompsArgs),
    /// Compute and classify financial ratios
    Ratios(RatiosArgs),
    /// Sweep one DCF assumption across a symmetric range
    Sweep(SweepArgs),
    /// Valuate under named scenario presets
    Scenarios(ScenariosArgs),
    /// Render a narrative report for an analysis
    Report(ReportArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Dcf(args) => commands::valuation::run_dcf(args),
        Commands::Comps(args) => commands::valuation::run_comps(args),
        Commands::Ratios(args) => commands::ratios::run_ratios(args),
        Commands::Sweep(args) => commands::sensitivity::run_sweep(args),
        Commands::Scenarios(args) => commands::sensitivity::run_scenarios(args),
        Commands::Report(args) => {
            // Narrative text goes straight to stdout, bypassing the
            // structured formatters
            match commands::report::run_report(args) {
                Ok(text) => {
                    println!("{text}");
                    return;
                }
                Err(e) => {
                    eprintln!("{}: {}", "error".red().bold(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("caseval {}", env!("CARGO_PKG_VERSION"));
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
