use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use caseval_core::valuation::comps::{self, ComparableInputs};
use caseval_core::valuation::dcf::{self, DcfAssumptions};

use crate::input;

/// Arguments for DCF valuation
#[derive(Args)]
pub struct DcfArgs {
    /// Path to JSON/YAML input file with DCF assumptions
    #[arg(long)]
    pub input: Option<String>,

    /// Base (year 0) free cash flow
    #[arg(long)]
    pub free_cash_flow: Option<Decimal>,

    /// Annual growth rate (e.g. 0.05 for 5%); may be negative
    #[arg(long, allow_hyphen_values = true)]
    pub growth_rate: Option<Decimal>,

    /// Terminal (perpetuity) growth rate; may be negative
    #[arg(long, allow_hyphen_values = true)]
    pub terminal_growth: Option<Decimal>,

    /// Discount rate
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Projection years
    #[arg(long, default_value = "5")]
    pub years: u32,
}

/// Arguments for comparable multiples valuation
#[derive(Args)]
pub struct CompsArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Annual revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// EBITDA
    #[arg(long)]
    pub ebitda: Option<Decimal>,

    /// Revenue multiple
    #[arg(long)]
    pub revenue_multiple: Option<Decimal>,

    /// EBITDA multiple
    #[arg(long)]
    pub ebitda_multiple: Option<Decimal>,
}

pub fn dcf_assumptions_from(args: &DcfArgs) -> Result<DcfAssumptions, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(DcfAssumptions {
        base_free_cash_flow: args
            .free_cash_flow
            .ok_or("--free-cash-flow is required (or provide --input)")?,
        growth_rate: args
            .growth_rate
            .ok_or("--growth-rate is required (or provide --input)")?,
        terminal_growth_rate: args
            .terminal_growth
            .ok_or("--terminal-growth is required (or provide --input)")?,
        discount_rate: args
            .discount_rate
            .ok_or("--discount-rate is required (or provide --input)")?,
        projection_years: args.years,
    })
}

pub fn run_dcf(args: DcfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = dcf_assumptions_from(&args)?;
    let result = dcf::valuate_dcf(&assumptions)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_comps(args: CompsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: ComparableInputs = if let Some(ref path) = args.input {
        input::file::read(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ComparableInputs {
            revenue: args.revenue.ok_or("--revenue is required (or provide --input)")?,
            ebitda: args.ebitda.ok_or("--ebitda is required (or provide --input)")?,
            revenue_multiple: args
                .revenue_multiple
                .ok_or("--revenue-multiple is required (or provide --input)")?,
            ebitda_multiple: args
                .ebitda_multiple
                .ok_or("--ebitda-multiple is required (or provide --input)")?,
        }
    };

    let result = comps::valuate_comparable(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
