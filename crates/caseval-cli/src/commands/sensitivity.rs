use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use caseval_core::sensitivity::{self, ScenarioPreset, SensitivitySpec};
use caseval_core::types::AssumptionField;
use caseval_core::valuation::dcf::DcfAssumptions;

use crate::input;

/// Arguments for a one-variable sensitivity sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Path to JSON/YAML input file with the base DCF assumptions
    #[arg(long)]
    pub input: Option<String>,

    /// Assumption to perturb (base_free_cash_flow, growth_rate,
    /// terminal_growth_rate, discount_rate)
    #[arg(long, value_parser = parse_field)]
    pub variable: AssumptionField,

    /// Half-width of the sweep as a fraction (0.02 = ±2%)
    #[arg(long, default_value = "0.02")]
    pub range: Decimal,

    /// Steps on each side of the base case
    #[arg(long, default_value = "5")]
    pub steps: u32,
}

/// Arguments for named scenario analysis
#[derive(Args)]
pub struct ScenariosArgs {
    /// Path to JSON/YAML input file with the base DCF assumptions
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON/YAML file with custom scenario presets;
    /// defaults to the standard optimistic/base/pessimistic set
    #[arg(long)]
    pub presets: Option<String>,
}

fn parse_field(s: &str) -> Result<AssumptionField, String> {
    serde_json::from_value(Value::String(s.to_string())).map_err(|_| {
        format!(
            "unknown assumption '{s}': expected base_free_cash_flow, growth_rate, \
             terminal_growth_rate or discount_rate"
        )
    })
}

fn base_assumptions(path: &Option<String>) -> Result<DcfAssumptions, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("base assumptions are required: provide --input or pipe JSON to stdin".into())
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base = base_assumptions(&args.input)?;
    let spec = SensitivitySpec {
        variable: args.variable,
        range_fraction: args.range,
        steps: args.steps,
    };
    let result = sensitivity::sweep(&base, &spec)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base = base_assumptions(&args.input)?;
    let presets: Vec<ScenarioPreset> = match args.presets {
        Some(ref path) => input::file::read(path)?,
        None => sensitivity::standard_presets(),
    };
    let result = sensitivity::run_scenarios(&base, &presets)?;
    Ok(serde_json::to_value(result)?)
}
