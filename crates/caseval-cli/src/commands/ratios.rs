use clap::Args;
use serde_json::Value;

use caseval_core::ratios::{self, RatioInputs};

use crate::input;

/// Arguments for financial ratio analysis
#[derive(Args)]
pub struct RatiosArgs {
    /// Path to JSON/YAML input file with financial statement figures
    #[arg(long)]
    pub input: Option<String>,
}

pub fn ratio_inputs_from(args: &RatiosArgs) -> Result<RatioInputs, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("ratio analysis needs statement figures: provide --input or pipe JSON to stdin".into())
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = ratio_inputs_from(&args)?;
    let result = ratios::analyze_ratios(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
