use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;

use caseval_core::ratios::{self, RatioInputs};
use caseval_core::report::{render_report, render_valuation_summary, AnalysisReport};
use caseval_core::sensitivity::{self, ScenarioPreset, SensitivitySpec};
use caseval_core::types::AssumptionField;
use caseval_core::valuation::comps::{self, ComparableInputs};
use caseval_core::valuation::dcf::{self, DcfAssumptions};

use crate::input;

/// Arguments for narrative report generation
#[derive(Args)]
pub struct ReportArgs {
    /// Analysis to run and narrate
    #[arg(long)]
    pub kind: ReportKind,

    /// Path to JSON/YAML input file for the chosen analysis
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ReportKind {
    Dcf,
    Comparable,
    Ratios,
    Sensitivity,
    Scenarios,
    /// Combined DCF + comparables summary with a valuation range
    Summary,
}

/// Input shape for `report --kind sensitivity`.
#[derive(Deserialize)]
struct SweepRequest {
    assumptions: DcfAssumptions,
    variable: AssumptionField,
    #[serde(default = "default_range")]
    range_fraction: Decimal,
    #[serde(default = "default_steps")]
    steps: u32,
}

fn default_range() -> Decimal {
    Decimal::new(2, 2)
}

fn default_steps() -> u32 {
    5
}

/// Input shape for `report --kind scenarios`.
#[derive(Deserialize)]
struct ScenarioRequest {
    assumptions: DcfAssumptions,
    #[serde(default)]
    presets: Option<Vec<ScenarioPreset>>,
}

/// Input shape for `report --kind summary`.
#[derive(Deserialize)]
struct SummaryRequest {
    dcf: DcfAssumptions,
    comparable: ComparableInputs,
}

fn read_input<T: serde::de::DeserializeOwned>(
    path: &Option<String>,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value::<T>(data)?);
    }
    Err("report input is required: provide --input or pipe JSON to stdin".into())
}

pub fn run_report(args: ReportArgs) -> Result<String, Box<dyn std::error::Error>> {
    let text = match args.kind {
        ReportKind::Dcf => {
            let assumptions: DcfAssumptions = read_input(&args.input)?;
            let out = dcf::valuate_dcf(&assumptions)?;
            render_report(&AnalysisReport::Dcf(&out.result))
        }
        ReportKind::Comparable => {
            let inputs: ComparableInputs = read_input(&args.input)?;
            let out = comps::valuate_comparable(&inputs)?;
            render_report(&AnalysisReport::Comparable(&out.result))
        }
        ReportKind::Ratios => {
            let inputs: RatioInputs = read_input(&args.input)?;
            let out = ratios::analyze_ratios(&inputs)?;
            render_report(&AnalysisReport::Ratios(&out.result))
        }
        ReportKind::Sensitivity => {
            let req: SweepRequest = read_input(&args.input)?;
            let spec = SensitivitySpec {
                variable: req.variable,
                range_fraction: req.range_fraction,
                steps: req.steps,
            };
            let out = sensitivity::sweep(&req.assumptions, &spec)?;
            render_report(&AnalysisReport::Sensitivity(&out.result))
        }
        ReportKind::Scenarios => {
            let req: ScenarioRequest = read_input(&args.input)?;
            let presets = req
                .presets
                .unwrap_or_else(sensitivity::standard_presets);
            let out = sensitivity::run_scenarios(&req.assumptions, &presets)?;
            render_report(&AnalysisReport::Scenarios(&out.result))
        }
        ReportKind::Summary => {
            let req: SummaryRequest = read_input(&args.input)?;
            let dcf_out = dcf::valuate_dcf(&req.dcf)?;
            let comp_out = comps::valuate_comparable(&req.comparable)?;
            render_valuation_summary(&dcf_out.result, &comp_out.result)
        }
    };
    Ok(text)
}
