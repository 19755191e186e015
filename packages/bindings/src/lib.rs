use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use caseval_core::sensitivity::{ScenarioPreset, SensitivitySpec};
use caseval_core::types::AssumptionField;
use caseval_core::valuation::dcf::DcfAssumptions;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn valuate_dcf(input_json: String) -> NapiResult<String> {
    let input: DcfAssumptions = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = caseval_core::valuation::dcf::valuate_dcf(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn valuate_comparable(input_json: String) -> NapiResult<String> {
    let input: caseval_core::valuation::comps::ComparableInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        caseval_core::valuation::comps::valuate_comparable(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_ratios(input_json: String) -> NapiResult<String> {
    let input: caseval_core::ratios::RatioInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = caseval_core::ratios::analyze_ratios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SweepRequest {
    assumptions: DcfAssumptions,
    variable: AssumptionField,
    range_fraction: rust_decimal::Decimal,
    steps: u32,
}

#[derive(Deserialize)]
struct ScenarioRequest {
    assumptions: DcfAssumptions,
    #[serde(default)]
    presets: Option<Vec<ScenarioPreset>>,
}

#[napi]
pub fn run_sweep(input_json: String) -> NapiResult<String> {
    let req: SweepRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let spec = SensitivitySpec {
        variable: req.variable,
        range_fraction: req.range_fraction,
        steps: req.steps,
    };
    let output =
        caseval_core::sensitivity::sweep(&req.assumptions, &spec).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn run_scenarios(input_json: String) -> NapiResult<String> {
    let req: ScenarioRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let presets = req
        .presets
        .unwrap_or_else(caseval_core::sensitivity::standard_presets);
    let output = caseval_core::sensitivity::run_scenarios(&req.assumptions, &presets)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[napi]
pub fn render_dcf_report(input_json: String) -> NapiResult<String> {
    let input: DcfAssumptions = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = caseval_core::valuation::dcf::valuate_dcf(&input).map_err(to_napi_error)?;
    Ok(caseval_core::report::render_report(
        &caseval_core::report::AnalysisReport::Dcf(&output.result),
    ))
}

#[derive(Deserialize)]
struct SummaryRequest {
    dcf: DcfAssumptions,
    comparable: caseval_core::valuation::comps::ComparableInputs,
}

#[napi]
pub fn render_valuation_summary(input_json: String) -> NapiResult<String> {
    let req: SummaryRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let dcf = caseval_core::valuation::dcf::valuate_dcf(&req.dcf).map_err(to_napi_error)?;
    let comps = caseval_core::valuation::comps::valuate_comparable(&req.comparable)
        .map_err(to_napi_error)?;
    Ok(caseval_core::report::render_valuation_summary(
        &dcf.result,
        &comps.result,
    ))
}
