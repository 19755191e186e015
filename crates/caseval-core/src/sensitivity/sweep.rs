use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CaseValError;
use crate::types::{with_metadata, AssumptionField, ComputationOutput, Money, Rate};
use crate::valuation::dcf::{valuate_dcf, DcfAssumptions};
use crate::CaseValResult;

/// Upper bound on sweep granularity; out-of-range specs are rejected, never
/// clamped.
pub const MAX_SWEEP_STEPS: u32 = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Specification of a one-variable symmetric sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivitySpec {
    /// Which assumption to perturb
    pub variable: AssumptionField,
    /// Symmetric variation as a fraction of the base value (0.02 = ±2%)
    pub range_fraction: Rate,
    /// Steps on each side of the base case; 0 yields a single base point
    pub steps: u32,
}

/// One evaluated sweep point. Failed valuations keep their slot with the
/// error recorded instead of aborting the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Variation applied, in percent (-2.0 .. +2.0 for a ±2% sweep)
    pub variation_percent: Rate,
    /// The perturbed value of the swept assumption
    pub perturbed_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise_value: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change_from_base: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output of a sensitivity sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResult {
    pub variable: AssumptionField,
    pub base_enterprise_value: Money,
    /// Points ordered by variation ascending (most negative first)
    pub points: Vec<SensitivityPoint>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Re-valuate the base case across a symmetric range of one assumption.
///
/// The base case itself must be valid; individual perturbed points that
/// violate a DCF precondition are recorded as failed entries.
pub fn sweep(
    base: &DcfAssumptions,
    spec: &SensitivitySpec,
) -> CaseValResult<ComputationOutput<SweepResult>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_spec(spec)?;

    let base_output = valuate_dcf(base)?;
    let base_ev = base_output.result.enterprise_value;
    for w in base_output.warnings {
        warnings.push(format!("[base case] {w}"));
    }

    let base_value = base.value_of(spec.variable);
    let steps = spec.steps as i64;

    let mut points = Vec::with_capacity((2 * spec.steps + 1) as usize);
    if spec.steps == 0 {
        points.push(evaluate_point(base, spec, Decimal::ZERO, base_value, base_ev));
    } else {
        for i in -steps..=steps {
            let variation = Decimal::from(i) / Decimal::from(steps) * spec.range_fraction;
            points.push(evaluate_point(base, spec, variation, base_value, base_ev));
        }
    }

    let failed = points.iter().filter(|p| p.error.is_some()).count();
    if failed > 0 {
        warnings.push(format!(
            "{failed} of {} sweep points had invalid assumptions",
            points.len()
        ));
    }

    let output = SweepResult {
        variable: spec.variable,
        base_enterprise_value: base_ev,
        points,
    };

    Ok(with_metadata(
        "One-Variable Sensitivity Sweep",
        &serde_json::json!({
            "base": base,
            "spec": spec,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_spec(spec: &SensitivitySpec) -> CaseValResult<()> {
    if spec.steps > MAX_SWEEP_STEPS {
        return Err(CaseValError::InvalidAssumptions {
            field: "steps".into(),
            reason: format!("Steps must be at most {MAX_SWEEP_STEPS}, got {}", spec.steps),
        });
    }
    if spec.range_fraction < Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "range_fraction".into(),
            reason: "Range fraction cannot be negative".into(),
        });
    }
    Ok(())
}

fn evaluate_point(
    base: &DcfAssumptions,
    spec: &SensitivitySpec,
    variation: Decimal,
    base_value: Decimal,
    base_ev: Money,
) -> SensitivityPoint {
    let perturbed_value = base_value * (Decimal::ONE + variation);
    let perturbed = base.with_value(spec.variable, perturbed_value);
    let variation_percent = variation * dec!(100);

    match valuate_dcf(&perturbed) {
        Ok(out) => {
            let ev = out.result.enterprise_value;
            let percent_change = if base_ev.is_zero() {
                None
            } else {
                Some((ev - base_ev) / base_ev * dec!(100))
            };
            SensitivityPoint {
                variation_percent,
                perturbed_value,
                enterprise_value: Some(ev),
                percent_change_from_base: percent_change,
                error: None,
            }
        }
        Err(e) => SensitivityPoint {
            variation_percent,
            perturbed_value,
            enterprise_value: None,
            percent_change_from_base: None,
            error: Some(e.to_string()),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
