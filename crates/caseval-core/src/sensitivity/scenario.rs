use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CaseValError;
use crate::types::{with_metadata, AssumptionField, ComputationOutput, Money};
use crate::valuation::dcf::{valuate_dcf, DcfAssumptions};
use crate::CaseValResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A named scenario: multipliers applied to a subset of the base
/// assumptions. Fields not named are left untouched, so an empty table is
/// the base case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    pub name: String,
    pub multipliers: BTreeMap<AssumptionField, Decimal>,
}

/// Result for one scenario. A preset that drives the assumptions invalid
/// carries the error instead of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise_value: Option<Money>,
    pub assumptions_used: DcfAssumptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output of a scenario batch, in preset order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioBatchResult {
    pub results: Vec<ScenarioOutcome>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The conventional optimistic/base/pessimistic preset table.
///
/// The cash-flow level multiplier plays the role a margin uplift would in a
/// revenue-driven model.
pub fn standard_presets() -> Vec<ScenarioPreset> {
    vec![
        ScenarioPreset {
            name: "optimistic".into(),
            multipliers: BTreeMap::from([
                (AssumptionField::GrowthRate, dec!(1.5)),
                (AssumptionField::BaseFreeCashFlow, dec!(1.2)),
                (AssumptionField::DiscountRate, dec!(0.9)),
            ]),
        },
        ScenarioPreset {
            name: "base".into(),
            multipliers: BTreeMap::new(),
        },
        ScenarioPreset {
            name: "pessimistic".into(),
            multipliers: BTreeMap::from([
                (AssumptionField::GrowthRate, dec!(0.5)),
                (AssumptionField::BaseFreeCashFlow, dec!(0.8)),
                (AssumptionField::DiscountRate, dec!(1.1)),
            ]),
        },
    ]
}

/// Valuate the base assumptions under each preset.
///
/// One failing scenario is recorded in its own outcome; the batch always
/// returns an entry per preset.
pub fn run_scenarios(
    base: &DcfAssumptions,
    presets: &[ScenarioPreset],
) -> CaseValResult<ComputationOutput<ScenarioBatchResult>> {
    if presets.is_empty() {
        return Err(CaseValError::InsufficientData(
            "At least one scenario preset is required".into(),
        ));
    }

    let mut warnings: Vec<String> = Vec::new();
    let mut results = Vec::with_capacity(presets.len());

    for preset in presets {
        let assumptions = apply_preset(base, preset);
        match valuate_dcf(&assumptions) {
            Ok(out) => {
                for w in out.warnings {
                    warnings.push(format!("[{}] {w}", preset.name));
                }
                results.push(ScenarioOutcome {
                    name: preset.name.clone(),
                    enterprise_value: Some(out.result.enterprise_value),
                    assumptions_used: assumptions,
                    error: None,
                });
            }
            Err(e) => {
                warnings.push(format!("[{}] scenario not valuated: {e}", preset.name));
                results.push(ScenarioOutcome {
                    name: preset.name.clone(),
                    enterprise_value: None,
                    assumptions_used: assumptions,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let output = ScenarioBatchResult { results };

    Ok(with_metadata(
        "Named-Preset Scenario Analysis",
        &serde_json::json!({
            "base": base,
            "presets": presets,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn apply_preset(base: &DcfAssumptions, preset: &ScenarioPreset) -> DcfAssumptions {
    preset
        .multipliers
        .iter()
        .fold(base.clone(), |acc, (&field, &multiplier)| {
            let value = acc.value_of(field) * multiplier;
            acc.with_value(field, value)
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_case() -> DcfAssumptions {
        DcfAssumptions {
            base_free_cash_flow: dec!(1000000),
            growth_rate: dec!(0.05),
            terminal_growth_rate: dec!(0.02),
            discount_rate: dec!(0.10),
            projection_years: 5,
        }
    }

    #[test]
    fn test_standard_preset_ordering() {
        let result = run_scenarios(&base_case(), &standard_presets()).unwrap();
        let out = &result.result;

        assert_eq!(out.results.len(), 3);
        let optimistic = out.results[0].enterprise_value.unwrap();
        let base = out.results[1].enterprise_value.unwrap();
        let pessimistic = out.results[2].enterprise_value.unwrap();

        assert!(optimistic >= base);
        assert!(base >= pessimistic);
    }

    #[test]
    fn test_base_preset_matches_direct_valuation() {
        let base = base_case();
        let result = run_scenarios(&base, &standard_presets()).unwrap();
        let direct = valuate_dcf(&base).unwrap().result.enterprise_value;

        assert_eq!(result.result.results[1].enterprise_value.unwrap(), direct);
        assert_eq!(result.result.results[1].assumptions_used, base);
    }

    #[test]
    fn test_only_named_fields_touched() {
        let base = base_case();
        let result = run_scenarios(&base, &standard_presets()).unwrap();
        let optimistic = &result.result.results[0].assumptions_used;

        assert_eq!(optimistic.growth_rate, dec!(0.075));
        assert_eq!(optimistic.base_free_cash_flow, dec!(1200000));
        assert_eq!(optimistic.discount_rate, dec!(0.09));
        // Unnamed fields are untouched
        assert_eq!(optimistic.terminal_growth_rate, base.terminal_growth_rate);
        assert_eq!(optimistic.projection_years, base.projection_years);
    }

    #[test]
    fn test_partial_failure_keeps_other_scenarios() {
        let presets = vec![
            ScenarioPreset {
                name: "crash".into(),
                // Drives the discount rate below terminal growth
                multipliers: BTreeMap::from([(AssumptionField::DiscountRate, dec!(0.1))]),
            },
            ScenarioPreset {
                name: "base".into(),
                multipliers: BTreeMap::new(),
            },
        ];

        let result = run_scenarios(&base_case(), &presets).unwrap();
        let out = &result.result;

        assert!(out.results[0].error.is_some());
        assert!(out.results[0].enterprise_value.is_none());
        assert!(out.results[1].error.is_none());
        assert!(out.results[1].enterprise_value.is_some());
        assert!(result.warnings.iter().any(|w| w.contains("crash")));
    }

    #[test]
    fn test_empty_presets_rejected() {
        assert!(run_scenarios(&base_case(), &[]).is_err());
    }

    #[test]
    fn test_preset_roundtrips_through_json() {
        let presets = standard_presets();
        let json = serde_json::to_string(&presets).unwrap();
        let back: Vec<ScenarioPreset> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, presets);
    }
}
