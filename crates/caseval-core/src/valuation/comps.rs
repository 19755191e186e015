use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CaseValError;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple};
use crate::CaseValResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs for a quick multiples-based valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparableInputs {
    /// Annual revenue; zero is allowed for pre-revenue subjects
    pub revenue: Money,
    /// EBITDA; zero is allowed
    pub ebitda: Money,
    /// Observed market revenue multiple (must be positive)
    pub revenue_multiple: Multiple,
    /// Observed market EBITDA multiple (must be positive)
    pub ebitda_multiple: Multiple,
}

/// Output of the comparables valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparableResult {
    pub revenue_based_valuation: Money,
    pub ebitda_based_valuation: Money,
    /// Simple mean of the two implied valuations
    pub average_valuation: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply revenue and EBITDA multiples to produce a comparables valuation.
pub fn valuate_comparable(
    c: &ComparableInputs,
) -> CaseValResult<ComputationOutput<ComparableResult>> {
    validate_inputs(c)?;

    let revenue_based_valuation = c.revenue * c.revenue_multiple;
    let ebitda_based_valuation = c.ebitda * c.ebitda_multiple;
    let average_valuation = (revenue_based_valuation + ebitda_based_valuation) / dec!(2);

    let mut warnings: Vec<String> = Vec::new();
    if c.revenue.is_zero() && c.ebitda.is_zero() {
        warnings.push(
            "Both revenue and EBITDA are zero; the implied valuation is zero".into(),
        );
    }

    let output = ComparableResult {
        revenue_based_valuation,
        ebitda_based_valuation,
        average_valuation,
    };

    Ok(with_metadata(
        "Comparable Multiples Valuation",
        c,
        warnings,
        output,
    ))
}

fn validate_inputs(c: &ComparableInputs) -> CaseValResult<()> {
    if c.revenue < Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "revenue".into(),
            reason: "Revenue cannot be negative".into(),
        });
    }
    if c.ebitda < Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "ebitda".into(),
            reason: "EBITDA cannot be negative".into(),
        });
    }
    if c.revenue_multiple <= Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "revenue_multiple".into(),
            reason: "Revenue multiple must be positive".into(),
        });
    }
    if c.ebitda_multiple <= Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "ebitda_multiple".into(),
            reason: "EBITDA multiple must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_inputs() -> ComparableInputs {
        ComparableInputs {
            revenue: dec!(10000000),
            ebitda: dec!(2000000),
            revenue_multiple: dec!(3.5),
            ebitda_multiple: dec!(12),
        }
    }

    #[test]
    fn test_basic_comparable() {
        let result = valuate_comparable(&sample_inputs()).unwrap();
        let out = &result.result;

        // 10,000,000 * 3.5 = 35,000,000
        assert_eq!(out.revenue_based_valuation, dec!(35000000));
        // 2,000,000 * 12 = 24,000,000
        assert_eq!(out.ebitda_based_valuation, dec!(24000000));
        // Mean = 29,500,000
        assert_eq!(out.average_valuation, dec!(29500000));
    }

    #[test]
    fn test_zero_revenue_allowed() {
        let mut c = sample_inputs();
        c.revenue = Decimal::ZERO;

        let result = valuate_comparable(&c).unwrap();
        assert_eq!(result.result.revenue_based_valuation, Decimal::ZERO);
        assert_eq!(result.result.average_valuation, dec!(12000000));
    }

    #[test]
    fn test_non_positive_multiple_rejected() {
        let mut c = sample_inputs();
        c.revenue_multiple = Decimal::ZERO;
        assert!(valuate_comparable(&c).is_err());

        let mut c = sample_inputs();
        c.ebitda_multiple = dec!(-1);
        assert!(valuate_comparable(&c).is_err());
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let mut c = sample_inputs();
        c.revenue = dec!(-1);
        assert!(valuate_comparable(&c).is_err());
    }

    #[test]
    fn test_all_zero_warns() {
        let mut c = sample_inputs();
        c.revenue = Decimal::ZERO;
        c.ebitda = Decimal::ZERO;

        let result = valuate_comparable(&c).unwrap();
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_methodology() {
        let result = valuate_comparable(&sample_inputs()).unwrap();
        assert_eq!(result.methodology, "Comparable Multiples Valuation");
    }
}
