use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CaseValError;
use crate::types::{with_metadata, AssumptionField, ComputationOutput, Money, Rate};
use crate::CaseValResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input assumptions for a perpetuity-growth DCF valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcfAssumptions {
    /// Year-0 free cash flow; each projection year compounds from this base
    pub base_free_cash_flow: Money,
    /// Annual growth rate applied over the explicit projection period
    pub growth_rate: Rate,
    /// Perpetuity growth rate beyond the projection horizon
    pub terminal_growth_rate: Rate,
    /// Discount rate (cost-of-capital proxy)
    pub discount_rate: Rate,
    /// Number of explicit projection years
    pub projection_years: u32,
}

/// A single projected year with its discounted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub year: u32,
    pub cash_flow: Money,
    pub present_value: Money,
}

/// Output of the DCF valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcfResult {
    /// Year-by-year projections, ordered by year
    pub projections: Vec<CashFlowPoint>,
    /// Gordon-growth terminal value at the projection horizon
    pub terminal_value: Money,
    /// Terminal value discounted to today
    pub terminal_present_value: Money,
    /// Sum of present values of the explicit-period cash flows
    pub pv_of_cash_flows: Money,
    /// Enterprise value = PV(cash flows) + PV(terminal value)
    pub enterprise_value: Money,
}

impl DcfAssumptions {
    /// Read one of the sweepable numeric fields by name.
    pub fn value_of(&self, field: AssumptionField) -> Decimal {
        match field {
            AssumptionField::BaseFreeCashFlow => self.base_free_cash_flow,
            AssumptionField::GrowthRate => self.growth_rate,
            AssumptionField::TerminalGrowthRate => self.terminal_growth_rate,
            AssumptionField::DiscountRate => self.discount_rate,
        }
    }

    /// Return a copy with exactly one field replaced.
    pub fn with_value(&self, field: AssumptionField, value: Decimal) -> Self {
        let mut out = self.clone();
        match field {
            AssumptionField::BaseFreeCashFlow => out.base_free_cash_flow = value,
            AssumptionField::GrowthRate => out.growth_rate = value,
            AssumptionField::TerminalGrowthRate => out.terminal_growth_rate = value,
            AssumptionField::DiscountRate => out.discount_rate = value,
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a perpetuity-growth DCF valuation.
pub fn valuate_dcf(a: &DcfAssumptions) -> CaseValResult<ComputationOutput<DcfResult>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_assumptions(a)?;

    let growth_factor = Decimal::ONE + a.growth_rate;
    let discount_factor_base = Decimal::ONE + a.discount_rate;

    let mut projections = Vec::with_capacity(a.projection_years as usize);
    let mut pv_of_cash_flows = Decimal::ZERO;

    for year in 1..=a.projection_years {
        let cash_flow = a.base_free_cash_flow * growth_factor.powi(year as i64);
        let present_value = cash_flow / discount_factor_base.powi(year as i64);
        pv_of_cash_flows += present_value;
        projections.push(CashFlowPoint {
            year,
            cash_flow,
            present_value,
        });
    }

    // Terminal value: one more year of growth at the perpetuity rate,
    // capitalised at (r - g_t). The denominator is guaranteed positive by
    // validation above.
    let horizon_cash_flow = a.base_free_cash_flow * growth_factor.powi(a.projection_years as i64);
    let terminal_cash_flow = horizon_cash_flow * (Decimal::ONE + a.terminal_growth_rate);
    let terminal_value = terminal_cash_flow / (a.discount_rate - a.terminal_growth_rate);
    let terminal_present_value =
        terminal_value / discount_factor_base.powi(a.projection_years as i64);

    let enterprise_value = pv_of_cash_flows + terminal_present_value;

    if !enterprise_value.is_zero() {
        let tv_pct = terminal_present_value / enterprise_value;
        if tv_pct > dec!(0.75) {
            warnings.push(format!(
                "Terminal value represents {:.1}% of enterprise value; consider extending the projection period",
                tv_pct * dec!(100)
            ));
        }
    }

    let output = DcfResult {
        projections,
        terminal_value,
        terminal_present_value,
        pv_of_cash_flows,
        enterprise_value,
    };

    Ok(with_metadata(
        "Perpetuity-Growth DCF",
        a,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_assumptions(a: &DcfAssumptions) -> CaseValResult<()> {
    if a.base_free_cash_flow <= Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "base_free_cash_flow".into(),
            reason: "Base free cash flow must be positive".into(),
        });
    }
    if a.discount_rate <= Decimal::ZERO {
        return Err(CaseValError::InvalidAssumptions {
            field: "discount_rate".into(),
            reason: "Discount rate must be positive".into(),
        });
    }
    if a.projection_years < 1 {
        return Err(CaseValError::InvalidAssumptions {
            field: "projection_years".into(),
            reason: "At least one projection year is required".into(),
        });
    }

    // Gordon growth constraint: the terminal perpetuity only converges when
    // the discount rate exceeds the terminal growth rate.
    if a.discount_rate <= a.terminal_growth_rate {
        return Err(CaseValError::InvalidAssumptions {
            field: "terminal_growth_rate".into(),
            reason: format!(
                "Discount rate ({}) must exceed terminal growth rate ({}) for the terminal value to converge",
                a.discount_rate, a.terminal_growth_rate
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
