use caseval_core::valuation::comps::{valuate_comparable, ComparableInputs};
use caseval_core::valuation::dcf::{valuate_dcf, DcfAssumptions};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

// ===========================================================================
// DCF tests
// ===========================================================================

fn reference_assumptions() -> DcfAssumptions {
    DcfAssumptions {
        base_free_cash_flow: dec!(1000000),
        growth_rate: dec!(0.05),
        terminal_growth_rate: dec!(0.02),
        discount_rate: dec!(0.10),
        projection_years: 5,
    }
}

/// Enterprise value computed directly from the defining formulas, kept
/// separate from the engine's accumulation order.
fn reference_enterprise_value(a: &DcfAssumptions) -> Decimal {
    let g = Decimal::ONE + a.growth_rate;
    let r = Decimal::ONE + a.discount_rate;
    let n = a.projection_years as i64;

    let mut pv_sum = Decimal::ZERO;
    for year in 1..=n {
        pv_sum += a.base_free_cash_flow * g.powi(year) / r.powi(year);
    }

    let terminal_cf =
        a.base_free_cash_flow * g.powi(n) * (Decimal::ONE + a.terminal_growth_rate);
    let terminal_value = terminal_cf / (a.discount_rate - a.terminal_growth_rate);
    pv_sum + terminal_value / r.powi(n)
}

fn assert_close(actual: Decimal, expected: Decimal, rel_tol: Decimal) {
    let scale = expected.abs().max(Decimal::ONE);
    assert!(
        (actual - expected).abs() <= rel_tol * scale,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_dcf_reference_case() {
    let a = reference_assumptions();
    let result = valuate_dcf(&a).unwrap();
    let out = &result.result;

    // Year 1: 1,050,000 / 1.10 = 954,545.45...
    assert_close(
        out.projections[0].present_value,
        dec!(1050000) / dec!(1.10),
        dec!(0.000000001),
    );

    assert_close(
        out.enterprise_value,
        reference_enterprise_value(&a),
        dec!(0.000001),
    );
}

#[test]
fn test_dcf_identity_holds_across_inputs() {
    let cases = [
        (dec!(500000), dec!(0.03), dec!(0.01), dec!(0.08), 3u32),
        (dec!(1000000), dec!(0.05), dec!(0.02), dec!(0.10), 5),
        (dec!(2500000), dec!(-0.02), dec!(0.00), dec!(0.12), 10),
        (dec!(750000), dec!(0.15), dec!(0.03), dec!(0.18), 7),
    ];

    for (fcf, g, gt, r, years) in cases {
        let a = DcfAssumptions {
            base_free_cash_flow: fcf,
            growth_rate: g,
            terminal_growth_rate: gt,
            discount_rate: r,
            projection_years: years,
        };
        let out = valuate_dcf(&a).unwrap().result;

        // EV is exactly the sum of its reported parts
        assert_eq!(
            out.enterprise_value,
            out.pv_of_cash_flows + out.terminal_present_value
        );

        // Each point satisfies PV = CF / (1+r)^year
        let rf = Decimal::ONE + a.discount_rate;
        for p in &out.projections {
            assert_close(
                p.present_value,
                p.cash_flow / rf.powi(p.year as i64),
                dec!(0.000000001),
            );
        }
    }
}

#[test]
fn test_dcf_discount_rate_monotonicity() {
    let mut a = reference_assumptions();
    let mut previous = valuate_dcf(&a).unwrap().result.enterprise_value;

    for rate in [dec!(0.11), dec!(0.12), dec!(0.15), dec!(0.20)] {
        a.discount_rate = rate;
        let ev = valuate_dcf(&a).unwrap().result.enterprise_value;
        assert!(
            ev < previous,
            "EV should fall as the discount rate rises: {ev} vs {previous}"
        );
        previous = ev;
    }
}

#[test]
fn test_dcf_invalid_assumptions_never_produce_values() {
    let mut a = reference_assumptions();
    a.discount_rate = dec!(0.02);
    a.terminal_growth_rate = dec!(0.05);

    // An error, not a NaN/Infinity-like sentinel value
    assert!(valuate_dcf(&a).is_err());
}

#[test]
fn test_dcf_serialization_roundtrip() {
    let a = reference_assumptions();
    let json = serde_json::to_string(&a).unwrap();
    let back: DcfAssumptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);

    let out = valuate_dcf(&a).unwrap().result;
    let json = serde_json::to_string(&out).unwrap();
    let back: caseval_core::valuation::dcf::DcfResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, out);
}

// ===========================================================================
// Comparables tests
// ===========================================================================

#[test]
fn test_comparable_reference_case() {
    let c = ComparableInputs {
        revenue: dec!(10000000),
        ebitda: dec!(2000000),
        revenue_multiple: dec!(3.5),
        ebitda_multiple: dec!(12),
    };
    let out = valuate_comparable(&c).unwrap().result;

    assert_eq!(out.revenue_based_valuation, dec!(35000000));
    assert_eq!(out.ebitda_based_valuation, dec!(24000000));
    assert_eq!(
        out.average_valuation,
        (out.revenue_based_valuation + out.ebitda_based_valuation) / dec!(2)
    );
}

#[test]
fn test_comparable_rejects_bad_multiples() {
    for (rm, em) in [(dec!(0), dec!(12)), (dec!(3.5), dec!(0)), (dec!(-2), dec!(12))] {
        let c = ComparableInputs {
            revenue: dec!(10000000),
            ebitda: dec!(2000000),
            revenue_multiple: rm,
            ebitda_multiple: em,
        };
        assert!(valuate_comparable(&c).is_err(), "multiples {rm}/{em}");
    }
}
