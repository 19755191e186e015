//! Narrative rendering of analysis results.
//!
//! Pure template expansion over already-computed result records; no
//! valuation logic lives here. The output is a markdown-ish block intended
//! for insertion into the caller's text surface.

pub mod format;

use crate::ratios::{RatioEntry, RatioResult};
use crate::sensitivity::{ScenarioBatchResult, SweepResult};
use crate::valuation::comps::ComparableResult;
use crate::valuation::dcf::DcfResult;

use self::format as fmt;

/// Line rendered for sweep points and scenarios that failed validation.
const INVALID_LINE: &str = "N/A (invalid assumptions)";

/// A result record paired with its report template.
#[derive(Debug, Clone)]
pub enum AnalysisReport<'a> {
    Dcf(&'a DcfResult),
    Comparable(&'a ComparableResult),
    Ratios(&'a RatioResult),
    Sensitivity(&'a SweepResult),
    Scenarios(&'a ScenarioBatchResult),
}

/// Render one analysis result as a narrative text block.
pub fn render_report(report: &AnalysisReport) -> String {
    match report {
        AnalysisReport::Dcf(r) => render_dcf(r),
        AnalysisReport::Comparable(r) => render_comparable(r),
        AnalysisReport::Ratios(r) => render_ratios(r),
        AnalysisReport::Sensitivity(r) => render_sweep(r),
        AnalysisReport::Scenarios(r) => render_scenarios(r),
    }
}

/// Combined DCF + comparables summary with a low/high/midpoint valuation
/// range.
pub fn render_valuation_summary(dcf: &DcfResult, comparable: &ComparableResult) -> String {
    let low = dcf.enterprise_value.min(comparable.average_valuation);
    let high = dcf.enterprise_value.max(comparable.average_valuation);
    let midpoint = (dcf.enterprise_value + comparable.average_valuation) / rust_decimal::Decimal::TWO;

    let mut out = String::new();
    out.push_str("# Valuation Analysis\n\n");
    out.push_str("## DCF Model Results\n");
    push_kv(&mut out, "Enterprise Value", &fmt::currency(dcf.enterprise_value));
    push_kv(
        &mut out,
        "Present Value of Cash Flows",
        &fmt::currency(dcf.pv_of_cash_flows),
    );
    push_kv(&mut out, "Terminal Value", &fmt::currency(dcf.terminal_value));
    out.push('\n');
    out.push_str("## Comparable Company Analysis\n");
    push_kv(
        &mut out,
        "Revenue-based Valuation",
        &fmt::currency(comparable.revenue_based_valuation),
    );
    push_kv(
        &mut out,
        "EBITDA-based Valuation",
        &fmt::currency(comparable.ebitda_based_valuation),
    );
    push_kv(
        &mut out,
        "Average Valuation",
        &fmt::currency(comparable.average_valuation),
    );
    out.push('\n');
    out.push_str("## Valuation Range\n");
    push_kv(&mut out, "Low", &fmt::currency(low));
    push_kv(&mut out, "High", &fmt::currency(high));
    push_kv(&mut out, "Midpoint", &fmt::currency(midpoint));
    out
}

// ---------------------------------------------------------------------------
// Per-kind templates
// ---------------------------------------------------------------------------

fn render_dcf(r: &DcfResult) -> String {
    let mut out = String::new();
    out.push_str("# DCF Valuation\n\n");
    push_kv(&mut out, "Enterprise Value", &fmt::currency(r.enterprise_value));
    push_kv(
        &mut out,
        "Present Value of Cash Flows",
        &fmt::currency(r.pv_of_cash_flows),
    );
    push_kv(&mut out, "Terminal Value", &fmt::currency(r.terminal_value));
    push_kv(
        &mut out,
        "Terminal Value (present)",
        &fmt::currency(r.terminal_present_value),
    );
    out.push('\n');
    out.push_str("## Cash Flow Projections\n");
    for p in &r.projections {
        out.push_str(&format!(
            "- Year {}: {} (present value {})\n",
            p.year,
            fmt::currency(p.cash_flow),
            fmt::currency(p.present_value)
        ));
    }
    out
}

fn render_comparable(r: &ComparableResult) -> String {
    let mut out = String::new();
    out.push_str("# Comparable Company Analysis\n\n");
    push_kv(
        &mut out,
        "Revenue-based Valuation",
        &fmt::currency(r.revenue_based_valuation),
    );
    push_kv(
        &mut out,
        "EBITDA-based Valuation",
        &fmt::currency(r.ebitda_based_valuation),
    );
    push_kv(&mut out, "Average Valuation", &fmt::currency(r.average_valuation));
    out
}

fn render_ratios(r: &RatioResult) -> String {
    let mut out = String::new();
    out.push_str("# Financial Ratio Analysis\n");

    push_ratio_group(&mut out, "Liquidity", &r.liquidity);
    push_ratio_group(&mut out, "Leverage", &r.leverage);
    push_ratio_group(&mut out, "Profitability", &r.profitability);
    push_ratio_group(&mut out, "Efficiency", &r.efficiency);
    if !r.market.is_empty() {
        push_ratio_group(&mut out, "Market", &r.market);
    }
    out
}

fn render_sweep(r: &SweepResult) -> String {
    let mut out = String::new();
    out.push_str("# Sensitivity Analysis\n\n");
    push_kv(
        &mut out,
        "Base Case Enterprise Value",
        &fmt::currency(r.base_enterprise_value),
    );
    out.push('\n');
    out.push_str(&format!("## Sensitivity to {}\n", r.variable));
    for p in &r.points {
        match (p.enterprise_value, p.percent_change_from_base) {
            (Some(ev), Some(change)) => out.push_str(&format!(
                "- {} change: {} ({} from base)\n",
                fmt::signed_percent(p.variation_percent),
                fmt::currency(ev),
                fmt::signed_percent(change)
            )),
            _ => out.push_str(&format!(
                "- {} change: {INVALID_LINE}\n",
                fmt::signed_percent(p.variation_percent)
            )),
        }
    }
    out
}

fn render_scenarios(r: &ScenarioBatchResult) -> String {
    let mut out = String::new();
    out.push_str("# Scenario Analysis\n\n");
    for outcome in &r.results {
        match outcome.enterprise_value {
            Some(ev) => push_kv(&mut out, &outcome.name, &fmt::currency(ev)),
            None => push_kv(&mut out, &outcome.name, INVALID_LINE),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn push_kv(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("- **{key}**: {value}\n"));
}

fn push_ratio_group(out: &mut String, heading: &str, entries: &[RatioEntry]) {
    out.push('\n');
    out.push_str(&format!("## {heading} Ratios\n"));
    for e in entries {
        if e.insufficient_data {
            out.push_str(&format!("- **{}**: N/A (insufficient data)\n", e.name));
        } else {
            out.push_str(&format!(
                "- **{}**: {} [{}]\n",
                e.name,
                fmt::ratio(e.value),
                e.classification
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
