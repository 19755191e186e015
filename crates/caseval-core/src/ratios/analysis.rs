use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput, Money};
use crate::CaseValResult;

use super::classification::{classify, Classification};

// Statement-detail estimates: when the balance sheet is given at this level
// of aggregation, cash, COGS and receivables are approximated as fixed
// portions of their parent line.
const CASH_PORTION_OF_CURRENT_ASSETS: Decimal = dec!(0.2);
const COGS_PORTION_OF_REVENUE: Decimal = dec!(0.6);
const RECEIVABLES_PORTION_OF_CURRENT_ASSETS: Decimal = dec!(0.3);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Balance-sheet and income-statement figures for ratio analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioInputs {
    // Balance sheet
    pub current_assets: Money,
    pub total_assets: Money,
    pub inventory: Money,
    pub current_liabilities: Money,
    pub total_liabilities: Money,
    pub shareholders_equity: Money,
    // Income statement
    pub revenue: Money,
    pub net_income: Money,
    pub gross_profit: Money,
    pub operating_income: Money,
    pub interest_expense: Money,
    // Market figures; when absent the market group is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketInputs>,
}

/// Optional market data for the market-ratio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInputs {
    pub market_value: Money,
    pub shares_outstanding: Decimal,
    pub dividends_per_share: Money,
}

/// One computed ratio with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioEntry {
    pub name: String,
    /// Reported as 0 when the denominator was zero/negative
    pub value: Decimal,
    pub classification: Classification,
    pub insufficient_data: bool,
}

/// Categorized ratio analysis. Groups keep a fixed, deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioResult {
    pub liquidity: Vec<RatioEntry>,
    pub leverage: Vec<RatioEntry>,
    pub profitability: Vec<RatioEntry>,
    pub efficiency: Vec<RatioEntry>,
    pub market: Vec<RatioEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute and classify the standard ratio set.
///
/// A zero or negative denominator never aborts the analysis: the affected
/// ratio reports value 0, `Unclassified`, and `insufficient_data = true`.
pub fn analyze_ratios(r: &RatioInputs) -> CaseValResult<ComputationOutput<RatioResult>> {
    let mut warnings: Vec<String> = Vec::new();

    let liquidity = vec![
        ratio("current_ratio", r.current_assets, r.current_liabilities, &mut warnings),
        ratio(
            "quick_ratio",
            r.current_assets - r.inventory,
            r.current_liabilities,
            &mut warnings,
        ),
        ratio(
            "cash_ratio",
            r.current_assets * CASH_PORTION_OF_CURRENT_ASSETS,
            r.current_liabilities,
            &mut warnings,
        ),
    ];

    let leverage = vec![
        ratio("debt_to_equity", r.total_liabilities, r.shareholders_equity, &mut warnings),
        ratio("debt_to_assets", r.total_liabilities, r.total_assets, &mut warnings),
        ratio("equity_ratio", r.shareholders_equity, r.total_assets, &mut warnings),
        ratio("interest_coverage", r.operating_income, r.interest_expense, &mut warnings),
    ];

    let profitability = vec![
        ratio("gross_margin", r.gross_profit, r.revenue, &mut warnings),
        ratio("operating_margin", r.operating_income, r.revenue, &mut warnings),
        ratio("net_margin", r.net_income, r.revenue, &mut warnings),
        ratio("return_on_equity", r.net_income, r.shareholders_equity, &mut warnings),
        ratio("return_on_assets", r.net_income, r.total_assets, &mut warnings),
    ];

    let efficiency = vec![
        ratio("asset_turnover", r.revenue, r.total_assets, &mut warnings),
        ratio(
            "inventory_turnover",
            r.revenue * COGS_PORTION_OF_REVENUE,
            r.inventory,
            &mut warnings,
        ),
        ratio(
            "receivables_turnover",
            r.revenue,
            r.current_assets * RECEIVABLES_PORTION_OF_CURRENT_ASSETS,
            &mut warnings,
        ),
    ];

    let market = match &r.market {
        Some(m) => market_ratios(r, m, &mut warnings),
        None => Vec::new(),
    };

    let output = RatioResult {
        liquidity,
        leverage,
        profitability,
        efficiency,
        market,
    };

    Ok(with_metadata(
        "Categorized Financial Ratio Analysis",
        r,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute one ratio, guarding the denominator.
fn ratio(
    name: &str,
    numerator: Decimal,
    denominator: Decimal,
    warnings: &mut Vec<String>,
) -> RatioEntry {
    if denominator <= Decimal::ZERO {
        warnings.push(format!(
            "{name}: denominator is zero or negative; ratio left unclassified"
        ));
        return RatioEntry {
            name: name.to_string(),
            value: Decimal::ZERO,
            classification: Classification::Unclassified,
            insufficient_data: true,
        };
    }

    let value = numerator / denominator;
    RatioEntry {
        name: name.to_string(),
        value,
        classification: classify(name, value),
        insufficient_data: false,
    }
}

fn market_ratios(
    r: &RatioInputs,
    m: &MarketInputs,
    warnings: &mut Vec<String>,
) -> Vec<RatioEntry> {
    let price_per_share = ratio(
        "price_per_share",
        m.market_value,
        m.shares_outstanding,
        warnings,
    );

    // P/E = price per share / EPS, which reduces to market value / net income
    let price_earnings = ratio("price_earnings", m.market_value, r.net_income, warnings);
    let price_to_book = ratio("price_to_book", m.market_value, r.shareholders_equity, warnings);
    let dividend_yield = ratio(
        "dividend_yield",
        m.dividends_per_share,
        price_per_share.value,
        warnings,
    );

    vec![price_per_share, price_earnings, price_to_book, dividend_yield]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_inputs() -> RatioInputs {
        RatioInputs {
            current_assets: dec!(2500000),
            total_assets: dec!(10000000),
            inventory: dec!(800000),
            current_liabilities: dec!(1000000),
            total_liabilities: dec!(4000000),
            shareholders_equity: dec!(6000000),
            revenue: dec!(15000000),
            net_income: dec!(1500000),
            gross_profit: dec!(6000000),
            operating_income: dec!(2000000),
            interest_expense: dec!(200000),
            market: Some(MarketInputs {
                market_value: dec!(12000000),
                shares_outstanding: dec!(1000000),
                dividends_per_share: dec!(1.50),
            }),
        }
    }

    fn find<'a>(group: &'a [RatioEntry], name: &str) -> &'a RatioEntry {
        group.iter().find(|e| e.name == name).unwrap()
    }

    #[test]
    fn test_current_ratio_good() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let entry = find(&result.result.liquidity, "current_ratio");

        // 2,500,000 / 1,000,000 = 2.5, at/above the 2.0 threshold
        assert_eq!(entry.value, dec!(2.5));
        assert_eq!(entry.classification, Classification::Good);
        assert!(!entry.insufficient_data);
    }

    #[test]
    fn test_zero_denominator_unclassified() {
        let mut r = sample_inputs();
        r.current_liabilities = Decimal::ZERO;

        let result = analyze_ratios(&r).unwrap();
        let entry = find(&result.result.liquidity, "current_ratio");

        assert_eq!(entry.value, Decimal::ZERO);
        assert_eq!(entry.classification, Classification::Unclassified);
        assert!(entry.insufficient_data);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("current_ratio")));
    }

    #[test]
    fn test_quick_ratio() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let entry = find(&result.result.liquidity, "quick_ratio");

        // (2,500,000 - 800,000) / 1,000,000 = 1.7
        assert_eq!(entry.value, dec!(1.7));
        assert_eq!(entry.classification, Classification::Good);
    }

    #[test]
    fn test_leverage_group() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let out = &result.result;

        // 4,000,000 / 6,000,000
        let dte = find(&out.leverage, "debt_to_equity");
        assert_eq!(dte.value, dec!(4000000) / dec!(6000000));
        assert_eq!(dte.classification, Classification::Warning);

        // 2,000,000 / 200,000 = 10x coverage
        let cov = find(&out.leverage, "interest_coverage");
        assert_eq!(cov.value, dec!(10));
        assert_eq!(cov.classification, Classification::Good);
    }

    #[test]
    fn test_profitability_group() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let out = &result.result;

        assert_eq!(find(&out.profitability, "gross_margin").value, dec!(0.4));
        assert_eq!(find(&out.profitability, "net_margin").value, dec!(0.1));
        assert_eq!(
            find(&out.profitability, "return_on_equity").value,
            dec!(0.25)
        );
        assert_eq!(
            find(&out.profitability, "return_on_equity").classification,
            Classification::Good
        );
        assert_eq!(find(&out.profitability, "return_on_assets").value, dec!(0.15));
    }

    #[test]
    fn test_efficiency_estimates() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let out = &result.result;

        // Asset turnover = 15,000,000 / 10,000,000 = 1.5
        assert_eq!(find(&out.efficiency, "asset_turnover").value, dec!(1.5));
        // Inventory turnover uses estimated COGS of 60% of revenue
        assert_eq!(
            find(&out.efficiency, "inventory_turnover").value,
            dec!(9000000) / dec!(800000)
        );
    }

    #[test]
    fn test_market_group() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let out = &result.result;

        // Price per share = 12,000,000 / 1,000,000 = 12
        assert_eq!(find(&out.market, "price_per_share").value, dec!(12));
        // P/E = 12,000,000 / 1,500,000 = 8
        assert_eq!(find(&out.market, "price_earnings").value, dec!(8));
        assert_eq!(find(&out.market, "price_to_book").value, dec!(2));
        // Dividend yield = 1.50 / 12 = 12.5%
        assert_eq!(find(&out.market, "dividend_yield").value, dec!(0.125));
    }

    #[test]
    fn test_no_market_data_gives_empty_group() {
        let mut r = sample_inputs();
        r.market = None;

        let result = analyze_ratios(&r).unwrap();
        assert!(result.result.market.is_empty());
    }

    #[test]
    fn test_negative_net_income_still_reported() {
        let mut r = sample_inputs();
        r.net_income = dec!(-500000);

        let result = analyze_ratios(&r).unwrap();
        let entry = find(&result.result.profitability, "net_margin");

        // Denominator (revenue) is fine, so the negative value is reported
        assert_eq!(entry.value, dec!(-500000) / dec!(15000000));
        assert_eq!(entry.classification, Classification::Poor);
        assert!(!entry.insufficient_data);
    }

    #[test]
    fn test_group_order_is_stable() {
        let result = analyze_ratios(&sample_inputs()).unwrap();
        let names: Vec<&str> = result
            .result
            .liquidity
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["current_ratio", "quick_ratio", "cash_ratio"]);
    }

    #[test]
    fn test_idempotent() {
        let r = sample_inputs();
        assert_eq!(
            analyze_ratios(&r).unwrap().result,
            analyze_ratios(&r).unwrap().result
        );
    }
}
