use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Health classification of a single ratio against its threshold band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Good,
    Warning,
    Poor,
    /// No threshold band exists for the ratio, or its denominator was
    /// zero/negative.
    Unclassified,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Good => write!(f, "Good"),
            Classification::Warning => write!(f, "Warning"),
            Classification::Poor => write!(f, "Poor"),
            Classification::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// Whether a higher or lower ratio value is healthier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Threshold band for one ratio.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdBand {
    pub good: Decimal,
    pub warning: Decimal,
    pub direction: Direction,
}

/// Declarative threshold table. Ratios absent from this table classify as
/// `Unclassified`.
pub fn threshold_for(ratio_name: &str) -> Option<ThresholdBand> {
    let band = |good, warning, direction| ThresholdBand {
        good,
        warning,
        direction,
    };
    use Direction::*;

    match ratio_name {
        "current_ratio" => Some(band(dec!(2.0), dec!(1.5), HigherIsBetter)),
        "quick_ratio" => Some(band(dec!(1.5), dec!(1.0), HigherIsBetter)),
        "debt_to_equity" => Some(band(dec!(0.5), dec!(1.0), LowerIsBetter)),
        "interest_coverage" => Some(band(dec!(5.0), dec!(2.5), HigherIsBetter)),
        "gross_margin" => Some(band(dec!(0.40), dec!(0.25), HigherIsBetter)),
        "operating_margin" => Some(band(dec!(0.15), dec!(0.08), HigherIsBetter)),
        "net_margin" => Some(band(dec!(0.15), dec!(0.05), HigherIsBetter)),
        "return_on_equity" => Some(band(dec!(0.15), dec!(0.10), HigherIsBetter)),
        "return_on_assets" => Some(band(dec!(0.10), dec!(0.05), HigherIsBetter)),
        "asset_turnover" => Some(band(dec!(1.0), dec!(0.5), HigherIsBetter)),
        _ => None,
    }
}

/// Classify a computed ratio value against the threshold table.
pub fn classify(ratio_name: &str, value: Decimal) -> Classification {
    let Some(band) = threshold_for(ratio_name) else {
        return Classification::Unclassified;
    };

    match band.direction {
        Direction::HigherIsBetter => {
            if value >= band.good {
                Classification::Good
            } else if value >= band.warning {
                Classification::Warning
            } else {
                Classification::Poor
            }
        }
        Direction::LowerIsBetter => {
            if value <= band.good {
                Classification::Good
            } else if value <= band.warning {
                Classification::Warning
            } else {
                Classification::Poor
            }
        }
    }
}
