pub mod analysis;
pub mod classification;

pub use analysis::{analyze_ratios, MarketInputs, RatioEntry, RatioInputs, RatioResult};
pub use classification::{classify, Classification, Direction};
