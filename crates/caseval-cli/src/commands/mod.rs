pub mod ratios;
pub mod report;
pub mod sensitivity;
pub mod valuation;
