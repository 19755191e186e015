pub mod error;
pub mod types;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "ratios")]
pub mod ratios;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "report")]
pub mod report;

pub use error::CaseValError;
pub use types::*;

/// Standard result type for all engine operations
pub type CaseValResult<T> = Result<T, CaseValError>;
