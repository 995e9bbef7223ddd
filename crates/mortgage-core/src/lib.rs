pub mod aggregation;
pub mod amortization;
pub mod analysis;
pub mod error;
pub mod inputs;
pub mod types;

#[cfg(feature = "charting")]
pub mod chart;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
