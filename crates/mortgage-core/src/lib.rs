pub mod amortization;
pub mod annuity;
pub mod error;
pub mod types;

#[cfg(feature = "quote")]
pub mod quote;

#[cfg(feature = "programs")]
pub mod programs;

#[cfg(feature = "export")]
pub mod export;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
