//! Fixed-rate loan amortization with decimal precision.
//!
//! Solves for whichever of monthly payment, payoff date or annual interest rate
//! is unknown, or produces a full amortization schedule. All amounts are
//! `rust_decimal::Decimal`, all dates `chrono::NaiveDate`, and every operation
//! takes the evaluation ("today") date explicitly.

pub mod amortization;
pub mod error;
pub mod types;

pub use error::{AmortizeError, ValidationError};
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizeResult<T> = Result<T, AmortizeError>;
