use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Money;

/// Input-validation failures, checked before any computation runs.
///
/// The display strings are the user-facing reasons and are stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Balance must be a positive number.")]
    NonPositiveBalance,

    #[error("Monthly Payment must be greater than zero.")]
    NonPositivePayment,

    #[error("Interest Rate must be greater than zero.")]
    NonPositiveRate,

    #[error("Invalid End Date format.")]
    InvalidEndDateFormat,

    #[error("End Date must be in the future.")]
    EndDateNotInFuture,
}

#[derive(Debug, Error)]
pub enum AmortizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Missing input: {field} is required to calculate {mode}")]
    MissingInput { mode: String, field: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Non-positive time horizon: {months} months until the target date")]
    NonPositiveHorizon { months: i64 },

    #[error("Payment does not cover accruing interest (detected in month {month})")]
    Unrepayable { month: u32 },

    #[error("Loan is not repaid within {months} months")]
    IterationLimit { months: u32 },

    #[error("Payment {payment} does not exceed the zero-interest payment {floor}")]
    PaymentBelowZeroRateFloor { payment: Money, floor: Money },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Breakdown cannot be generated: payment does not cover interest.")]
    ScheduleUnavailable,

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AmortizeError {
    /// True for failures raised by the validator rather than a solver.
    pub fn is_validation(&self) -> bool {
        matches!(self, AmortizeError::Validation(_))
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        AmortizeError::NumericOverflow {
            context: context.into(),
        }
    }

    pub(crate) fn date_out_of_range(date: NaiveDate) -> Self {
        AmortizeError::DateError(format!("no calendar month follows {date}"))
    }
}

impl From<serde_json::Error> for AmortizeError {
    fn from(e: serde_json::Error) -> Self {
        AmortizeError::SerializationError(e.to_string())
    }
}
