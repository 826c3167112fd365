//! Input gate run before any solver.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ValidationError;
use crate::types::{Money, RatePercent};

/// Stand-in for an absent payment so that only an explicit payment can fail its check.
const PAYMENT_SENTINEL: Money = dec!(1_000_000);
/// Stand-in for an absent rate.
const RATE_SENTINEL: RatePercent = dec!(100);

/// Date format accepted for target dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check the raw inputs for one calculation.
///
/// Rules run in a fixed order and the first failure wins. Absent fields are the
/// unknown being solved for and are only checked when present.
pub fn validate(
    balance: Money,
    monthly_payment: Option<Money>,
    annual_rate_percent: Option<RatePercent>,
    target_date: Option<NaiveDate>,
    evaluation_date: NaiveDate,
) -> Option<ValidationError> {
    if balance <= Decimal::ZERO {
        return Some(ValidationError::NonPositiveBalance);
    }
    if monthly_payment.unwrap_or(PAYMENT_SENTINEL) <= Decimal::ZERO {
        return Some(ValidationError::NonPositivePayment);
    }
    if annual_rate_percent.unwrap_or(RATE_SENTINEL) <= Decimal::ZERO {
        return Some(ValidationError::NonPositiveRate);
    }
    if let Some(target) = target_date {
        if target <= evaluation_date {
            return Some(ValidationError::EndDateNotInFuture);
        }
    }
    None
}

/// Parse a `YYYY-MM-DD` target date.
///
/// Text that is not a real calendar date (including `2024-02-30`) is rejected.
pub fn parse_target_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidEndDateFormat)
}
