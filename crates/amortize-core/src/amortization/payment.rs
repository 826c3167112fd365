//! Payment solver: level annuity payment for a whole number of months.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use tracing::debug;

use super::calendar::months_between;
use super::{monthly_rate, round_currency};
use crate::error::AmortizeError;
use crate::types::{Money, RatePercent};
use crate::AmortizeResult;

/// Level monthly payment that fully amortizes `balance` by `target_date`.
///
/// Annuity formula `B * r / (1 - (1 + r)^-n)` over the whole months between the
/// evaluation date and the target date, or `B / n` when the rate is zero.
/// The result is rounded to the cent.
pub fn solve_payment(
    balance: Money,
    annual_rate_percent: RatePercent,
    target_date: NaiveDate,
    evaluation_date: NaiveDate,
) -> AmortizeResult<Money> {
    let months = months_between(evaluation_date, target_date);
    if months <= 0 {
        return Err(AmortizeError::NonPositiveHorizon { months });
    }

    let rate = monthly_rate(annual_rate_percent)?;
    let periods = Decimal::from(months);

    let payment = if rate.is_zero() {
        balance
            .checked_div(periods)
            .ok_or_else(|| AmortizeError::overflow("zero-rate payment"))?
    } else {
        // (1 + r)^-n as a power of a base below one, so long horizons shrink toward
        // zero instead of overflowing
        let discount = Decimal::ONE
            .checked_div(Decimal::ONE + rate)
            .and_then(|base| base.checked_powu(months as u64))
            .ok_or_else(|| AmortizeError::overflow("annuity discount factor"))?;
        let annuity_factor = Decimal::ONE - discount;
        balance
            .checked_mul(rate)
            .and_then(|interest| interest.checked_div(annuity_factor))
            .ok_or_else(|| AmortizeError::overflow("annuity payment"))?
    };

    let payment = round_currency(payment);
    debug!(%balance, %annual_rate_percent, months, %payment, "solved monthly payment");
    Ok(payment)
}
