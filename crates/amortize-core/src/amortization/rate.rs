//! Rate solver: bisection over the payment solver.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace, warn};

use super::calendar::months_between;
use super::payment::solve_payment;
use crate::error::AmortizeError;
use crate::types::{Money, RatePercent};
use crate::AmortizeResult;

const SEARCH_LOW: RatePercent = dec!(0.0001);
const SEARCH_HIGH: RatePercent = dec!(100.0);
const MAX_BISECTION_ITERATIONS: u32 = 300;
/// Solved payment must land within this distance of the target payment.
const PAYMENT_TOLERANCE: Money = dec!(0.01);
const RATE_DP: u32 = 4;

/// Annual percentage rate at which `monthly_payment` retires `balance` by `target_date`.
///
/// Bisects over `[0.0001, 100]` percent using [`solve_payment`], which is
/// strictly increasing in the rate. Returns the first midpoint whose payment is
/// within a cent of `monthly_payment`, rounded to four decimal places.
pub fn solve_rate(
    balance: Money,
    monthly_payment: Money,
    target_date: NaiveDate,
    evaluation_date: NaiveDate,
) -> AmortizeResult<RatePercent> {
    let months = months_between(evaluation_date, target_date);
    if months <= 0 {
        return Err(AmortizeError::NonPositiveHorizon { months });
    }
    if monthly_payment <= Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment must be positive".into(),
        });
    }

    // At 0% the payment is B / n; anything at or below that implies no interest at all.
    let zero_rate_payment = balance / Decimal::from(months);
    if monthly_payment <= zero_rate_payment {
        return Err(AmortizeError::PaymentBelowZeroRateFloor {
            payment: monthly_payment,
            floor: zero_rate_payment.round_dp(2),
        });
    }

    let mut low = SEARCH_LOW;
    let mut high = SEARCH_HIGH;
    let mut last_delta = Decimal::ZERO;

    for iteration in 0..MAX_BISECTION_ITERATIONS {
        let mid = (low + high) / dec!(2);
        let estimated = solve_payment(balance, mid, target_date, evaluation_date)?;
        let delta = estimated - monthly_payment;

        if delta.abs() < PAYMENT_TOLERANCE {
            let rate = mid.round_dp(RATE_DP);
            debug!(iteration, %rate, "rate bisection converged");
            return Ok(rate);
        }

        if delta > Decimal::ZERO {
            high = mid;
        } else {
            low = mid;
        }
        last_delta = delta;
        trace!(iteration, %mid, %delta, "rate bisection step");
    }

    warn!(%monthly_payment, %last_delta, "rate bisection exhausted its budget");
    Err(AmortizeError::ConvergenceFailure {
        function: "rate bisection".into(),
        iterations: MAX_BISECTION_ITERATIONS,
        last_delta,
    })
}
