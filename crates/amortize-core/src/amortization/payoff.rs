//! Payoff simulator: month-by-month forward run of a fixed payment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::calendar::next_month;
use super::{accrue_interest, deduct_principal, monthly_rate, MAX_SIMULATION_MONTHS};
use crate::error::AmortizeError;
use crate::types::{Money, RatePercent};
use crate::AmortizeResult;

/// Month in which a fixed `monthly_payment` retires `balance`.
///
/// Simulates forward one calendar month at a time from the evaluation date,
/// rounding the balance to the cent after every payment. The returned date is
/// the first of the payoff month.
///
/// A payment that does not exceed the month's interest is reported as
/// [`AmortizeError::Unrepayable`], except in the first month: that month is always
/// simulated, so a payment equal to first-month interest takes one step before
/// it is detected.
pub fn simulate_payoff(
    balance: Money,
    monthly_payment: Money,
    annual_rate_percent: RatePercent,
    evaluation_date: NaiveDate,
) -> AmortizeResult<NaiveDate> {
    if balance <= Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "balance".into(),
            reason: "Balance must be positive to simulate a payoff".into(),
        });
    }
    if monthly_payment <= Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment must be positive".into(),
        });
    }

    let rate = monthly_rate(annual_rate_percent)?;
    let mut balance = balance;
    let mut current = evaluation_date;
    let mut months: u32 = 0;

    while balance > Decimal::ZERO && months < MAX_SIMULATION_MONTHS {
        let interest = accrue_interest(balance, rate)?;
        if months > 0 && monthly_payment <= interest {
            warn!(%monthly_payment, %interest, month = months + 1, "payment does not cover interest");
            return Err(AmortizeError::Unrepayable { month: months + 1 });
        }

        balance = deduct_principal(balance, monthly_payment - interest)?;
        current = next_month(current)?;
        months += 1;
    }

    if months < MAX_SIMULATION_MONTHS {
        debug!(months, payoff = %current, "simulated payoff");
        Ok(current)
    } else {
        warn!(%balance, "loan not repaid within simulation cap");
        Err(AmortizeError::IterationLimit {
            months: MAX_SIMULATION_MONTHS,
        })
    }
}
