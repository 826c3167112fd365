//! Fixed-rate amortizing loan engine.
//!
//! Four solvers share one month-stepping primitive: the annuity [`payment`]
//! formula, the forward [`payoff`] simulator, the bisection [`rate`] solver and
//! the [`schedule`] generator. [`calculator`] dispatches on an explicit
//! [`CalculationMode`] after running the [`validation`] gate.
//!
//! Every operation takes the evaluation date as a parameter; nothing here reads
//! the system clock. Month counts ignore the day of month and all produced dates
//! are the first of a month.

pub mod calculator;
pub mod calendar;
pub mod payment;
pub mod payoff;
pub mod rate;
pub mod schedule;
pub mod validation;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AmortizeError;
use crate::types::{Money, Rate, RatePercent};
use crate::AmortizeResult;

pub use calculator::{calculate, CalculationMode, CalculationValue, LoanInputs};
pub use calendar::{months_between, next_month};
pub use payment::solve_payment;
pub use payoff::simulate_payoff;
pub use rate::solve_rate;
pub use schedule::{generate_schedule, AmortizationRow, AmortizationSchedule};
pub use validation::{parse_target_date, validate};

/// Hard cap on simulated months (100 years).
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

/// Currency amounts are recorded to the cent.
const CURRENCY_DP: u32 = 2;

/// Convert an annual percentage (5.0 = 5%) to the fractional monthly rate.
pub fn monthly_rate(annual_rate_percent: RatePercent) -> AmortizeResult<Rate> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(annual_rate_percent / dec!(100) / dec!(12))
}

/// Interest accrued on `balance` over one month. Not rounded.
pub(crate) fn accrue_interest(balance: Money, monthly_rate: Rate) -> AmortizeResult<Money> {
    balance
        .checked_mul(monthly_rate)
        .ok_or_else(|| AmortizeError::overflow("monthly interest accrual"))
}

/// Apply `principal` to `balance`, rounding to the cent and clamping at zero.
///
/// Both the payoff simulator and the schedule generator step through this, so
/// they drift identically and agree on the payoff month.
pub(crate) fn deduct_principal(balance: Money, principal: Money) -> AmortizeResult<Money> {
    let remaining = balance
        .checked_sub(principal)
        .ok_or_else(|| AmortizeError::overflow("balance reduction"))?;
    Ok(round_currency(remaining).max(Decimal::ZERO))
}

pub(crate) fn round_currency(amount: Money) -> Money {
    amount.round_dp(CURRENCY_DP)
}
