//! Schedule generator: per-month interest and principal through payoff.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calendar::{next_month, same_month};
use super::payoff::simulate_payoff;
use super::{accrue_interest, deduct_principal, monthly_rate, round_currency};
use crate::error::AmortizeError;
use crate::types::{Money, RatePercent};
use crate::AmortizeResult;

/// One month of the amortization table. Amounts are rounded to the cent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub date: NaiveDate,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    /// Sum of the recorded interest portions.
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
    pub number_of_payments: u32,
    /// Payoff month found by the forward simulation.
    pub payoff_date: NaiveDate,
}

/// Month-by-month amortization table for a fixed payment.
///
/// The payoff month is located with [`simulate_payoff`] first; a loan that
/// cannot be repaid fails with [`AmortizeError::ScheduleUnavailable`]. Rows then
/// run from the month after the evaluation date through that payoff month. The
/// payoff month, or any month whose balance is already below the payment, pays
/// off the full remaining balance plus its interest.
pub fn generate_schedule(
    balance: Money,
    monthly_payment: Money,
    annual_rate_percent: RatePercent,
    evaluation_date: NaiveDate,
) -> AmortizeResult<AmortizationSchedule> {
    let payoff_date =
        match simulate_payoff(balance, monthly_payment, annual_rate_percent, evaluation_date) {
            Ok(date) => date,
            Err(AmortizeError::Unrepayable { .. }) | Err(AmortizeError::IterationLimit { .. }) => {
                return Err(AmortizeError::ScheduleUnavailable)
            }
            Err(e) => return Err(e),
        };

    let rate = monthly_rate(annual_rate_percent)?;
    let mut balance = balance;
    let mut current = next_month(evaluation_date)?;
    let mut rows: Vec<AmortizationRow> = Vec::new();
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;

    while balance > Decimal::ZERO && current <= payoff_date {
        let interest = accrue_interest(balance, rate)?;

        let (principal, payment) = if same_month(current, payoff_date) || balance < monthly_payment {
            let principal = balance;
            balance = Decimal::ZERO;
            (principal, principal + interest)
        } else {
            let principal = monthly_payment - interest;
            balance = deduct_principal(balance, principal)?;
            (principal, monthly_payment)
        };

        let row = AmortizationRow {
            date: current,
            payment: round_currency(payment),
            interest: round_currency(interest),
            principal: round_currency(principal),
            remaining_balance: balance,
        };
        total_interest += row.interest;
        total_principal += row.principal;
        total_paid += row.payment;
        rows.push(row);

        if balance.is_zero() {
            break;
        }
        current = next_month(current)?;
    }

    debug!(rows = rows.len(), payoff = %payoff_date, "generated amortization schedule");

    Ok(AmortizationSchedule {
        number_of_payments: rows.len() as u32,
        rows,
        total_interest: round_currency(total_interest),
        total_principal: round_currency(total_principal),
        total_paid: round_currency(total_paid),
        payoff_date,
    })
}
