//! Mode dispatch: validate the inputs a mode needs, then run exactly one solver.

use std::fmt;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::calendar::same_month;
use super::schedule::AmortizationSchedule;
use super::{generate_schedule, simulate_payoff, solve_payment, solve_rate, validate};
use crate::error::AmortizeError;
use crate::types::{with_metadata, ComputationOutput, Money, RatePercent};
use crate::AmortizeResult;

/// Which quantity to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Level payment from balance, rate and target date.
    MonthlyPayment,
    /// Payoff month from balance, payment and rate.
    EndDate,
    /// Annual rate from balance, payment and target date.
    InterestRate,
    /// Full amortization table from balance, payment and rate.
    InterestBreakdown,
}

impl CalculationMode {
    /// Every mode, in menu order.
    pub const ALL: [CalculationMode; 4] = [
        CalculationMode::MonthlyPayment,
        CalculationMode::EndDate,
        CalculationMode::InterestRate,
        CalculationMode::InterestBreakdown,
    ];

    /// Input field this mode solves for, if any.
    pub fn unknown_field(self) -> Option<&'static str> {
        match self {
            CalculationMode::MonthlyPayment => Some("monthly_payment"),
            CalculationMode::EndDate => Some("target_date"),
            CalculationMode::InterestRate => Some("annual_rate_percent"),
            CalculationMode::InterestBreakdown => None,
        }
    }

    fn methodology(self) -> &'static str {
        match self {
            CalculationMode::MonthlyPayment => "Annuity formula over whole calendar months",
            CalculationMode::EndDate => {
                "Forward monthly simulation with cent-rounded balances (max 1200 months)"
            }
            CalculationMode::InterestRate => {
                "Bisection over the annuity payment, 0.0001%-100%, 300 iterations"
            }
            CalculationMode::InterestBreakdown => {
                "Monthly amortization table through the simulated payoff month"
            }
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CalculationMode::MonthlyPayment => "Monthly Payment",
            CalculationMode::EndDate => "End Date",
            CalculationMode::InterestRate => "Interest Rate",
            CalculationMode::InterestBreakdown => "Interest Breakdown",
        };
        f.write_str(label)
    }
}

/// Known quantities of a loan. The field matching the mode's unknown is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
    /// Annual rate as a percentage (5.0 = 5%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<RatePercent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

/// Solved value, tagged by the mode that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum CalculationValue {
    MonthlyPayment(Money),
    EndDate(NaiveDate),
    InterestRate(RatePercent),
    InterestBreakdown(AmortizationSchedule),
}

#[derive(Serialize)]
struct Assumptions<'a> {
    mode: CalculationMode,
    inputs: &'a LoanInputs,
    evaluation_date: NaiveDate,
}

/// Solve for the unknown of `mode` as of `evaluation_date`.
///
/// Missing required inputs fail with [`AmortizeError::MissingInput`], bad inputs
/// with [`AmortizeError::Validation`], and solver failures pass through.
pub fn calculate(
    mode: CalculationMode,
    inputs: &LoanInputs,
    evaluation_date: NaiveDate,
) -> AmortizeResult<ComputationOutput<CalculationValue>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if let Some(unknown) = mode.unknown_field() {
        if supplied(inputs, unknown) {
            warnings.push(format!(
                "{unknown} was supplied but is solved for in {mode} mode; the supplied value was ignored"
            ));
        }
    }

    let balance = inputs.balance;
    let value = match mode {
        CalculationMode::MonthlyPayment => {
            let rate = require(mode, "annual_rate_percent", inputs.annual_rate_percent)?;
            let target = require(mode, "target_date", inputs.target_date)?;
            check(validate(balance, None, Some(rate), Some(target), evaluation_date))?;
            CalculationValue::MonthlyPayment(solve_payment(balance, rate, target, evaluation_date)?)
        }
        CalculationMode::EndDate => {
            let payment = require(mode, "monthly_payment", inputs.monthly_payment)?;
            let rate = require(mode, "annual_rate_percent", inputs.annual_rate_percent)?;
            check(validate(balance, Some(payment), Some(rate), None, evaluation_date))?;
            CalculationValue::EndDate(simulate_payoff(balance, payment, rate, evaluation_date)?)
        }
        CalculationMode::InterestRate => {
            let payment = require(mode, "monthly_payment", inputs.monthly_payment)?;
            let target = require(mode, "target_date", inputs.target_date)?;
            check(validate(balance, Some(payment), None, Some(target), evaluation_date))?;
            CalculationValue::InterestRate(solve_rate(balance, payment, target, evaluation_date)?)
        }
        CalculationMode::InterestBreakdown => {
            let payment = require(mode, "monthly_payment", inputs.monthly_payment)?;
            let rate = require(mode, "annual_rate_percent", inputs.annual_rate_percent)?;
            let target = require(mode, "target_date", inputs.target_date)?;
            check(validate(balance, Some(payment), Some(rate), Some(target), evaluation_date))?;
            let schedule = generate_schedule(balance, payment, rate, evaluation_date)?;
            if let Some(last) = schedule.rows.last() {
                if !same_month(last.date, target) {
                    warnings.push(format!(
                        "Final payment falls in {} rather than the requested end date {}",
                        last.date.format("%Y-%m"),
                        target.format("%Y-%m"),
                    ));
                }
            }
            CalculationValue::InterestBreakdown(schedule)
        }
    };

    info!(%mode, "calculation complete");
    let assumptions = Assumptions {
        mode,
        inputs,
        evaluation_date,
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        mode.methodology(),
        &assumptions,
        warnings,
        elapsed,
        value,
    ))
}

fn supplied(inputs: &LoanInputs, field: &str) -> bool {
    match field {
        "monthly_payment" => inputs.monthly_payment.is_some(),
        "annual_rate_percent" => inputs.annual_rate_percent.is_some(),
        "target_date" => inputs.target_date.is_some(),
        _ => false,
    }
}

fn require<T>(mode: CalculationMode, field: &str, value: Option<T>) -> AmortizeResult<T> {
    value.ok_or_else(|| AmortizeError::MissingInput {
        mode: mode.to_string(),
        field: field.to_string(),
    })
}

fn check(failure: Option<crate::error::ValidationError>) -> AmortizeResult<()> {
    match failure {
        Some(reason) => {
            debug!(%reason, "validation failed");
            Err(reason.into())
        }
        None => Ok(()),
    }
}
