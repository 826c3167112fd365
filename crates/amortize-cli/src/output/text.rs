use rust_decimal::Decimal;
use serde_json::Value;

use amortize_core::amortization::{AmortizationSchedule, CalculationMode, CalculationValue};
use amortize_core::AmortizeError;

const RULE_WIDTH: usize = 85;

/// Human-readable report in the calculator's own wording.
pub fn print_text(value: &Value) {
    let Some(result) = value.get("result") else {
        println!("{value}");
        return;
    };
    match serde_json::from_value::<CalculationValue>(result.clone()) {
        Ok(solved) => println!("{}", render(&solved)),
        Err(e) => eprintln!("Unrecognised result ({e}): {result}"),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings.iter().filter_map(Value::as_str) {
            println!("Warning: {w}");
        }
    }
}

pub fn render(value: &CalculationValue) -> String {
    match value {
        CalculationValue::MonthlyPayment(payment) => {
            format!("Required Monthly Payment: {}", format_currency(*payment))
        }
        CalculationValue::EndDate(date) => {
            format!("Calculated End Date: {}", date.format("%Y-%m-%d"))
        }
        CalculationValue::InterestRate(rate) => {
            format!("Estimated Interest Rate (APR): {rate:.4}%")
        }
        CalculationValue::InterestBreakdown(schedule) => render_schedule(schedule),
    }
}

fn render_schedule(schedule: &AmortizationSchedule) -> String {
    let mut lines = vec![
        "Date       | Payment ($) | Interest ($) | Principal ($) | Balance ($)".to_string(),
        "-".repeat(RULE_WIDTH),
    ];
    lines.extend(schedule.rows.iter().map(|row| {
        format!(
            "{} | {:>11.2} | {:>12.2} | {:>13.2} | {:>11.2}",
            row.date.format("%Y-%m-%d"),
            row.payment,
            row.interest,
            row.principal,
            row.remaining_balance,
        )
    }));
    lines.push(String::new());
    lines.push(format!(
        "Total Interest Paid: {}",
        format_currency(schedule.total_interest)
    ));
    lines.join("\n")
}

/// Message for a failed calculation, phrased for someone retrying with new inputs.
///
/// Validation reasons are shown verbatim; solver failures get a per-mode hint.
pub fn error_message(mode: CalculationMode, err: &(dyn std::error::Error + 'static)) -> String {
    let Some(core) = err.downcast_ref::<AmortizeError>() else {
        return format!("Input Error: {err}");
    };
    if core.is_validation() {
        return core.to_string();
    }
    match core {
        AmortizeError::MissingInput { .. } | AmortizeError::DateError(_) => {
            format!("Input Error: {core}")
        }
        AmortizeError::ScheduleUnavailable => core.to_string(),
        _ => match mode {
            CalculationMode::MonthlyPayment => "[Error] Payment could not be calculated. Check if dates are too close or payment is too low.".into(),
            CalculationMode::EndDate => "[Error] Unable to determine end date. The payment might not cover the interest.".into(),
            CalculationMode::InterestRate => "[Error] Could not determine interest rate. Try increasing the monthly payment or extending the end date.".into(),
            CalculationMode::InterestBreakdown => format!("[Error] {core}"),
        },
    }
}

/// `$1,234,567.89` style: two decimals, comma thousands separators.
pub fn format_currency(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs().round_dp(2));
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.round_dp(2).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}
