use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amortize_core::amortization::validation::DATE_FORMAT;
use amortize_core::amortization::{self, parse_target_date, CalculationMode, LoanInputs};
use amortize_core::AmortizeError;

use crate::input;

/// Loan quantities shared by every calculation. Leave out the one being solved for.
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding loan balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Annual interest rate as a percentage (5 = 5%)
    #[arg(long, alias = "apr")]
    pub rate: Option<Decimal>,

    /// Target end date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Evaluation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run_calculation(
    mode: CalculationMode,
    args: LoanArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let evaluation_date = match args.as_of {
        Some(ref text) => parse_evaluation_date(text)?,
        None => Local::now().date_naive(),
    };

    let loan_inputs: LoanInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        inputs_from_flags(&args)?
    };

    tracing::debug!(%mode, %evaluation_date, ?loan_inputs, "running calculation");
    let result = amortization::calculate(mode, &loan_inputs, evaluation_date)?;
    Ok(serde_json::to_value(result)?)
}

fn inputs_from_flags(args: &LoanArgs) -> Result<LoanInputs, Box<dyn std::error::Error>> {
    let target_date = args
        .end_date
        .as_deref()
        .map(parse_target_date)
        .transpose()
        .map_err(AmortizeError::from)?;

    Ok(LoanInputs {
        balance: args
            .balance
            .ok_or("--balance is required (or provide --input)")?,
        monthly_payment: args.payment,
        annual_rate_percent: args.rate,
        target_date,
    })
}

fn parse_evaluation_date(text: &str) -> Result<NaiveDate, AmortizeError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| AmortizeError::DateError(format!("--as-of '{text}': {e}")))
}
