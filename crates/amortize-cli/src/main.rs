mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use amortize_core::amortization::CalculationMode;
use commands::loan::LoanArgs;

/// Fixed-rate loan amortization calculator
#[derive(Parser)]
#[command(
    name = "amortize",
    version,
    about = "Fixed-rate loan amortization calculator",
    long_about = "Solve a fixed-rate amortizing loan for whichever quantity is unknown: \
                  the monthly payment, the payoff date or the annual interest rate, or \
                  print the full month-by-month amortization schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly payment (needs --balance, --rate, --end-date)
    Payment(LoanArgs),
    /// Calculate the payoff date (needs --balance, --payment, --rate)
    EndDate(LoanArgs),
    /// Estimate the annual interest rate (needs --balance, --payment, --end-date)
    Rate(LoanArgs),
    /// Print the amortization schedule (needs --balance, --payment, --rate, --end-date)
    Schedule(LoanArgs),
    /// Print version information and supported calculation modes
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Text,
}

fn modes_line() -> String {
    let modes: Vec<String> = CalculationMode::ALL.iter().map(|m| m.to_string()).collect();
    format!("modes: {}", modes.join(", "))
}

fn main() {
    let cli = Cli::parse();

    let (mode, args) = match cli.command {
        Commands::Payment(args) => (CalculationMode::MonthlyPayment, args),
        Commands::EndDate(args) => (CalculationMode::EndDate, args),
        Commands::Rate(args) => (CalculationMode::InterestRate, args),
        Commands::Schedule(args) => (CalculationMode::InterestBreakdown, args),
        Commands::Version => {
            println!("amortize {}", env!("CARGO_PKG_VERSION"));
            println!("{}", modes_line());
            return;
        }
    };

    logging::init_logging(&cli.log_level);

    match commands::loan::run_calculation(mode, args) {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, %mode, "calculation failed");
            let message = match cli.output {
                OutputFormat::Text => output::text::error_message(mode, e.as_ref()),
                _ => e.to_string(),
            };
            eprintln!("{}: {}", "error".red().bold(), message);
            process::exit(1);
        }
    }
}
