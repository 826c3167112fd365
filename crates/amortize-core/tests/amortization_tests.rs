use amortize_core::amortization::{
    self, calculate, generate_schedule, months_between, simulate_payoff, solve_payment,
    solve_rate, validate, CalculationMode, CalculationValue, LoanInputs,
};
use amortize_core::{AmortizeError, ValidationError};
use chrono::{Months, NaiveDate};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 18).unwrap()
}

fn months_out(n: u32) -> NaiveDate {
    evaluation_date().checked_add_months(Months::new(n)).unwrap()
}

/// (balance, annual rate %, months) for representative non-degenerate loans
fn representative_loans() -> Vec<(Decimal, Decimal, u32)> {
    vec![
        (dec!(250_000), dec!(6.5), 360),
        (dec!(400_000), dec!(4.25), 180),
        (dec!(35_000), dec!(8.9), 60),
        (dec!(24_000), dec!(6), 24),
        (dec!(1_500), dec!(19.99), 12),
    ]
}

// ===========================================================================
// Payment / payoff consistency
// ===========================================================================

#[test]
fn test_solved_payment_pays_off_by_target_month() {
    for (balance, rate, months) in representative_loans() {
        let target = months_out(months);
        let payment = solve_payment(balance, rate, target, evaluation_date()).unwrap();
        let payoff = simulate_payoff(balance, payment, rate, evaluation_date()).unwrap();
        let drift = months_between(target, payoff);
        assert!(
            (0..=1).contains(&drift),
            "{balance} at {rate}% over {months}: payoff {payoff} vs target {target}"
        );
    }
}

#[test]
fn test_twenty_four_month_car_loan() {
    let target = months_out(24);
    let payment = solve_payment(dec!(24000), dec!(6), target, evaluation_date()).unwrap();
    assert_eq!(payment, dec!(1063.69));

    // The cent-rounded payment is slightly short, so the simulator needs at most
    // one extra month while the schedule folds the residue into month 24.
    let payoff = simulate_payoff(dec!(24000), payment, dec!(6), evaluation_date()).unwrap();
    assert!((24..=25).contains(&months_between(evaluation_date(), payoff)));

    let schedule = generate_schedule(dec!(24000), payment, dec!(6), evaluation_date()).unwrap();
    assert_eq!(schedule.number_of_payments, 24);
    assert_eq!(schedule.rows.last().unwrap().date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    assert_eq!(schedule.rows.last().unwrap().remaining_balance, Decimal::ZERO);
}

// ===========================================================================
// Rate solver
// ===========================================================================

#[test]
fn test_rate_round_trip() {
    for (balance, rate, months) in [
        (dec!(250_000), dec!(6.5), 360),
        (dec!(400_000), dec!(4.25), 180),
        (dec!(35_000), dec!(8.9), 60),
    ] {
        let target = months_out(months);
        let payment = solve_payment(balance, rate, target, evaluation_date()).unwrap();
        let solved = solve_rate(balance, payment, target, evaluation_date()).unwrap();
        assert!(
            (solved - rate).abs() <= dec!(0.0005),
            "{balance} over {months}: solved {solved}, expected {rate}"
        );
    }
}

#[test]
fn test_rate_solver_passes_payment_failure_through() {
    // Near Decimal::MAX the first midpoint's payment overflows; the bisection
    // must surface that failure instead of steering around it.
    let balance = Decimal::from_i128_with_scale(78 * 10_i128.pow(27), 0);
    let target = months_out(1);
    let first_midpoint = (dec!(0.0001) + dec!(100)) / dec!(2);

    let direct = solve_payment(balance, first_midpoint, target, evaluation_date()).unwrap_err();
    let solved = solve_rate(balance, Decimal::MAX, target, evaluation_date()).unwrap_err();

    assert!(matches!(solved, AmortizeError::NumericOverflow { .. }), "{solved:?}");
    assert_eq!(solved.to_string(), direct.to_string());
}

#[test]
fn test_long_horizon_payment_and_rate() {
    let payment = solve_payment(dec!(100000), dec!(70), months_out(1200), evaluation_date()).unwrap();
    assert_eq!(payment, dec!(5833.33));

    let rate = solve_rate(dec!(100000), dec!(500), months_out(1700), evaluation_date()).unwrap();
    assert!((rate - dec!(6)).abs() < dec!(0.01), "{rate}");
}

#[test]
fn test_payment_monotonic_in_rate() {
    let target = months_out(120);
    let payments: Vec<Decimal> = [dec!(0.0001), dec!(2), dec!(5), dec!(10), dec!(25), dec!(50), dec!(100)]
        .iter()
        .map(|r| solve_payment(dec!(80000), *r, target, evaluation_date()).unwrap())
        .collect();
    assert!(payments.windows(2).all(|w| w[0] < w[1]), "{payments:?}");
}

// ===========================================================================
// Degenerate inputs
// ===========================================================================

#[test]
fn test_zero_rate_payment() {
    let p = solve_payment(dec!(1200), dec!(0), months_out(12), evaluation_date()).unwrap();
    assert_eq!(p, dec!(100.00));
}

#[test]
fn test_unrepayable_payment() {
    let result = simulate_payoff(dec!(10000), dec!(10), dec!(12), evaluation_date());
    assert!(matches!(result, Err(AmortizeError::Unrepayable { .. })));
}

#[test]
fn test_target_in_evaluation_month_is_non_positive_horizon() {
    let same_month = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
    assert_eq!(months_between(evaluation_date(), same_month), 0);

    let payment = solve_payment(dec!(5000), dec!(5), same_month, evaluation_date());
    assert!(matches!(payment, Err(AmortizeError::NonPositiveHorizon { months: 0 })));

    let rate = solve_rate(dec!(5000), dec!(500), same_month, evaluation_date());
    assert!(matches!(rate, Err(AmortizeError::NonPositiveHorizon { months: 0 })));
}

// ===========================================================================
// Schedule
// ===========================================================================

#[test]
fn test_schedule_principal_sums_to_balance() {
    for (balance, rate, months) in representative_loans() {
        let payment = solve_payment(balance, rate, months_out(months), evaluation_date()).unwrap();
        let schedule = generate_schedule(balance, payment, rate, evaluation_date()).unwrap();

        let principal: Decimal = schedule.rows.iter().map(|r| r.principal).sum();
        assert!(
            (principal - balance).abs() <= dec!(0.05),
            "{balance}: principal sums to {principal}"
        );
        assert_eq!(schedule.total_principal, principal);
        assert_eq!(schedule.rows.last().unwrap().remaining_balance, Decimal::ZERO);

        let interest: Decimal = schedule.rows.iter().map(|r| r.interest).sum();
        assert_eq!(schedule.total_interest, interest);
        let split = schedule.total_principal + schedule.total_interest;
        assert!((schedule.total_paid - split).abs() <= dec!(0.05));
    }
}

#[test]
fn test_schedule_starts_month_after_evaluation() {
    let schedule = generate_schedule(dec!(3000), dec!(500), dec!(5), evaluation_date()).unwrap();
    let dates: Vec<NaiveDate> = schedule.rows.iter().map(|r| r.date).collect();
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
    assert!(dates.windows(2).all(|w| months_between(w[0], w[1]) == 1));
}

#[test]
fn test_schedule_rows_do_not_repeat_zero_balance() {
    let schedule = generate_schedule(dec!(1000), dec!(250), dec!(0), evaluation_date()).unwrap();
    let zero_rows = schedule
        .rows
        .iter()
        .filter(|r| r.remaining_balance.is_zero())
        .count();
    assert_eq!(zero_rows, 1);
}

#[test]
fn test_schedule_for_unrepayable_loan() {
    let result = generate_schedule(dec!(10000), dec!(10), dec!(12), evaluation_date());
    assert!(matches!(result, Err(AmortizeError::ScheduleUnavailable)));
}

// ===========================================================================
// Validator
// ===========================================================================

#[test]
fn test_validation_is_pure() {
    let cases = [
        (dec!(0), Some(dec!(100)), Some(dec!(5)), None),
        (dec!(1000), Some(dec!(-1)), Some(dec!(5)), None),
        (dec!(1000), Some(dec!(100)), Some(dec!(0)), None),
        (dec!(1000), Some(dec!(100)), Some(dec!(5)), Some(evaluation_date())),
        (dec!(1000), Some(dec!(100)), Some(dec!(5)), Some(months_out(1))),
    ];
    let expected = [
        Some(ValidationError::NonPositiveBalance),
        Some(ValidationError::NonPositivePayment),
        Some(ValidationError::NonPositiveRate),
        Some(ValidationError::EndDateNotInFuture),
        None,
    ];
    for ((balance, payment, rate, target), want) in cases.into_iter().zip(expected) {
        let first = validate(balance, payment, rate, target, evaluation_date());
        let second = validate(balance, payment, rate, target, evaluation_date());
        assert_eq!(first, want);
        assert_eq!(first, second);
    }
}

// ===========================================================================
// Calculator
// ===========================================================================

#[test]
fn test_every_mode_round_trips_through_json() {
    let inputs = LoanInputs {
        balance: dec!(18000),
        monthly_payment: Some(dec!(550)),
        annual_rate_percent: Some(dec!(7.5)),
        target_date: Some(months_out(36)),
    };
    for mode in CalculationMode::ALL {
        let output = calculate(mode, &inputs, evaluation_date()).unwrap();
        let json = serde_json::to_value(&output.result).unwrap();
        let back: CalculationValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, output.result);
    }
}

#[test]
fn test_calculated_payment_value_json_shape() {
    let inputs = LoanInputs {
        balance: dec!(1200),
        monthly_payment: None,
        annual_rate_percent: Some(dec!(12)),
        target_date: Some(months_out(1)),
    };
    let output = calculate(CalculationMode::MonthlyPayment, &inputs, evaluation_date()).unwrap();
    let json = serde_json::to_value(&output.result).unwrap();
    assert_eq!(json["mode"], "monthly_payment");
    assert_eq!(json["value"], "1212.00");
}

#[test]
fn test_inputs_deserialize_with_missing_unknown() {
    let json = r#"{"balance": "5000", "annual_rate_percent": "4.5", "target_date": "2026-01-01"}"#;
    let inputs: LoanInputs = serde_json::from_str(json).unwrap();
    assert_eq!(inputs.monthly_payment, None);
    assert_eq!(inputs.annual_rate_percent, Some(dec!(4.5)));

    let output = calculate(CalculationMode::MonthlyPayment, &inputs, evaluation_date()).unwrap();
    assert!(matches!(output.result, CalculationValue::MonthlyPayment(_)));
}

#[test]
fn test_monthly_rate_conversion() {
    assert_eq!(amortization::monthly_rate(dec!(6)).unwrap(), dec!(0.005));
}
