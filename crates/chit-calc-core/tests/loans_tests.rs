use chit_calc_core::loans::emi::{self, EmiInput};
use chit_calc_core::{CalcError, ToReport};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI known answers
// ===========================================================================

fn loan(principal: Decimal, rate: Decimal, months: u32) -> EmiInput {
    EmiInput {
        principal,
        annual_rate_pct: rate,
        tenure_months: months,
        include_schedule: false,
    }
}

#[test]
fn test_emi_five_lakh_two_years() {
    // r = 0.01, EMI ≈ 23536.74
    let result = emi::calculate_emi(&loan(dec!(500000), dec!(12), 24)).unwrap();
    let out = &result.result;

    assert_eq!(out.monthly_installment.round(), dec!(23537));
    assert_eq!(out.total_payable, out.monthly_installment * dec!(24));
    assert_eq!(out.total_interest.round(), dec!(64882));
}

#[test]
fn test_emi_home_loan_twenty_years() {
    // 50 lakh at 8.5% over 240 months ≈ 43391
    let out = emi::calculate_emi(&loan(dec!(5000000), dec!(8.5), 240))
        .unwrap()
        .result;
    assert!(
        (out.monthly_installment - dec!(43391)).abs() < dec!(1),
        "got {}",
        out.monthly_installment
    );
}

#[test]
fn test_emi_zero_rate_guard() {
    let result = emi::calculate_emi(&loan(dec!(120000), Decimal::ZERO, 12)).unwrap();
    assert_eq!(result.result.monthly_installment, dec!(10000));
    assert_eq!(result.result.total_interest, Decimal::ZERO);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_emi_rejects_missing_principal() {
    let err = emi::calculate_emi(&loan(Decimal::ZERO, dec!(12), 24)).unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "principal"));
}

#[test]
fn test_emi_report_rows_follow_schedule() {
    let mut input = loan(dec!(100000), dec!(10), 6);
    input.include_schedule = true;

    let report = emi::calculate_emi(&input).unwrap().to_report();
    let table = report.table.expect("schedule requested");
    assert_eq!(table.rows.len(), 6);
    assert_eq!(table.rows[5][5], "₹0");
    assert_eq!(report.results[1].value, "₹1,00,000");
}

#[test]
fn test_emi_json_input_defaults_schedule_off() {
    let json = r#"{ "principal": 500000, "annual_rate_pct": 12, "tenure_months": 24 }"#;
    let input: EmiInput = serde_json::from_str(json).unwrap();
    assert!(!input.include_schedule);
    assert_eq!(input.principal, dec!(500000));
}

// ===========================================================================
// Properties
// ===========================================================================

fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (1_000u64..=10_000_000u64).prop_map(Decimal::from)
}

/// Annual rate 0.00% to 30.00% in basis-point steps
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=3000i64).prop_map(|bp| Decimal::new(bp, 2))
}

proptest! {
    #[test]
    fn total_interest_never_negative(
        principal in principal_strategy(),
        rate in rate_strategy(),
        months in 1u32..=360,
    ) {
        let out = emi::calculate_emi(&loan(principal, rate, months)).unwrap().result;
        prop_assert!(out.total_interest >= Decimal::ZERO);
        prop_assert!(out.total_payable >= out.principal);
    }

    #[test]
    fn installment_at_least_straight_line(
        principal in principal_strategy(),
        rate in rate_strategy(),
        months in 1u32..=360,
    ) {
        let out = emi::calculate_emi(&loan(principal, rate, months)).unwrap().result;
        let straight_line = principal / Decimal::from(months);
        prop_assert!(out.monthly_installment >= straight_line - dec!(0.000001));
    }
}
