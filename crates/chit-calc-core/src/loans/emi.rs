//! Equated Monthly Installment (EMI) for a standard amortizing loan.
//!
//! Uses the nominal monthly rate `R / 12 / 100` and the level-payment
//! formula `P × r × (1+r)^N / ((1+r)^N − 1)`. A zero rate falls back to
//! straight-line repayment `P / N`. Optionally produces a month-by-month
//! amortization schedule using the effective interest method.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{level_payment, nominal_monthly_rate, safe_add, safe_mul};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

const MAX_ANNUAL_RATE_PCT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Loan amount
    pub principal: Money,
    /// Annual interest rate in percent (12.5 = 12.5% p.a.)
    pub annual_rate_pct: Percent,
    /// Loan tenure in months
    pub tenure_months: u32,
    /// Produce the month-by-month amortization schedule
    #[serde(default)]
    pub include_schedule: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_months: u32,
    /// Nominal monthly rate used in the formula
    pub monthly_rate: Rate,
    pub monthly_installment: Money,
    pub total_interest: Money,
    pub total_payable: Money,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amortization_schedule: Vec<EmiScheduleRow>,
}

/// A single month of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiScheduleRow {
    /// Month number (1-indexed)
    pub month: u32,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn calculate_emi(input: &EmiInput) -> CalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let monthly_rate = nominal_monthly_rate(input.annual_rate_pct);
    let tenure = Decimal::from(input.tenure_months);

    let (monthly_installment, total_payable) =
        match level_payment(monthly_rate, input.tenure_months, input.principal)? {
            Some(emi) => (emi, safe_mul(emi, tenure, "EMI total payable")?),
            None => {
                warn!(
                    "EMI annuity factor is zero at {}% p.a.; using straight-line repayment",
                    input.annual_rate_pct
                );
                warnings.push(
                    "Interest rate is zero; installment is principal divided by tenure.".into(),
                );
                // Straight-line repays exactly the principal; P/N × N may lose a unit in the last place
                (input.principal / tenure, input.principal)
            }
        };
    let total_interest = total_payable - input.principal;

    let amortization_schedule = if input.include_schedule {
        build_schedule(input.principal, monthly_rate, input.tenure_months, monthly_installment)?
    } else {
        Vec::new()
    };

    debug!(
        "emi: principal={} rate={}% tenure={} -> installment={}",
        input.principal, input.annual_rate_pct, input.tenure_months, monthly_installment
    );

    let output = EmiOutput {
        principal: input.principal,
        annual_rate_pct: input.annual_rate_pct,
        tenure_months: input.tenure_months,
        monthly_rate,
        monthly_installment,
        total_interest,
        total_payable,
        amortization_schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment EMI: P × r × (1+r)^N / ((1+r)^N − 1), r = R/12/100",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &EmiInput) -> CalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(CalcError::invalid("principal", "Loan amount must be positive"));
    }
    if input.tenure_months == 0 {
        return Err(CalcError::invalid(
            "tenure_months",
            "Tenure must be greater than zero",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(CalcError::invalid(
            "annual_rate_pct",
            "Interest rate cannot be negative",
        ));
    }
    if input.annual_rate_pct > MAX_ANNUAL_RATE_PCT {
        return Err(CalcError::invalid(
            "annual_rate_pct",
            "Interest rate cannot exceed 100% per annum",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    tenure_months: u32,
    installment: Money,
) -> CalcResult<Vec<EmiScheduleRow>> {
    let mut schedule = Vec::with_capacity(tenure_months as usize);
    let mut balance = principal;

    for month in 1..=tenure_months {
        let interest = balance * monthly_rate;
        // Last month clears whatever residue the level payment leaves behind
        let (principal_part, payment) = if month == tenure_months {
            (balance, safe_add(balance, interest, "final installment")?)
        } else {
            (installment - interest, installment)
        };
        let closing = balance - principal_part;

        schedule.push(EmiScheduleRow {
            month,
            opening_balance: balance,
            installment: payment,
            interest,
            principal: principal_part,
            closing_balance: closing,
        });
        balance = closing;
    }

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_loan() -> EmiInput {
        EmiInput {
            principal: dec!(500000),
            annual_rate_pct: dec!(12),
            tenure_months: 24,
            include_schedule: false,
        }
    }

    #[test]
    fn test_standard_loan_installment() {
        let result = calculate_emi(&standard_loan()).unwrap();
        let out = &result.result;

        assert_eq!(out.monthly_rate, dec!(0.01));
        assert!(
            (out.monthly_installment - dec!(23537)).abs() < dec!(1),
            "EMI should be ≈ 23537, got {}",
            out.monthly_installment
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_totals_are_consistent() {
        let result = calculate_emi(&standard_loan()).unwrap();
        let out = &result.result;

        assert_eq!(out.total_payable, out.monthly_installment * dec!(24));
        assert_eq!(out.total_interest, out.total_payable - out.principal);
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_falls_back_to_straight_line() {
        let mut input = standard_loan();
        input.annual_rate_pct = Decimal::ZERO;

        let result = calculate_emi(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.monthly_installment, dec!(500000) / dec!(24));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("zero")));
    }

    #[test]
    fn test_tiny_rate_approaches_straight_line() {
        let mut input = standard_loan();
        input.annual_rate_pct = dec!(0.0001);

        let out = calculate_emi(&input).unwrap().result;
        let straight_line = dec!(500000) / dec!(24);
        assert!((out.monthly_installment - straight_line).abs() < dec!(1));
    }

    #[test]
    fn test_schedule_amortizes_fully() {
        let mut input = standard_loan();
        input.include_schedule = true;

        let out = calculate_emi(&input).unwrap().result;
        let schedule = &out.amortization_schedule;

        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule[0].opening_balance, dec!(500000));
        assert_eq!(schedule[0].interest, dec!(5000));
        assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);

        let principal_sum: Money = schedule.iter().map(|r| r.principal).sum();
        assert!((principal_sum - dec!(500000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_omitted_by_default() {
        let out = calculate_emi(&standard_loan()).unwrap().result;
        assert!(out.amortization_schedule.is_empty());
    }

    #[test]
    fn test_invalid_zero_principal() {
        let mut input = standard_loan();
        input.principal = Decimal::ZERO;

        match calculate_emi(&input).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_zero_tenure() {
        let mut input = standard_loan();
        input.tenure_months = 0;

        match calculate_emi(&input).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "tenure_months"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_negative_rate() {
        let mut input = standard_loan();
        input.annual_rate_pct = dec!(-1);

        match calculate_emi(&input).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate_pct"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_total_payable_overflow_is_error() {
        let input = EmiInput {
            principal: dec!(70000000000000000000000000000),
            annual_rate_pct: dec!(12),
            tenure_months: 360,
            include_schedule: false,
        };

        match calculate_emi(&input).unwrap_err() {
            CalcError::Overflow { context } => assert_eq!(context, "EMI total payable"),
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_single_month_tenure() {
        let mut input = standard_loan();
        input.tenure_months = 1;

        let out = calculate_emi(&input).unwrap().result;
        // One month at 1%: repay principal plus one month of interest
        assert!((out.monthly_installment - dec!(505000)).abs() < dec!(0.0001));
    }
}
