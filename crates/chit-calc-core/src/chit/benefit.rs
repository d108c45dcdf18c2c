//! Member benefit summary for a chit auctioned at a flat discount.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{commission_amount, validate_chit_amount, validate_commission};
use crate::error::CalcError;
use crate::time_value::{safe_mul, safe_sub};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChitBenefitInput {
    pub chit_amount: Money,
    pub number_of_months: u32,
    /// Auction discount in percent of the chit value
    pub auction_pct: Percent,
    pub commission_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChitBenefitOutput {
    pub chit_amount: Money,
    pub number_of_months: u32,
    pub auction_pct: Percent,
    pub commission_pct: Percent,
    pub monthly_contribution: Money,
    pub auction_discount: Money,
    pub commission_amount: Money,
    /// Discount left for members after the organizer's commission
    pub net_discount: Money,
    pub benefit_per_member: Money,
    pub monthly_payable: Money,
}

pub fn calculate_chit_benefit(
    input: &ChitBenefitInput,
) -> CalcResult<ComputationOutput<ChitBenefitOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_chit_amount(input.chit_amount)?;
    validate_commission(input.commission_pct)?;
    if input.number_of_months == 0 {
        return Err(CalcError::invalid(
            "number_of_months",
            "Number of months must be greater than zero",
        ));
    }
    if input.auction_pct <= Decimal::ZERO {
        return Err(CalcError::invalid(
            "auction_pct",
            "Auction percentage must be positive",
        ));
    }

    let chit = input.chit_amount;
    let months = Decimal::from(input.number_of_months);

    let monthly_contribution = chit / months;
    let auction_discount =
        safe_mul(chit, input.auction_pct, "auction discount")? / Decimal::ONE_HUNDRED;
    let commission = commission_amount(chit, input.commission_pct)?;
    let net_discount = auction_discount - commission;
    let benefit_per_member = net_discount / months;
    let monthly_payable = safe_sub(monthly_contribution, benefit_per_member, "monthly payable")?;

    if net_discount < Decimal::ZERO {
        warnings.push(
            "Commission exceeds the auction discount; members pay more than the base contribution."
                .into(),
        );
    }

    debug!(
        "chit benefit: chit={} months={} auction={}% -> payable={}",
        chit, input.number_of_months, input.auction_pct, monthly_payable
    );

    let output = ChitBenefitOutput {
        chit_amount: chit,
        number_of_months: input.number_of_months,
        auction_pct: input.auction_pct,
        commission_pct: input.commission_pct,
        monthly_contribution,
        auction_discount,
        commission_amount: commission,
        net_discount,
        benefit_per_member,
        monthly_payable,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat auction discount shared equally after commission",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> ChitBenefitInput {
        ChitBenefitInput {
            chit_amount: dec!(500000),
            number_of_months: 20,
            auction_pct: dec!(18),
            commission_pct: dec!(3),
        }
    }

    #[test]
    fn test_benefit_breakdown() {
        let result = calculate_chit_benefit(&sample()).unwrap();
        let out = &result.result;

        assert_eq!(out.monthly_contribution, dec!(25000));
        assert_eq!(out.auction_discount, dec!(90000));
        assert_eq!(out.commission_amount, dec!(15000));
        assert_eq!(out.net_discount, dec!(75000));
        assert_eq!(out.benefit_per_member, dec!(3750));
        assert_eq!(out.monthly_payable, dec!(21250));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_commission_above_discount_warns() {
        let mut input = sample();
        input.auction_pct = dec!(2);

        let result = calculate_chit_benefit(&input).unwrap();
        assert!(result.result.net_discount < Decimal::ZERO);
        assert!(result.result.monthly_payable > result.result.monthly_contribution);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_rejects_zero_months() {
        let mut input = sample();
        input.number_of_months = 0;
        match calculate_chit_benefit(&input).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "number_of_months"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_auction_discount_is_overflow() {
        let mut input = sample();
        input.chit_amount = dec!(70000000000000000000000000000);
        input.auction_pct = dec!(50);

        match calculate_chit_benefit(&input).unwrap_err() {
            CalcError::Overflow { context } => assert_eq!(context, "auction discount"),
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }
}
