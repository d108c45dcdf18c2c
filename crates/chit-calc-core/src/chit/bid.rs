//! Chit bid calculator.
//!
//! Works in one of two modes: solve the bid amount that corresponds to a
//! target annual bid interest, or solve the annualized bidding rate implied
//! by a known bid amount. Both modes then derive the bidder payout, the
//! per-member dividend and the discounted installment.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{commission_amount, validate_chit_amount, validate_commission};
use crate::error::CalcError;
use crate::time_value::{safe_add, safe_div, safe_mul};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// Months per year × 100: converts a monthly fraction into an annual percent.
const ANNUALIZER: Decimal = dec!(1200);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Which side of the bid equation is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BidMode {
    /// Target annual bid interest is known; solve the bid amount.
    SolveBidAmount { bid_interest_pct: Percent },
    /// Bid amount is known; solve the annualized bidding rate.
    SolveBidRate { bid_amount: Money },
}

impl BidMode {
    pub fn name(&self) -> &'static str {
        match self {
            BidMode::SolveBidAmount { .. } => "solve_bid_amount",
            BidMode::SolveBidRate { .. } => "solve_bid_rate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChitBidInput {
    /// Full chit value
    pub chit_amount: Money,
    /// Organizer commission in percent of the chit value
    pub commission_pct: Percent,
    /// Chit duration in months
    pub total_months: u32,
    /// Month of the auction being evaluated (1-indexed)
    pub current_month: u32,
    #[serde(flatten)]
    pub mode: BidMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChitBidOutput {
    pub mode: String,
    pub chit_amount: Money,
    pub commission_pct: Percent,
    pub total_months: u32,
    pub current_month: u32,
    /// Installments still to be paid after the auction month
    pub remaining_months: u32,
    pub bid_amount: Money,
    /// Annualized cost of the bid including commission; `None` when the bid
    /// and commission consume the whole chit
    pub bidding_rate_pct: Option<Percent>,
    /// What the winning bidder takes home, never negative
    pub bidder_payout: Money,
    pub original_installment: Money,
    pub dividend_per_member: Money,
    pub payable_installment: Money,
    pub monthly_savings_pct: Percent,
    pub commission_amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn calculate_chit_bid(input: &ChitBidInput) -> CalcResult<ComputationOutput<ChitBidOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let remaining_months = validate_input(input)?;

    let chit = input.chit_amount;
    let commission = commission_amount(chit, input.commission_pct)?;

    let bid_amount = match &input.mode {
        BidMode::SolveBidAmount { bid_interest_pct } => {
            solve_bid_amount(*bid_interest_pct, chit, remaining_months)?
        }
        BidMode::SolveBidRate { bid_amount } => *bid_amount,
    };

    let bidding_rate_pct = solve_bidding_rate(bid_amount, commission, chit, remaining_months)?;
    if bidding_rate_pct.is_none() {
        warn!(
            "chit bid: bid {} plus commission {} consumes chit {}",
            bid_amount, commission, chit
        );
        warnings.push(
            "Bid amount plus commission reaches the chit amount; bidding rate is undefined."
                .into(),
        );
    }

    let bidder_payout = (chit - bid_amount - commission).max(Decimal::ZERO);

    let months = Decimal::from(input.total_months);
    let original_installment = chit / months;
    let dividend_per_member = bid_amount / months;
    let payable_installment = original_installment - dividend_per_member;
    let monthly_savings_pct = if original_installment.is_zero() {
        Decimal::ZERO
    } else {
        dividend_per_member / original_installment * dec!(100)
    };

    debug!(
        "chit bid ({}): chit={} month={}/{} -> bid={} rate={:?}",
        input.mode.name(),
        chit,
        input.current_month,
        input.total_months,
        bid_amount,
        bidding_rate_pct
    );

    let output = ChitBidOutput {
        mode: input.mode.name().to_string(),
        chit_amount: chit,
        commission_pct: input.commission_pct,
        total_months: input.total_months,
        current_month: input.current_month,
        remaining_months,
        bid_amount,
        bidding_rate_pct,
        bidder_payout,
        original_installment,
        dividend_per_member,
        payable_installment,
        monthly_savings_pct,
        commission_amount: commission,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Chit bid: B = rate×C×m / (1200 + rate×m); rate = (B + commission)×1200 / ((C − B − commission)×m)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Bid amount that corresponds to an annual bid interest over the
/// remaining months: `(rate × C × m) / (1200 + rate × m)`.
pub fn solve_bid_amount(
    bid_interest_pct: Percent,
    chit_amount: Money,
    remaining_months: u32,
) -> CalcResult<Money> {
    let m = Decimal::from(remaining_months);
    let rate_months = safe_mul(bid_interest_pct, m, "bid interest over remaining months")?;
    let numerator = safe_mul(rate_months, chit_amount, "bid amount numerator")?;
    let denominator = safe_add(ANNUALIZER, rate_months, "bid amount denominator")?;
    safe_div(numerator, denominator, "bid amount")
}

/// Annualized bidding rate implied by a bid:
/// `((B + commission) × 1200) / ((C − B − commission) × m)`.
///
/// Returns `None` when the denominator is not positive.
pub fn solve_bidding_rate(
    bid_amount: Money,
    commission: Money,
    chit_amount: Money,
    remaining_months: u32,
) -> CalcResult<Option<Percent>> {
    let net = chit_amount - bid_amount - commission;
    let denominator = safe_mul(net, Decimal::from(remaining_months), "bidding rate denominator")?;
    if denominator <= Decimal::ZERO {
        return Ok(None);
    }
    let cost = safe_add(bid_amount, commission, "bid plus commission")?;
    let numerator = safe_mul(cost, ANNUALIZER, "bidding rate numerator")?;
    safe_div(numerator, denominator, "bidding rate").map(Some)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates the input and returns the remaining months after the auction.
fn validate_input(input: &ChitBidInput) -> CalcResult<u32> {
    validate_chit_amount(input.chit_amount)?;
    validate_commission(input.commission_pct)?;

    if input.total_months < 2 {
        return Err(CalcError::invalid(
            "total_months",
            "A chit runs for at least 2 months",
        ));
    }
    if input.current_month == 0 || input.current_month > input.total_months {
        return Err(CalcError::invalid(
            "current_month",
            "Current month must be between 1 and the total months",
        ));
    }

    let remaining_months = input.total_months - input.current_month;
    if remaining_months == 0 {
        return Err(CalcError::NotApplicable(
            "no installments remain after the final month's auction".into(),
        ));
    }

    match &input.mode {
        BidMode::SolveBidAmount { bid_interest_pct } => {
            if *bid_interest_pct <= Decimal::ZERO {
                return Err(CalcError::invalid(
                    "bid_interest_pct",
                    "Bid interest must be positive",
                ));
            }
        }
        BidMode::SolveBidRate { bid_amount } => {
            if *bid_amount < Decimal::ZERO || *bid_amount >= input.chit_amount {
                return Err(CalcError::invalid(
                    "bid_amount",
                    "Bid amount must be at least zero and below the chit amount",
                ));
            }
        }
    }

    Ok(remaining_months)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
