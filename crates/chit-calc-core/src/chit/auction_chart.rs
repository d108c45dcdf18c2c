//! Chit auction-amount chart.
//!
//! For each annual auction rate in the fixed 12%–30% sweep, values every
//! installment of the chit at the auction month: installments paid before
//! it are compounded forward, installments still to come are discounted
//! back, both at the effective monthly rate `(1 + a/100)^(1/12) − 1`. The
//! resulting amount is capped at the chit value less commission, floored
//! at zero and rounded to whole rupees.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{commission_amount, validate_chit_amount, validate_commission};
use crate::error::CalcError;
use crate::format::round_rupees;
use crate::time_value::{discount_sum, effective_monthly_rate, growth_sum, safe_add, safe_mul};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

/// Lowest annual auction rate in the chart sweep.
pub const SWEEP_START_PCT: u32 = 12;
/// Highest annual auction rate in the chart sweep (inclusive).
pub const SWEEP_END_PCT: u32 = 30;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionChartInput {
    /// Full chit value
    pub chit_amount: Money,
    /// Chit duration in months
    pub total_months: u32,
    /// Organizer commission in percent of the chit value
    pub commission_pct: Percent,
    /// Month in which the auction takes place (1-indexed)
    pub auction_month: u32,
    /// Members sharing the payable amount
    pub total_members: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionChartOutput {
    pub chit_amount: Money,
    pub total_months: u32,
    pub commission_pct: Percent,
    pub auction_month: u32,
    pub total_members: u32,
    /// Chit amount divided by duration
    pub per_installment: Money,
    pub commission_amount: Money,
    /// Chit amount less commission; no row exceeds it
    pub max_payable_to_winner: Money,
    pub rows: Vec<AuctionChartRow>,
}

/// One auction rate of the sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionChartRow {
    pub auction_pct: u32,
    /// Effective monthly rate implied by `auction_pct`
    pub monthly_rate: Rate,
    /// Time-value amount before capping and rounding
    pub time_value_amount: Money,
    /// Capped, floored and rounded auction amount
    pub auction_amount: Money,
    pub commission_amount: Money,
    pub per_member_payable: Money,
    /// Whether the commission cap bound this row
    pub capped: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn calculate_auction_chart(
    input: &AuctionChartInput,
) -> CalcResult<ComputationOutput<AuctionChartOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let chit = input.chit_amount;
    let per_installment = chit / Decimal::from(input.total_months);
    let commission = commission_amount(chit, input.commission_pct)?;
    let max_payable = chit - commission;
    let whole_rupee_cap = max_payable.max(Decimal::ZERO).floor();
    let members = Decimal::from(input.total_members);

    let months_before = input.auction_month - 1;
    let months_after = input.total_months - input.auction_month;

    let mut rows = Vec::with_capacity((SWEEP_END_PCT - SWEEP_START_PCT + 1) as usize);
    for auction_pct in SWEEP_START_PCT..=SWEEP_END_PCT {
        let monthly_rate = effective_monthly_rate(Decimal::from(auction_pct));

        let s_before = growth_sum(monthly_rate, months_before)?;
        let s_after = discount_sum(monthly_rate, months_after)?;
        let factor_sum = safe_add(s_before, Decimal::ONE, "auction factor sum")
            .and_then(|sum| safe_add(sum, s_after, "auction factor sum"))?;
        let time_value_amount = safe_mul(per_installment, factor_sum, "time-value auction amount")?;

        let capped = time_value_amount > max_payable;
        // Rounding a fractional cap up would breach it, so the whole-rupee cap is floored
        let auction_amount =
            round_rupees(time_value_amount.min(max_payable).max(Decimal::ZERO)).min(whole_rupee_cap);

        rows.push(AuctionChartRow {
            auction_pct,
            monthly_rate,
            time_value_amount,
            auction_amount,
            commission_amount: commission,
            per_member_payable: auction_amount / members,
            capped,
        });
    }

    let capped_rows = rows.iter().filter(|r| r.capped).count();
    if capped_rows == rows.len() {
        warnings.push(format!(
            "Every rate is capped at the chit amount less commission ({}) for auction month {}.",
            max_payable, input.auction_month
        ));
    }

    debug!(
        "auction chart: chit={} months={} auction_month={} capped_rows={}",
        chit, input.total_months, input.auction_month, capped_rows
    );

    let output = AuctionChartOutput {
        chit_amount: chit,
        total_months: input.total_months,
        commission_pct: input.commission_pct,
        auction_month: input.auction_month,
        total_members: input.total_members,
        per_installment,
        commission_amount: commission,
        max_payable_to_winner: max_payable,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Time-value auction amount: I × (Σ_{j<k}(1+r)^(k−j) + 1 + Σ_{j>k}(1+r)^(k−j)), r = (1+a)^(1/12) − 1",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AuctionChartInput) -> CalcResult<()> {
    validate_chit_amount(input.chit_amount)?;
    validate_commission(input.commission_pct)?;

    if input.total_months < 2 {
        return Err(CalcError::invalid(
            "total_months",
            "A chit runs for at least 2 months",
        ));
    }
    if input.total_members < 2 {
        return Err(CalcError::invalid(
            "total_members",
            "A chit needs at least 2 members",
        ));
    }
    if input.auction_month == 0 || input.auction_month > input.total_months {
        return Err(CalcError::invalid(
            "auction_month",
            "Auction month must be within the chit duration",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
