//! Chit-fund calculators: bid solving, auction-amount chart and the
//! member benefit summary.

pub mod auction_chart;
pub mod benefit;
pub mod bid;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::time_value::safe_mul;
use crate::types::{Money, Percent};
use crate::CalcResult;

const HUNDRED: Decimal = dec!(100);

/// Organizer commission on the full chit value.
pub fn commission_amount(chit_amount: Money, commission_pct: Percent) -> CalcResult<Money> {
    let gross = safe_mul(chit_amount, commission_pct, "chit commission")?;
    Ok(gross / HUNDRED)
}

pub(crate) fn validate_chit_amount(chit_amount: Money) -> CalcResult<()> {
    if chit_amount <= Decimal::ZERO {
        return Err(CalcError::invalid("chit_amount", "Chit amount must be positive"));
    }
    Ok(())
}

pub(crate) fn validate_commission(commission_pct: Percent) -> CalcResult<()> {
    if commission_pct < Decimal::ZERO || commission_pct > HUNDRED {
        return Err(CalcError::invalid(
            "commission_pct",
            "Commission must be between 0% and 100%",
        ));
    }
    Ok(())
}
