//! Rupee and percent formatting for reports.
//!
//! Amounts are rounded half away from zero to whole rupees and grouped the
//! Indian way: the last three digits, then pairs (`1,23,45,678`).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, Percent};

pub const RUPEE: &str = "₹";

/// `₹5,00,000`; negatives render as `-₹1,000`.
pub fn format_inr(amount: Money) -> String {
    let grouped = format_grouped(amount);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-{RUPEE}{rest}"),
        None => format!("{RUPEE}{grouped}"),
    }
}

/// Whole-rupee amount with Indian digit grouping and no currency symbol.
pub fn format_grouped(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "0".to_string();
    }
    let digits = rounded.abs().trunc().to_string();
    let digits = digits.split('.').next().unwrap_or("0");
    let grouped = group_indian(digits);
    if rounded.is_sign_negative() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Two-decimal percent, `18.00%`.
pub fn format_percent(value: Percent) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}%")
}

/// Percent with no decimals for whole-number inputs such as commission.
pub fn format_percent_plain(value: Percent) -> String {
    format!("{}%", value.normalize())
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut parts: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        parts.push(&head[end - 2..end]);
        end -= 2;
    }
    parts.push(&head[..end]);
    parts.reverse();

    format!("{},{}", parts.join(","), tail)
}

/// Decimal to whole rupees, for callers that need the rounded number itself.
pub fn round_rupees(amount: Money) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lakh_grouping() {
        assert_eq!(format_inr(dec!(500000)), "₹5,00,000");
        assert_eq!(format_inr(dec!(12345678)), "₹1,23,45,678");
        assert_eq!(format_inr(dec!(5000000)), "₹50,00,000");
    }

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(Decimal::ZERO), "₹0");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(format_inr(dec!(0.5)), "₹1");
        assert_eq!(format_inr(dec!(23536.736)), "₹23,537");
        assert_eq!(format_inr(dec!(-0.4)), "₹0");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_inr(dec!(-1500)), "-₹1,500");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(18)), "18.00%");
        assert_eq!(format_percent(dec!(26.666666)), "26.67%");
        assert_eq!(format_percent_plain(dec!(5.00)), "5%");
    }
}
