use chit_calc_core::chit::auction_chart::{self, AuctionChartInput};
use chit_calc_core::chit::benefit::{self, ChitBenefitInput};
use chit_calc_core::chit::bid::{self, BidMode, ChitBidInput};
use chit_calc_core::limits::CalculatorLimits;
use chit_calc_core::{CalcError, ToReport};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Bid calculator
// ===========================================================================

fn bid_input(commission: Decimal, total: u32, current: u32, mode: BidMode) -> ChitBidInput {
    ChitBidInput {
        chit_amount: dec!(500000),
        commission_pct: commission,
        total_months: total,
        current_month: current,
        mode,
    }
}

#[test]
fn test_bid_round_trip_without_commission() {
    let solved = bid::calculate_chit_bid(&bid_input(
        Decimal::ZERO,
        25,
        10,
        BidMode::SolveBidAmount {
            bid_interest_pct: dec!(21),
        },
    ))
    .unwrap()
    .result;

    let back = bid::calculate_chit_bid(&bid_input(
        Decimal::ZERO,
        25,
        10,
        BidMode::SolveBidRate {
            bid_amount: solved.bid_amount,
        },
    ))
    .unwrap()
    .result;

    let rate = back.bidding_rate_pct.unwrap();
    assert!((rate - dec!(21)).abs() < dec!(0.0000001), "got {rate}");
    assert_eq!(back.bid_amount, solved.bid_amount);
}

#[test]
fn test_bid_savings_percent_matches_dividend() {
    let out = bid::calculate_chit_bid(&bid_input(
        dec!(5),
        20,
        4,
        BidMode::SolveBidRate {
            bid_amount: dec!(100000),
        },
    ))
    .unwrap()
    .result;

    assert_eq!(out.original_installment, dec!(25000));
    assert_eq!(out.dividend_per_member, dec!(5000));
    assert_eq!(out.payable_installment, dec!(20000));
    assert_eq!(out.monthly_savings_pct, dec!(20));
    assert_eq!(out.bidder_payout, dec!(375000));
}

#[test]
fn test_bid_last_month_not_applicable() {
    let err = bid::calculate_chit_bid(&bid_input(
        dec!(5),
        20,
        20,
        BidMode::SolveBidRate {
            bid_amount: dec!(100000),
        },
    ))
    .unwrap_err();
    assert!(matches!(err, CalcError::NotApplicable(_)));
}

// ===========================================================================
// Auction chart
// ===========================================================================

fn chart_input(months: u32, auction_month: u32, members: u32) -> AuctionChartInput {
    AuctionChartInput {
        chit_amount: dec!(500000),
        total_months: months,
        commission_pct: dec!(3),
        auction_month,
        total_members: members,
    }
}

#[test]
fn test_chart_degenerate_inputs_rejected() {
    let cases = [
        chart_input(1, 1, 20),
        chart_input(20, 0, 20),
        chart_input(20, 21, 20),
        chart_input(20, 5, 1),
    ];
    for input in cases {
        assert!(
            auction_chart::calculate_auction_chart(&input).is_err(),
            "expected rejection for {:?}",
            input
        );
    }
}

#[test]
fn test_chart_later_month_pays_more() {
    let early = auction_chart::calculate_auction_chart(&chart_input(30, 2, 30))
        .unwrap()
        .result;
    let late = auction_chart::calculate_auction_chart(&chart_input(30, 12, 30))
        .unwrap()
        .result;

    for (e, l) in early.rows.iter().zip(late.rows.iter()) {
        assert_eq!(e.auction_pct, l.auction_pct);
        assert!(l.auction_amount >= e.auction_amount);
    }
}

#[test]
fn test_chart_report_serializes() {
    let output = auction_chart::calculate_auction_chart(&chart_input(20, 1, 20)).unwrap();
    let report = output.to_report();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["title"], "Chit Amount Chart");
    assert_eq!(value["table"]["rows"].as_array().unwrap().len(), 19);
    assert_eq!(value["results"][2]["value"], "₹4,85,000");
}

// ===========================================================================
// Benefit calculator and limits
// ===========================================================================

#[test]
fn test_benefit_respects_default_limits() {
    let input = ChitBenefitInput {
        chit_amount: dec!(500000),
        number_of_months: 20,
        auction_pct: dec!(18),
        commission_pct: dec!(3),
    };
    let limits = CalculatorLimits::default();
    limits.check_chit_benefit(&input).unwrap();

    let out = benefit::calculate_chit_benefit(&input).unwrap().result;
    assert_eq!(
        out.monthly_payable,
        out.monthly_contribution - out.benefit_per_member
    );
}

#[test]
fn test_limits_reject_small_chit() {
    let mut input = chart_input(20, 1, 20);
    input.chit_amount = dec!(10000);

    let err = CalculatorLimits::default()
        .check_auction_chart(&input)
        .unwrap_err();
    assert!(matches!(err, CalcError::OutOfRange { ref field, .. } if field == "chit_amount"));
}

// ===========================================================================
// Properties
// ===========================================================================

fn chit_strategy() -> impl Strategy<Value = Decimal> {
    (25_000u64..=5_000_000u64).prop_map(Decimal::from)
}

/// (total months, a month strictly before the last)
fn months_strategy() -> impl Strategy<Value = (u32, u32)> {
    (2u32..=60).prop_flat_map(|n| (Just(n), 1..n))
}

proptest! {
    #[test]
    fn bid_round_trip_reproduces_rate(
        chit in chit_strategy(),
        (total, current) in months_strategy(),
        rate_bp in 100i64..=6000,
    ) {
        let rate = Decimal::new(rate_bp, 2);
        let remaining = total - current;

        let bid_amount = bid::solve_bid_amount(rate, chit, remaining).unwrap();
        let back = bid::solve_bidding_rate(bid_amount, Decimal::ZERO, chit, remaining)
            .unwrap()
            .unwrap();
        prop_assert!((back - rate).abs() < dec!(0.0000001), "rate {} came back as {}", rate, back);
    }

    #[test]
    fn bidder_payout_never_negative(
        chit in chit_strategy(),
        (total, current) in months_strategy(),
        commission in 0u32..=10,
        bid_share in 0u32..100,
    ) {
        let bid_amount = chit * Decimal::from(bid_share) / dec!(100);
        let input = ChitBidInput {
            chit_amount: chit,
            commission_pct: Decimal::from(commission),
            total_months: total,
            current_month: current,
            mode: BidMode::SolveBidRate { bid_amount },
        };
        let out = bid::calculate_chit_bid(&input).unwrap().result;
        prop_assert!(out.bidder_payout >= Decimal::ZERO);
    }

    #[test]
    fn chart_rows_stay_within_cap(
        chit in chit_strategy(),
        (months, auction_month) in (2u32..=50).prop_flat_map(|n| (Just(n), 1..=n)),
        commission in 0u32..=10,
        members in 2u32..=100,
    ) {
        let input = AuctionChartInput {
            chit_amount: chit,
            total_months: months,
            commission_pct: Decimal::from(commission),
            auction_month,
            total_members: members,
        };
        let out = auction_chart::calculate_auction_chart(&input).unwrap().result;

        prop_assert_eq!(out.rows.len(), 19);
        for row in &out.rows {
            prop_assert!(row.auction_amount >= Decimal::ZERO);
            prop_assert!(row.auction_amount <= out.max_payable_to_winner);
            prop_assert_eq!(row.commission_amount, out.commission_amount);
        }
    }
}
