use clap::Args;
use rust_decimal::Decimal;

use chit_calc_core::chit::auction_chart::{self, AuctionChartInput};
use chit_calc_core::chit::benefit::{self, ChitBenefitInput};
use chit_calc_core::chit::bid::{self, BidMode, ChitBidInput};
use chit_calc_core::limits::CalculatorLimits;

use super::{resolve_input, CommandOutput};

/// Arguments for the chit bid calculator
#[derive(Args)]
pub struct ChitBidArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Full chit value
    #[arg(long)]
    pub chit_amount: Option<Decimal>,

    /// Organizer commission in percent
    #[arg(long, default_value = "5")]
    pub commission: Decimal,

    /// Chit duration in months
    #[arg(long)]
    pub total_months: Option<u32>,

    /// Month of the auction being evaluated
    #[arg(long)]
    pub current_month: Option<u32>,

    /// Target annual bid interest in percent; solves the bid amount
    #[arg(long, conflicts_with = "bid_amount")]
    pub bid_interest: Option<Decimal>,

    /// Known bid amount; solves the annualized bidding rate
    #[arg(long)]
    pub bid_amount: Option<Decimal>,
}

impl ChitBidArgs {
    fn flags_given(&self) -> bool {
        self.chit_amount.is_some()
            || self.total_months.is_some()
            || self.current_month.is_some()
            || self.bid_interest.is_some()
            || self.bid_amount.is_some()
    }

    fn mode(&self) -> Result<BidMode, Box<dyn std::error::Error>> {
        match (self.bid_interest, self.bid_amount) {
            (Some(bid_interest_pct), None) => Ok(BidMode::SolveBidAmount { bid_interest_pct }),
            (None, Some(bid_amount)) => Ok(BidMode::SolveBidRate { bid_amount }),
            _ => Err("exactly one of --bid-interest or --bid-amount is required".into()),
        }
    }
}

/// Arguments for the auction-amount chart
#[derive(Args)]
pub struct AuctionChartArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Full chit value
    #[arg(long)]
    pub chit_amount: Option<Decimal>,

    /// Chit duration in months
    #[arg(long)]
    pub total_months: Option<u32>,

    /// Organizer commission in percent
    #[arg(long, default_value = "3")]
    pub commission: Decimal,

    /// Month in which the auction takes place
    #[arg(long)]
    pub auction_month: Option<u32>,

    /// Members in the group (defaults to the chit duration)
    #[arg(long)]
    pub members: Option<u32>,
}

impl AuctionChartArgs {
    fn flags_given(&self) -> bool {
        self.chit_amount.is_some()
            || self.total_months.is_some()
            || self.auction_month.is_some()
            || self.members.is_some()
    }
}

/// Arguments for the member benefit summary
#[derive(Args)]
pub struct ChitBenefitArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Full chit value
    #[arg(long)]
    pub chit_amount: Option<Decimal>,

    /// Chit duration in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Auction discount in percent of the chit value
    #[arg(long)]
    pub auction_pct: Option<Decimal>,

    /// Organizer commission in percent
    #[arg(long, default_value = "3")]
    pub commission: Decimal,
}

impl ChitBenefitArgs {
    fn flags_given(&self) -> bool {
        self.chit_amount.is_some() || self.months.is_some() || self.auction_pct.is_some()
    }
}

pub fn run_chit_bid(
    args: ChitBidArgs,
    limits: Option<&CalculatorLimits>,
) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let bid_input: ChitBidInput = resolve_input(
        &args.input,
        args.flags_given(),
        || {
            Ok(ChitBidInput {
                chit_amount: args
                    .chit_amount
                    .ok_or("--chit-amount is required (or provide --input)")?,
                commission_pct: args.commission,
                total_months: args
                    .total_months
                    .ok_or("--total-months is required (or provide --input)")?,
                current_month: args
                    .current_month
                    .ok_or("--current-month is required (or provide --input)")?,
                mode: args.mode()?,
            })
        },
        "the chit bid calculator",
    )?;

    if let Some(limits) = limits {
        limits.check_chit_bid(&bid_input)?;
    }

    let result = bid::calculate_chit_bid(&bid_input)?;
    CommandOutput::from_calculation(&result)
}

pub fn run_auction_chart(
    args: AuctionChartArgs,
    limits: Option<&CalculatorLimits>,
) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let chart_input: AuctionChartInput = resolve_input(
        &args.input,
        args.flags_given(),
        || {
            let total_months = args
                .total_months
                .ok_or("--total-months is required (or provide --input)")?;
            Ok(AuctionChartInput {
                chit_amount: args
                    .chit_amount
                    .ok_or("--chit-amount is required (or provide --input)")?,
                total_months,
                commission_pct: args.commission,
                auction_month: args
                    .auction_month
                    .ok_or("--auction-month is required (or provide --input)")?,
                total_members: args.members.unwrap_or(total_months),
            })
        },
        "the auction chart",
    )?;

    if let Some(limits) = limits {
        limits.check_auction_chart(&chart_input)?;
    }

    let result = auction_chart::calculate_auction_chart(&chart_input)?;
    CommandOutput::from_calculation(&result)
}

pub fn run_chit_benefit(
    args: ChitBenefitArgs,
    limits: Option<&CalculatorLimits>,
) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let benefit_input: ChitBenefitInput = resolve_input(
        &args.input,
        args.flags_given(),
        || {
            Ok(ChitBenefitInput {
                chit_amount: args
                    .chit_amount
                    .ok_or("--chit-amount is required (or provide --input)")?,
                number_of_months: args
                    .months
                    .ok_or("--months is required (or provide --input)")?,
                auction_pct: args
                    .auction_pct
                    .ok_or("--auction-pct is required (or provide --input)")?,
                commission_pct: args.commission,
            })
        },
        "the chit benefit calculator",
    )?;

    if let Some(limits) = limits {
        limits.check_chit_benefit(&benefit_input)?;
    }

    let result = benefit::calculate_chit_benefit(&benefit_input)?;
    CommandOutput::from_calculation(&result)
}
