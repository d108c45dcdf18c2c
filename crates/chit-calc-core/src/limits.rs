//! Business ranges for calculator inputs.
//!
//! The engine itself only rejects inputs that make a formula meaningless.
//! These limits are the narrower ranges the company's forms accept. The
//! chart and benefit forms share one section (`chit`, with commission
//! slabs); the bid form has its own, wider section (`bid`). Front ends load
//! them from YAML and check inputs before calling a calculator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::types::{Money, Percent};
use crate::CalcResult;

/// Inclusive range for one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl FieldRange {
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn check(&self, field: &str, value: Decimal) -> CalcResult<()> {
        if value < self.min || value > self.max {
            return Err(CalcError::OutOfRange {
                field: field.into(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanLimits {
    pub principal: FieldRange,
    pub annual_rate_pct: FieldRange,
    pub tenure_months: FieldRange,
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            principal: FieldRange::new(dec!(1000), dec!(10000000)),
            annual_rate_pct: FieldRange::new(dec!(0), dec!(30)),
            tenure_months: FieldRange::new(dec!(1), dec!(360)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChitLimits {
    pub chit_amount: FieldRange,
    pub total_months: FieldRange,
    /// Commission slabs offered; an empty list accepts any commission
    pub commission_choices: Vec<Percent>,
    pub total_members: FieldRange,
    pub auction_pct: FieldRange,
}

impl Default for ChitLimits {
    fn default() -> Self {
        Self {
            chit_amount: FieldRange::new(dec!(25000), dec!(5000000)),
            total_months: FieldRange::new(dec!(12), dec!(50)),
            commission_choices: vec![dec!(2), dec!(3), dec!(4), dec!(5)],
            total_members: FieldRange::new(dec!(2), dec!(100)),
            auction_pct: FieldRange::new(dec!(5), dec!(25)),
        }
    }
}

/// Ranges of the bid calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidLimits {
    /// The form sets only a floor on the chit value
    pub chit_amount: FieldRange,
    pub total_months: FieldRange,
    pub commission_pct: FieldRange,
    pub bid_interest_pct: FieldRange,
}

impl Default for BidLimits {
    fn default() -> Self {
        Self {
            chit_amount: FieldRange::new(dec!(1000), Decimal::MAX),
            total_months: FieldRange::new(dec!(6), dec!(100)),
            commission_pct: FieldRange::new(dec!(0), dec!(20)),
            bid_interest_pct: FieldRange::new(dec!(1), dec!(50)),
        }
    }
}

impl ChitLimits {
    fn check_commission(&self, commission_pct: Percent) -> CalcResult<()> {
        if self.commission_choices.is_empty()
            || self.commission_choices.iter().any(|c| *c == commission_pct)
        {
            return Ok(());
        }
        let choices: Vec<String> = self
            .commission_choices
            .iter()
            .map(|c| format!("{}%", c.normalize()))
            .collect();
        Err(CalcError::InvalidInput {
            field: "commission_pct".into(),
            reason: format!("Commission must be one of {}", choices.join(", ")),
        })
    }

    fn check_chit(&self, chit_amount: Money, total_months: u32, commission_pct: Percent) -> CalcResult<()> {
        self.chit_amount.check("chit_amount", chit_amount)?;
        self.total_months
            .check("total_months", Decimal::from(total_months))?;
        self.check_commission(commission_pct)
    }
}

/// All calculator limits, as read from a YAML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorLimits {
    pub loan: LoanLimits,
    pub chit: ChitLimits,
    pub bid: BidLimits,
}

impl CalculatorLimits {
    /// Parse limits from YAML. Missing sections and fields keep defaults.
    pub fn from_yaml_str(yaml: &str) -> CalcResult<Self> {
        let limits: CalculatorLimits = serde_yaml::from_str(yaml)?;
        limits.validate()?;
        Ok(limits)
    }

    pub fn to_yaml(&self) -> CalcResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> CalcResult<()> {
        let ranges = [
            ("loan.principal", self.loan.principal),
            ("loan.annual_rate_pct", self.loan.annual_rate_pct),
            ("loan.tenure_months", self.loan.tenure_months),
            ("chit.chit_amount", self.chit.chit_amount),
            ("chit.total_months", self.chit.total_months),
            ("chit.total_members", self.chit.total_members),
            ("chit.auction_pct", self.chit.auction_pct),
            ("bid.chit_amount", self.bid.chit_amount),
            ("bid.total_months", self.bid.total_months),
            ("bid.commission_pct", self.bid.commission_pct),
            ("bid.bid_interest_pct", self.bid.bid_interest_pct),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(CalcError::Config(format!(
                    "{name}: min {} is above max {}",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }

    #[cfg(feature = "loans")]
    pub fn check_emi(&self, input: &crate::loans::emi::EmiInput) -> CalcResult<()> {
        self.loan.principal.check("principal", input.principal)?;
        self.loan
            .annual_rate_pct
            .check("annual_rate_pct", input.annual_rate_pct)?;
        self.loan
            .tenure_months
            .check("tenure_months", Decimal::from(input.tenure_months))
    }

    #[cfg(feature = "chit")]
    pub fn check_chit_bid(&self, input: &crate::chit::bid::ChitBidInput) -> CalcResult<()> {
        use crate::chit::bid::BidMode;

        self.bid.chit_amount.check("chit_amount", input.chit_amount)?;
        self.bid
            .total_months
            .check("total_months", Decimal::from(input.total_months))?;
        self.bid
            .commission_pct
            .check("commission_pct", input.commission_pct)?;
        match input.mode {
            BidMode::SolveBidAmount { bid_interest_pct } => self
                .bid
                .bid_interest_pct
                .check("bid_interest_pct", bid_interest_pct),
            BidMode::SolveBidRate { .. } => Ok(()),
        }
    }

    #[cfg(feature = "chit")]
    pub fn check_auction_chart(
        &self,
        input: &crate::chit::auction_chart::AuctionChartInput,
    ) -> CalcResult<()> {
        self.chit
            .check_chit(input.chit_amount, input.total_months, input.commission_pct)?;
        self.chit
            .total_members
            .check("total_members", Decimal::from(input.total_members))
    }

    #[cfg(feature = "chit")]
    pub fn check_chit_benefit(&self, input: &crate::chit::benefit::ChitBenefitInput) -> CalcResult<()> {
        self.chit
            .check_chit(input.chit_amount, input.number_of_months, input.commission_pct)?;
        self.chit.auction_pct.check("auction_pct", input.auction_pct)
    }
}
