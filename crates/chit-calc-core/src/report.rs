//! Flat report representation shared by every exporter.
//!
//! A [`Report`] is what table, CSV and print renderers consume: an input
//! summary, a result block of labelled values and an optional row table.
//! All values are already formatted strings; no arithmetic happens here.

use serde::{Deserialize, Serialize};

use crate::format::{format_inr, format_percent, format_percent_plain};
use crate::types::ComputationOutput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

impl ReportField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub inputs: Vec<ReportField>,
    pub results: Vec<ReportField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<ReportTable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Conversion of a calculator output into its exportable form.
pub trait ToReport {
    fn to_report(&self) -> Report;
}

impl<T: ToReport + Serialize> ToReport for ComputationOutput<T> {
    fn to_report(&self) -> Report {
        let mut report = self.result.to_report();
        report.warnings.extend(self.warnings.iter().cloned());
        report
    }
}

fn months(n: u32) -> String {
    format!("{n} months")
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[cfg(feature = "loans")]
impl ToReport for crate::loans::emi::EmiOutput {
    fn to_report(&self) -> Report {
        let table = if self.amortization_schedule.is_empty() {
            None
        } else {
            Some(ReportTable {
                headers: ["Month", "Opening Balance", "EMI", "Interest", "Principal", "Closing Balance"]
                    .iter()
                    .map(|h| h.to_string())
                    .collect(),
                rows: self
                    .amortization_schedule
                    .iter()
                    .map(|r| {
                        vec![
                            r.month.to_string(),
                            format_inr(r.opening_balance),
                            format_inr(r.installment),
                            format_inr(r.interest),
                            format_inr(r.principal),
                            format_inr(r.closing_balance),
                        ]
                    })
                    .collect(),
            })
        };

        Report {
            title: "EMI Calculator".into(),
            inputs: vec![
                ReportField::new("Loan Amount", format_inr(self.principal)),
                ReportField::new("Annual Interest Rate", format_percent(self.annual_rate_pct)),
                ReportField::new("Loan Tenure", months(self.tenure_months)),
            ],
            results: vec![
                ReportField::new("Monthly EMI", format_inr(self.monthly_installment)),
                ReportField::new("Principal Amount", format_inr(self.principal)),
                ReportField::new("Total Interest", format_inr(self.total_interest)),
                ReportField::new("Total Amount", format_inr(self.total_payable)),
            ],
            table,
            warnings: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chit funds
// ---------------------------------------------------------------------------

#[cfg(feature = "chit")]
impl ToReport for crate::chit::bid::ChitBidOutput {
    fn to_report(&self) -> Report {
        let bidding_rate = self
            .bidding_rate_pct
            .map(format_percent)
            .unwrap_or_else(|| "n/a".to_string());

        Report {
            title: "Chit Fund Calculator".into(),
            inputs: vec![
                ReportField::new("Chit Amount", format_inr(self.chit_amount)),
                ReportField::new("Commission", format_percent_plain(self.commission_pct)),
                ReportField::new("Total Months", self.total_months.to_string()),
                ReportField::new("Current Month", self.current_month.to_string()),
            ],
            results: vec![
                ReportField::new("Bidding Rate", bidding_rate),
                ReportField::new("Bid Amount", format_inr(self.bid_amount)),
                ReportField::new("Bidder Gets", format_inr(self.bidder_payout)),
                ReportField::new("Original Installment", format_inr(self.original_installment)),
                ReportField::new("Dividend per Person", format_inr(self.dividend_per_member)),
                ReportField::new("Payable Installment", format_inr(self.payable_installment)),
                ReportField::new("Monthly Savings", format_percent(self.monthly_savings_pct)),
                ReportField::new("Chit Commission", format_inr(self.commission_amount)),
            ],
            table: None,
            warnings: Vec::new(),
        }
    }
}

#[cfg(feature = "chit")]
impl ToReport for crate::chit::auction_chart::AuctionChartOutput {
    fn to_report(&self) -> Report {
        let commission_header = format!(
            "Commission ({})",
            format_percent_plain(self.commission_pct)
        );

        Report {
            title: "Chit Amount Chart".into(),
            inputs: vec![
                ReportField::new("Chit Amount", format_inr(self.chit_amount)),
                ReportField::new("Duration", months(self.total_months)),
                ReportField::new("Commission Rate", format_percent_plain(self.commission_pct)),
                ReportField::new("Auction Month", format!("Month {}", self.auction_month)),
                ReportField::new("Members", self.total_members.to_string()),
            ],
            results: vec![
                ReportField::new("Per Installment", format_inr(self.per_installment)),
                ReportField::new("Commission Amount", format_inr(self.commission_amount)),
                ReportField::new("Max Payable to Winner", format_inr(self.max_payable_to_winner)),
            ],
            table: Some(ReportTable {
                headers: vec![
                    "Auction %".to_string(),
                    "Auction Amount".to_string(),
                    commission_header,
                    "Per Member Payable".to_string(),
                ],
                rows: self
                    .rows
                    .iter()
                    .map(|r| {
                        vec![
                            format!("{}%", r.auction_pct),
                            format_inr(r.auction_amount),
                            format_inr(r.commission_amount),
                            format_inr(r.per_member_payable),
                        ]
                    })
                    .collect(),
            }),
            warnings: Vec::new(),
        }
    }
}

#[cfg(feature = "chit")]
impl ToReport for crate::chit::benefit::ChitBenefitOutput {
    fn to_report(&self) -> Report {
        Report {
            title: "Chit Benefit Calculator".into(),
            inputs: vec![
                ReportField::new("Chit Amount", format_inr(self.chit_amount)),
                ReportField::new("Number of Months", self.number_of_months.to_string()),
                ReportField::new("Auction Percentage", format_percent(self.auction_pct)),
                ReportField::new("Commission Rate", format_percent_plain(self.commission_pct)),
            ],
            results: vec![
                ReportField::new("Monthly Contribution", format_inr(self.monthly_contribution)),
                ReportField::new("Auction Discount", format_inr(self.auction_discount)),
                ReportField::new("Commission Amount", format_inr(self.commission_amount)),
                ReportField::new("Net Discount", format_inr(self.net_discount)),
                ReportField::new("Benefit per Member", format_inr(self.benefit_per_member)),
                ReportField::new("Monthly Payable", format_inr(self.monthly_payable)),
            ],
            table: None,
            warnings: Vec::new(),
        }
    }
}
