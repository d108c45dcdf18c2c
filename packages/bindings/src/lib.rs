use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use chit_calc_core::{Report, ToReport};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: chit_calc_core::loans::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = chit_calc_core::loans::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Chit funds
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_chit_bid(input_json: String) -> NapiResult<String> {
    let input: chit_calc_core::chit::bid::ChitBidInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = chit_calc_core::chit::bid::calculate_chit_bid(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_auction_chart(input_json: String) -> NapiResult<String> {
    let input: chit_calc_core::chit::auction_chart::AuctionChartInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = chit_calc_core::chit::auction_chart::calculate_auction_chart(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_chit_benefit(input_json: String) -> NapiResult<String> {
    let input: chit_calc_core::chit::benefit::ChitBenefitInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = chit_calc_core::chit::benefit::calculate_chit_benefit(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a decimal string as Indian rupees, e.g. "1234567" -> "₹12,34,567".
#[napi]
pub fn format_inr(amount: String) -> NapiResult<String> {
    let amount = Decimal::from_str(amount.trim()).map_err(to_napi_error)?;
    Ok(chit_calc_core::format::format_inr(amount))
}

/// Run a calculator and return its flattened report, the shape the
/// front end renders and prints.
#[napi]
pub fn render_report(calculator: String, input_json: String) -> NapiResult<String> {
    let report: Report = match calculator.as_str() {
        "emi" => report_of(&input_json, chit_calc_core::loans::emi::calculate_emi)?,
        "chit_bid" => report_of(&input_json, chit_calc_core::chit::bid::calculate_chit_bid)?,
        "auction_chart" => report_of(
            &input_json,
            chit_calc_core::chit::auction_chart::calculate_auction_chart,
        )?,
        "chit_benefit" => report_of(
            &input_json,
            chit_calc_core::chit::benefit::calculate_chit_benefit,
        )?,
        other => {
            return Err(to_napi_error(format!(
                "unknown calculator '{other}' (expected emi, chit_bid, auction_chart or chit_benefit)"
            )))
        }
    };
    serde_json::to_string(&report).map_err(to_napi_error)
}

fn report_of<I, O, F>(input_json: &str, calculate: F) -> NapiResult<Report>
where
    I: serde::de::DeserializeOwned,
    O: ToReport,
    F: Fn(&I) -> chit_calc_core::CalcResult<O>,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculate(&input).map_err(to_napi_error)?;
    Ok(output.to_report())
}
