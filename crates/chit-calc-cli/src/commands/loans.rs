use clap::Args;
use rust_decimal::Decimal;

use chit_calc_core::limits::CalculatorLimits;
use chit_calc_core::loans::emi::{self, EmiInput};

use super::{resolve_input, CommandOutput};

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 12.5)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

impl EmiArgs {
    fn flags_given(&self) -> bool {
        self.principal.is_some() || self.annual_rate.is_some() || self.tenure.is_some()
    }
}

pub fn run_emi(
    args: EmiArgs,
    limits: Option<&CalculatorLimits>,
) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let mut emi_input: EmiInput = resolve_input(
        &args.input,
        args.flags_given(),
        || {
            Ok(EmiInput {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                annual_rate_pct: args
                    .annual_rate
                    .ok_or("--annual-rate is required (or provide --input)")?,
                tenure_months: args
                    .tenure
                    .ok_or("--tenure is required (or provide --input)")?,
                include_schedule: false,
            })
        },
        "the EMI calculator",
    )?;
    emi_input.include_schedule |= args.schedule;

    if let Some(limits) = limits {
        limits.check_emi(&emi_input)?;
    }

    let result = emi::calculate_emi(&emi_input)?;
    CommandOutput::from_calculation(&result)
}
