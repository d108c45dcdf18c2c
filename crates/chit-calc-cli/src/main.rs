mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use commands::chit::{AuctionChartArgs, ChitBenefitArgs, ChitBidArgs};
use commands::loans::EmiArgs;
use commands::CommandOutput;

/// Loan EMI and chit fund calculations
#[derive(Parser)]
#[command(
    name = "chitcalc",
    version,
    about = "Loan EMI and chit fund calculations",
    long_about = "A CLI for loan EMI and chit fund auction calculations with decimal \
                  precision. Supports EMI schedules, chit bid amounts and bidding rates, \
                  auction-amount charts and member benefit summaries, exported as JSON, \
                  tables, CSV or print-ready HTML."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    out: Option<String>,

    /// YAML file replacing the default input limits
    #[arg(long, global = true, conflicts_with = "no_limits")]
    limits: Option<String>,

    /// Skip input limit checks
    #[arg(long, global = true)]
    no_limits: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a loan EMI, optionally with its amortization schedule
    Emi(EmiArgs),
    /// Solve a chit auction bid amount or its annualized bidding rate
    ChitBid(ChitBidArgs),
    /// Chart auction amounts across auction rates for one month
    AuctionChart(AuctionChartArgs),
    /// Summarize a member's monthly payable after the auction discount
    ChitBenefit(ChitBenefitArgs),
    /// Show the effective input limits
    Limits,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Html,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("chitcalc {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let limits = commands::limits::load_limits(cli.limits.as_deref(), cli.no_limits)?;
    let limits = limits.as_ref();

    let result: CommandOutput = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(args, limits)?,
        Commands::ChitBid(args) => commands::chit::run_chit_bid(args, limits)?,
        Commands::AuctionChart(args) => commands::chit::run_auction_chart(args, limits)?,
        Commands::ChitBenefit(args) => commands::chit::run_chit_benefit(args, limits)?,
        Commands::Limits => commands::limits::run_limits(limits)?,
        Commands::Version => return Ok(()),
    };

    match &cli.out {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            let mut w = BufWriter::new(file);
            output::format_output(&cli.output, &result, &mut w)?;
            w.flush()?;
            log::info!("wrote {:?} output to {}", cli.output, path);
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            output::format_output(&cli.output, &result, &mut w)?;
            w.flush()?;
        }
    }
    Ok(())
}
