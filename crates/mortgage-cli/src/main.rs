mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::chart::{NearestArgs, StackArgs};
use commands::schedule::{CumulativeArgs, PaymentArgs, ScheduleArgs, SummaryArgs};

/// Fixed-rate mortgage amortization and PMI analysis
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage amortization and PMI analysis",
    long_about = "A CLI for fixed-rate mortgage schedules with decimal precision. \
                  Computes the level payment, the month-by-month amortization \
                  schedule with equity-based PMI cutoff, cumulative totals, \
                  stacked chart layers and nearest-month lookups."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pipeline details to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Level monthly principal + interest payment
    Payment(PaymentArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Running totals per payment category
    Cumulative(CumulativeArgs),
    /// Headline figures: monthly payment, PMI timeline, lifetime cost, DTI
    Summary(SummaryArgs),
    /// Full analysis: snapshot, summary, schedule and cumulative series
    Analyze(SummaryArgs),
    /// Schedule record nearest to a (fractional) month
    Nearest(NearestArgs),
    /// Category-stacked chart layers
    Stack(StackArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::schedule::run_payment(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Cumulative(args) => commands::schedule::run_cumulative(args),
        Commands::Summary(args) => commands::schedule::run_summary(args),
        Commands::Analyze(args) => commands::schedule::run_analyze(args),
        Commands::Nearest(args) => commands::chart::run_nearest(args),
        Commands::Stack(args) => commands::chart::run_stack(args),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
