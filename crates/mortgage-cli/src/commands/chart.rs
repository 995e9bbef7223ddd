use clap::Args;
use serde_json::Value;

use mortgage_core::analysis;
use mortgage_core::chart::nearest::nearest_period;
use mortgage_core::chart::stack::stack_layers;
use mortgage_core::PaymentCategory;

use super::{parse_category, MortgageArgs};

/// Arguments for the nearest-period lookup
#[derive(Args)]
pub struct NearestArgs {
    #[command(flatten)]
    pub mortgage: MortgageArgs,

    /// Month position to look up (fractional values allowed)
    #[arg(long, allow_negative_numbers = true)]
    pub month: f64,

    /// Look up in the cumulative series instead of the monthly schedule
    #[arg(long)]
    pub cumulative: bool,
}

/// Arguments for stacked chart layers
#[derive(Args)]
pub struct StackArgs {
    #[command(flatten)]
    pub mortgage: MortgageArgs,

    /// Categories to stack, bottom first (comma-separated; default all)
    #[arg(long, value_delimiter = ',', value_parser = parse_category)]
    pub keys: Option<Vec<PaymentCategory>>,

    /// Stack the cumulative series instead of the monthly schedule
    #[arg(long)]
    pub cumulative: bool,
}

pub fn run_nearest(args: NearestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.mortgage.into_inputs()?;
    let output = analysis::analyze_mortgage(&inputs)?;
    let series = if args.cumulative {
        &output.result.cumulative
    } else {
        &output.result.schedule
    };

    let record = nearest_period(series, args.month).ok_or("schedule is empty")?;
    Ok(serde_json::to_value(record)?)
}

pub fn run_stack(args: StackArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.mortgage.into_inputs()?;
    let output = analysis::analyze_mortgage(&inputs)?;
    let series = if args.cumulative {
        &output.result.cumulative
    } else {
        &output.result.schedule
    };

    let keys = args.keys.unwrap_or_else(|| PaymentCategory::ALL.to_vec());
    Ok(serde_json::to_value(stack_layers(series, &keys))?)
}
