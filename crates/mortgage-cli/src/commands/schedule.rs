use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use mortgage_core::aggregation::cumulative::CumulativeSeries;
use mortgage_core::amortization::payment;
use mortgage_core::analysis;
use mortgage_core::inputs::MortgageInputs;
use mortgage_core::{MortgageResult, PaymentCategory};

use super::{parse_category, MortgageArgs};

/// Arguments for the level payment formula
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate (e.g. 0.06 for 6%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Decimal,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: u32,
}

/// Arguments for the per-month schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub mortgage: MortgageArgs,
}

/// Arguments for the cumulative series
#[derive(Args)]
pub struct CumulativeArgs {
    #[command(flatten)]
    pub mortgage: MortgageArgs,

    /// Categories to accumulate (comma-separated; default principal,interest,pmi)
    #[arg(long, value_delimiter = ',', value_parser = parse_category)]
    pub fields: Option<Vec<PaymentCategory>>,
}

/// Arguments for the summary figures and the full analysis
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub mortgage: MortgageArgs,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let periodic_rate = args.annual_rate / dec!(12);
    let periods = args.term_years.saturating_mul(12);
    let monthly = payment::monthly_payment(args.principal, periodic_rate, periods)?;

    Ok(json!({
        "result": {
            "monthly_payment": monthly,
            "principal": args.principal,
            "periodic_rate": periodic_rate,
            "periods": periods,
            "total_paid": monthly * Decimal::from(periods),
        }
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.mortgage.into_inputs()?;
    let output = analysis::analyze_mortgage(&inputs)?;
    Ok(serde_json::to_value(output.result.schedule)?)
}

pub fn run_cumulative(args: CumulativeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.mortgage.into_inputs()?;
    let series = cumulative_series(&inputs, args.fields)?;
    Ok(serde_json::to_value(series)?)
}

/// One pipeline run accumulating `fields`, or the inputs' own categories.
fn cumulative_series(
    inputs: &MortgageInputs,
    fields: Option<Vec<PaymentCategory>>,
) -> MortgageResult<CumulativeSeries> {
    let fields = fields.unwrap_or_else(|| inputs.cumulative_categories());
    let output = analysis::analyze_snapshot(&inputs.resolve(), &fields)?;
    Ok(output.result.cumulative)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.mortgage.into_inputs()?;
    let output = analysis::analyze_mortgage(&inputs)?;
    let mut value = serde_json::to_value(&output)?;
    value["result"] = serde_json::to_value(&output.result.summary)?;
    Ok(value)
}

pub fn run_analyze(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.mortgage.into_inputs()?;
    let output = analysis::analyze_mortgage(&inputs)?;
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> MortgageInputs {
        MortgageInputs {
            price: Some(dec!(300_000)),
            down_payment: Some(dec!(15_000)),
            annual_rate: Some(dec!(0.06)),
            pmi_monthly: Some(dec!(150)),
            hoa: Some(dec!(80)),
            ..Default::default()
        }
    }

    #[test]
    fn test_cumulative_uses_requested_fields() {
        let series = cumulative_series(&inputs(), Some(vec![PaymentCategory::Hoa])).unwrap();
        let schedule = analysis::analyze_mortgage(&inputs()).unwrap().result.schedule;

        assert_eq!(series.len(), 360);
        assert_eq!(series[359].hoa, dec!(80) * dec!(360));
        assert_eq!(series[359].principal, schedule[359].principal);
    }

    #[test]
    fn test_cumulative_defaults_to_loan_costs() {
        let series = cumulative_series(&inputs(), None).unwrap();
        let full = analysis::analyze_mortgage(&inputs()).unwrap().result;
        assert_eq!(series, full.cumulative);
        assert_eq!(series[359].hoa, dec!(80));
    }
}
