//! Full recompute: inputs → level payment → schedule → aggregates.
//!
//! Nothing is cached between calls; each recompute owns its outputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::aggregation::cumulative::{cumulative_sum_by_fields, CumulativeSeries};
use crate::aggregation::totals::{summarize, MortgageSummary};
use crate::amortization::payment::level_payment;
use crate::amortization::schedule::{build_schedule, PaymentRecord, Schedule};
use crate::inputs::{InputSnapshot, MortgageInputs};
use crate::types::{with_metadata, ComputationOutput, PaymentCategory};
use crate::MortgageResult;

const METHODOLOGY: &str = "Fixed-Rate Level-Payment Amortization with Equity-Based PMI Cutoff";

/// Everything the charts and summary labels need from one recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageAnalysis {
    pub snapshot: InputSnapshot,
    pub summary: MortgageSummary,
    pub cumulative_categories: Vec<PaymentCategory>,
    pub schedule: Schedule,
    pub cumulative: CumulativeSeries,
}

/// Resolve raw inputs and run the full pipeline.
pub fn analyze_mortgage(
    inputs: &MortgageInputs,
) -> MortgageResult<ComputationOutput<MortgageAnalysis>> {
    let start = Instant::now();

    let snapshot = inputs.resolve();
    let (analysis, warnings) = run(snapshot, inputs.cumulative_categories())?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, inputs, warnings, elapsed, analysis))
}

/// Run the pipeline for an already-resolved snapshot.
pub fn analyze_snapshot(
    snapshot: &InputSnapshot,
    cumulative_categories: &[PaymentCategory],
) -> MortgageResult<ComputationOutput<MortgageAnalysis>> {
    let start = Instant::now();

    let (analysis, warnings) = run(snapshot.clone(), cumulative_categories.to_vec())?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, snapshot, warnings, elapsed, analysis))
}

fn run(
    snapshot: InputSnapshot,
    cumulative_categories: Vec<PaymentCategory>,
) -> MortgageResult<(MortgageAnalysis, Vec<String>)> {
    snapshot.validate()?;

    let monthly_payment = level_payment(&snapshot)?;
    let schedule = build_schedule(&snapshot, monthly_payment);
    let summary = summarize(&snapshot, monthly_payment, &schedule)?;
    let cumulative = cumulative_sum_by_fields(&schedule, &cumulative_categories);

    debug!(
        periods = schedule.len(),
        %monthly_payment,
        pmi_periods = summary.pmi_periods,
        "mortgage schedule recomputed"
    );

    let warnings = collect_warnings(&snapshot, &summary, &schedule);
    for w in &warnings {
        warn!("{w}");
    }

    Ok((
        MortgageAnalysis {
            snapshot,
            summary,
            cumulative_categories,
            schedule,
            cumulative,
        },
        warnings,
    ))
}

fn collect_warnings(
    snapshot: &InputSnapshot,
    summary: &MortgageSummary,
    schedule: &[PaymentRecord],
) -> Vec<String> {
    let mut warnings = Vec::new();

    if schedule.is_empty() {
        warnings.push("Schedule is empty: loan term has no periods".to_string());
    }
    if snapshot.loan_amount().is_zero() {
        warnings.push("Loan amount is zero: down payment covers the full price".to_string());
    } else if snapshot.annual_rate.is_zero() {
        warnings.push("Interest rate is zero: payments are straight-line principal".to_string());
    }
    if snapshot.pmi_monthly > Decimal::ZERO && summary.pmi_periods == 0 {
        warnings.push(format!(
            "PMI of {} is configured but never charged: down payment already meets the {} equity threshold",
            snapshot.pmi_monthly, snapshot.pmi_equity_threshold
        ));
    }

    warnings
}
