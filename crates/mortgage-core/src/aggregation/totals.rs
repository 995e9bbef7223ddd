//! Lifetime totals, PMI timeline and the headline summary figures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::PaymentRecord;
use crate::error::MortgageError;
use crate::inputs::InputSnapshot;
use crate::types::{Money, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Sums over the life of the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimeTotals {
    /// `periods * monthly_payment + total_pmi`.
    pub total_paid: Money,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_pmi: Money,
    /// Number of months with a non-zero PMI charge.
    pub pmi_periods: u32,
}

/// Headline figures shown next to the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub loan_amount: Money,
    /// Level principal + interest.
    pub monthly_principal_and_interest: Money,
    /// HOA + property tax + homeowner's insurance.
    pub monthly_extras: Money,
    /// P&I plus extras, without PMI.
    pub monthly_payment: Money,
    /// P&I plus extras plus the full PMI premium.
    pub monthly_payment_with_pmi: Money,
    /// True when a premium is configured and the down payment is below the
    /// equity threshold.
    pub pmi_applies: bool,
    pub pmi_periods: u32,
    /// PMI duration as "Ny Mmo".
    pub pmi_duration: String,
    pub pmi_total_cost: Money,
    /// Total of loan payments and PMI; zero when nothing is borrowed.
    pub lifetime_total: Money,
    /// Down payment + closing costs.
    pub upfront_cost: Money,
    /// Monthly obligations, including the full PMI premium, over monthly
    /// income; `None` without income.
    pub debt_to_income: Option<Rate>,
    /// Annual property tax per 1,000 of home value.
    pub property_tax_per_thousand: Option<Money>,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Number of periods that carry a PMI charge.
pub fn pmi_active_periods(schedule: &[PaymentRecord]) -> u32 {
    schedule.iter().filter(|r| !r.pmi.is_zero()).count() as u32
}

/// Lifetime totals for a schedule built at `monthly_payment`.
///
/// P&I recombine to the level payment every period, so their total is taken
/// from the payment directly; PMI varies and is summed. Fails with
/// `InvalidInput` when the total leaves decimal range.
pub fn lifetime_totals(
    schedule: &[PaymentRecord],
    monthly_payment: Money,
) -> MortgageResult<LifetimeTotals> {
    let mut total_principal = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_pmi = Decimal::ZERO;

    for r in schedule {
        total_principal += r.principal;
        total_interest += r.interest;
        total_pmi += r.pmi;
    }

    let total_paid = Decimal::from(schedule.len() as u64)
        .checked_mul(monthly_payment)
        .and_then(|loan_total| loan_total.checked_add(total_pmi))
        .ok_or_else(|| MortgageError::invalid("monthly_payment", "lifetime total exceeds decimal range"))?;

    Ok(LifetimeTotals {
        total_paid,
        total_principal,
        total_interest,
        total_pmi,
        pmi_periods: pmi_active_periods(schedule),
    })
}

/// Build the summary for a snapshot and its schedule.
pub fn summarize(
    snapshot: &InputSnapshot,
    monthly_payment: Money,
    schedule: &[PaymentRecord],
) -> MortgageResult<MortgageSummary> {
    let totals = lifetime_totals(schedule, monthly_payment)?;
    let extras = snapshot.monthly_extras();

    let pmi_applies = !snapshot.pmi_monthly.is_zero()
        && snapshot.down_payment_fraction() < snapshot.pmi_equity_threshold;

    let lifetime_total = if monthly_payment.is_zero() {
        Decimal::ZERO
    } else {
        totals.total_paid
    };

    let debt_to_income = if snapshot.annual_income.is_zero() {
        None
    } else {
        let obligations = snapshot.monthly_debt + monthly_payment + extras + snapshot.pmi_monthly;
        Some(obligations * dec!(12) / snapshot.annual_income)
    };

    let property_tax_per_thousand = if snapshot.home_value.is_zero() {
        None
    } else {
        Some(snapshot.property_tax * dec!(12) / snapshot.home_value * dec!(1000))
    };

    let pmi_total_cost = Decimal::from(totals.pmi_periods)
        .checked_mul(snapshot.pmi_monthly)
        .ok_or_else(|| MortgageError::invalid("pmi_monthly", "PMI total exceeds decimal range"))?;

    Ok(MortgageSummary {
        loan_amount: snapshot.loan_amount(),
        monthly_principal_and_interest: monthly_payment,
        monthly_extras: extras,
        monthly_payment: monthly_payment + extras,
        monthly_payment_with_pmi: monthly_payment + extras + snapshot.pmi_monthly,
        pmi_applies,
        pmi_periods: totals.pmi_periods,
        pmi_duration: format_month_count(totals.pmi_periods),
        pmi_total_cost,
        lifetime_total,
        upfront_cost: snapshot.down_payment + snapshot.closing_cost,
        debt_to_income,
        property_tax_per_thousand,
    })
}

/// "2y 6mo" style label; years are omitted under twelve months.
pub fn format_month_count(months: u32) -> String {
    if months >= 12 {
        format!("{}y {}mo", months / 12, months % 12)
    } else {
        format!("{}mo", months)
    }
}
