//! Per-period amortization schedule with equity-driven PMI cutoff.
//!
//! Equity starts at the down payment and grows by each period's principal.
//! PMI is charged for a period when the equity carried *into* that period is
//! still below `pmi_equity_threshold * price`, so the premium drops one period
//! after equity crosses the threshold, never mid-period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::InputSnapshot;
use crate::types::{Money, PaymentCategory};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One month of the payment schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Month number (1-indexed).
    pub month: u32,
    pub principal: Money,
    pub interest: Money,
    pub hoa: Money,
    pub property_tax: Money,
    pub homeowners_insurance: Money,
    pub pmi: Money,
}

/// Ordered payment records, index = month - 1.
pub type Schedule = Vec<PaymentRecord>;

impl PaymentRecord {
    pub fn value(&self, category: PaymentCategory) -> Money {
        match category {
            PaymentCategory::Principal => self.principal,
            PaymentCategory::Interest => self.interest,
            PaymentCategory::Hoa => self.hoa,
            PaymentCategory::PropertyTax => self.property_tax,
            PaymentCategory::HomeownersInsurance => self.homeowners_insurance,
            PaymentCategory::Pmi => self.pmi,
        }
    }

    pub fn value_mut(&mut self, category: PaymentCategory) -> &mut Money {
        match category {
            PaymentCategory::Principal => &mut self.principal,
            PaymentCategory::Interest => &mut self.interest,
            PaymentCategory::Hoa => &mut self.hoa,
            PaymentCategory::PropertyTax => &mut self.property_tax,
            PaymentCategory::HomeownersInsurance => &mut self.homeowners_insurance,
            PaymentCategory::Pmi => &mut self.pmi,
        }
    }

    /// Principal + interest.
    pub fn loan_payment(&self) -> Money {
        self.principal + self.interest
    }

    /// Everything paid this month.
    pub fn total(&self) -> Money {
        PaymentCategory::ALL.iter().map(|c| self.value(*c)).sum()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Build the full schedule for a snapshot at a given level payment.
///
/// Returns an empty schedule when the snapshot has no periods. The snapshot
/// is expected to have passed `InputSnapshot::validate`, which bounds the term.
pub fn build_schedule(snapshot: &InputSnapshot, monthly_payment: Money) -> Schedule {
    let periods = snapshot.period_count();
    let periodic_rate = snapshot.periodic_rate();
    let pmi_target = snapshot.pmi_equity_target();

    let mut equity = snapshot.down_payment;
    let mut schedule = Vec::with_capacity(periods as usize);

    for month in 1..=periods {
        let outstanding = snapshot.price - equity;
        let interest = periodic_rate * outstanding;
        let principal = monthly_payment - interest;

        // Pre-update equity decides this month's premium.
        let pmi = if equity < pmi_target {
            snapshot.pmi_monthly
        } else {
            Decimal::ZERO
        };

        schedule.push(PaymentRecord {
            month,
            principal,
            interest,
            hoa: snapshot.hoa,
            property_tax: snapshot.property_tax,
            homeowners_insurance: snapshot.homeowners_insurance,
            pmi,
        });

        equity += principal;
    }

    schedule
}

/// Equity at the end of each period: down payment plus principal paid so far.
pub fn equity_timeline(snapshot: &InputSnapshot, schedule: &[PaymentRecord]) -> Vec<Money> {
    schedule
        .iter()
        .scan(snapshot.down_payment, |equity, record| {
            *equity += record.principal;
            Some(*equity)
        })
        .collect()
}
