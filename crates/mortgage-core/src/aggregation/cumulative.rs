//! Running totals per payment category.

use crate::amortization::schedule::PaymentRecord;
use crate::types::PaymentCategory;

/// Same shape as a schedule; accumulated categories hold running sums.
pub type CumulativeSeries = Vec<PaymentRecord>;

/// Accumulate the given categories across the schedule.
///
/// For each category in `fields`, `out[0] = schedule[0]` and
/// `out[i] = out[i-1] + schedule[i]`. Categories not listed keep their
/// per-period value, so a chart can mix "paid so far" series with flat
/// recurring charges.
pub fn cumulative_sum_by_fields(
    schedule: &[PaymentRecord],
    fields: &[PaymentCategory],
) -> CumulativeSeries {
    let accumulated: Vec<PaymentCategory> = PaymentCategory::ALL
        .into_iter()
        .filter(|c| fields.contains(c))
        .collect();
    let mut out: CumulativeSeries = Vec::with_capacity(schedule.len());

    for record in schedule {
        let mut next = *record;
        if let Some(prev) = out.last() {
            for &field in &accumulated {
                *next.value_mut(field) += prev.value(field);
            }
        }
        out.push(next);
    }

    out
}
