//! Category-stacked layers and tooltip category picking.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::PaymentRecord;
use crate::types::{Money, PaymentCategory};

/// Headroom above the tallest point of a chart.
const Y_HEADROOM: Decimal = dec!(1.25);

/// Band of one layer at one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackPoint {
    pub month: u32,
    pub lower: Money,
    pub upper: Money,
}

/// One category's band across the whole schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayer {
    pub category: PaymentCategory,
    pub label: String,
    pub color: String,
    pub points: Vec<StackPoint>,
}

/// How the y axis extent is derived from each month's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentMode {
    /// Layers are stacked: the sum of the keys.
    Sum,
    /// Areas overlap: the largest key.
    Max,
}

/// Stack `keys` bottom-up in the order given, with a zero baseline.
pub fn stack_layers(series: &[PaymentRecord], keys: &[PaymentCategory]) -> Vec<StackLayer> {
    let mut layers: Vec<StackLayer> = keys
        .iter()
        .map(|&category| StackLayer {
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
            points: Vec::with_capacity(series.len()),
        })
        .collect();

    for record in series {
        let mut base = Decimal::ZERO;
        for layer in layers.iter_mut() {
            let top = base + record.value(layer.category);
            layer.points.push(StackPoint {
                month: record.month,
                lower: base,
                upper: top,
            });
            base = top;
        }
    }

    layers
}

/// Index into `keys` of the stacked band containing height `y`.
///
/// Heights above the stack resolve to the last key.
pub fn stacked_category_at(record: &PaymentRecord, keys: &[PaymentCategory], y: Money) -> usize {
    let mut running = Decimal::ZERO;
    for (idx, &key) in keys.iter().enumerate() {
        let value = record.value(key);
        if running + value >= y {
            return idx;
        }
        running += value;
    }
    keys.len().saturating_sub(1)
}

/// Index into `keys` of the overlaid area nearest above height `y`.
///
/// Areas are drawn from zero and overlap, so the smallest value that still
/// reaches `y` is the one visible at that height. Falls back to the largest.
pub fn cumulative_category_at(
    record: &PaymentRecord,
    keys: &[PaymentCategory],
    y: Money,
) -> usize {
    let mut ranked: Vec<(usize, Money)> = keys
        .iter()
        .enumerate()
        .map(|(idx, &key)| (idx, record.value(key)))
        .collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1));

    ranked
        .iter()
        .find(|(_, value)| y <= *value)
        .or_else(|| ranked.last())
        .map(|(idx, _)| *idx)
        .unwrap_or(0)
}

/// Top of the y domain for a chart over `series`.
pub fn y_extent(series: &[PaymentRecord], keys: &[PaymentCategory], mode: ExtentMode) -> Money {
    let peak = series
        .iter()
        .map(|record| {
            let values = keys.iter().map(|&k| record.value(k));
            match mode {
                ExtentMode::Sum => values.sum(),
                ExtentMode::Max => values.max().unwrap_or(Decimal::ZERO),
            }
        })
        .max()
        .unwrap_or(Decimal::ZERO);

    peak * Y_HEADROOM
}
