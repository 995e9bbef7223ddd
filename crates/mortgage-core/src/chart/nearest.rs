//! Nearest-period lookup for pointer-driven tooltips.

use serde::{Deserialize, Serialize};

use crate::amortization::schedule::PaymentRecord;

/// Anything laid out along the month axis.
pub trait MonthIndexed {
    fn month(&self) -> u32;
}

impl MonthIndexed for PaymentRecord {
    fn month(&self) -> u32 {
        self.month
    }
}

/// Record whose month is closest to `query_month`.
///
/// `series` must be sorted by month, strictly increasing. Lower-bound
/// bisection finds the insertion point; between the two neighbours the later
/// one wins only when strictly closer. Queries before the first or after the
/// last month clamp to the ends. `None` only for an empty series.
pub fn nearest_period<T: MonthIndexed>(series: &[T], query_month: f64) -> Option<&T> {
    let idx = series.partition_point(|r| f64::from(r.month()) < query_month);

    if idx == 0 {
        return series.first();
    }
    if idx == series.len() {
        return series.last();
    }

    let before = &series[idx - 1];
    let after = &series[idx];
    if query_month - f64::from(before.month()) > f64::from(after.month()) - query_month {
        Some(after)
    } else {
        Some(before)
    }
}

/// Linear mapping between the month domain of a series and a pixel range
/// starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthScale {
    pub first_month: f64,
    pub last_month: f64,
    pub width: f64,
}

impl MonthScale {
    /// Scale spanning the first and last month of `series`.
    pub fn for_series<T: MonthIndexed>(series: &[T], width: f64) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;
        Some(MonthScale {
            first_month: f64::from(first.month()),
            last_month: f64::from(last.month()),
            width,
        })
    }

    pub fn to_pixel(&self, month: f64) -> f64 {
        let span = self.last_month - self.first_month;
        if span == 0.0 {
            return 0.0;
        }
        (month - self.first_month) / span * self.width
    }

    /// Month under a pixel position.
    pub fn invert(&self, px: f64) -> f64 {
        if self.width == 0.0 {
            return self.first_month;
        }
        self.first_month + px / self.width * (self.last_month - self.first_month)
    }
}

/// Record under a horizontal pointer position.
pub fn nearest_at_pixel<'a, T: MonthIndexed>(
    series: &'a [T],
    scale: &MonthScale,
    px: f64,
) -> Option<&'a T> {
    nearest_period(series, scale.invert(px))
}
