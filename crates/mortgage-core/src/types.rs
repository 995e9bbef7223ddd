use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// A line item of the monthly housing payment.
///
/// Variant order is the canonical stacking order used by the charts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    Principal,
    Interest,
    Hoa,
    PropertyTax,
    HomeownersInsurance,
    Pmi,
}

impl PaymentCategory {
    /// Every category in stacking order.
    pub const ALL: [PaymentCategory; 6] = [
        PaymentCategory::Principal,
        PaymentCategory::Interest,
        PaymentCategory::Hoa,
        PaymentCategory::PropertyTax,
        PaymentCategory::HomeownersInsurance,
        PaymentCategory::Pmi,
    ];

    /// Categories that make up the "total paid so far" chart.
    pub const LOAN_COSTS: [PaymentCategory; 3] = [
        PaymentCategory::Principal,
        PaymentCategory::Interest,
        PaymentCategory::Pmi,
    ];

    /// Human-readable label for legends and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            PaymentCategory::Principal => "Principal",
            PaymentCategory::Interest => "Interest",
            PaymentCategory::Hoa => "HOA",
            PaymentCategory::PropertyTax => "Property Tax",
            PaymentCategory::HomeownersInsurance => "Homeowner's Insurance",
            PaymentCategory::Pmi => "PMI",
        }
    }

    /// Chart fill color (hex, no alpha).
    pub fn color(self) -> &'static str {
        match self {
            PaymentCategory::Principal => "#1f77b4",
            PaymentCategory::Interest => "#ff7f0e",
            PaymentCategory::Hoa => "#bcbd22",
            PaymentCategory::PropertyTax => "#17becf",
            PaymentCategory::HomeownersInsurance => "#9467bd",
            PaymentCategory::Pmi => "#7f7f7f",
        }
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
