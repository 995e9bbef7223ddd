//! Mortgage inputs: the raw optional form schema and the resolved snapshot.
//!
//! `MortgageInputs` mirrors what a calculator form provides: every field is
//! optional, some quantities can be given either as an absolute amount or as a
//! fraction, and several fields fall back to documented defaults. Resolution
//! clamps everything into range and produces an immutable `InputSnapshot`,
//! which is the only thing the engine ever reads.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, PaymentCategory, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Loan term used when none is supplied.
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Longest loan term accepted; resolution clamps to it.
pub const MAX_TERM_YEARS: u32 = 100;

/// Equity fraction of the purchase price at which PMI stops, when none is supplied.
pub const DEFAULT_PMI_EQUITY_THRESHOLD: Rate = dec!(0.22);

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

/// Raw mortgage inputs. Absent fields count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageInputs {
    /// Purchase price.
    pub price: Option<Money>,
    /// Assessed home value for property tax; falls back to the price.
    pub home_value: Option<Money>,
    /// Monthly HOA dues.
    pub hoa: Option<Money>,
    /// Down payment as a fraction of price (0.20 = 20%). Takes precedence over
    /// `down_payment` when it resolves to a non-zero amount.
    pub down_payment_fraction: Option<Rate>,
    /// Down payment as an absolute amount.
    pub down_payment: Option<Money>,
    /// Annual interest rate.
    pub annual_rate: Option<Rate>,
    /// Monthly private mortgage insurance premium.
    pub pmi_monthly: Option<Money>,
    /// Equity fraction of price at which PMI stops.
    pub pmi_equity_threshold: Option<Rate>,
    /// Monthly property tax. Takes precedence over `property_tax_rate`.
    pub property_tax: Option<Money>,
    /// Annual property tax as a fraction of home value.
    pub property_tax_rate: Option<Rate>,
    /// Monthly homeowner's insurance premium.
    pub homeowners_insurance: Option<Money>,
    /// One-off closing costs.
    pub closing_cost: Option<Money>,
    /// Loan term in years.
    pub term_years: Option<u32>,
    /// Gross annual income, for debt-to-income.
    pub annual_income: Option<Money>,
    /// Other monthly debt obligations, for debt-to-income.
    pub monthly_debt: Option<Money>,
    /// Categories accumulated by the cumulative chart. Defaults to
    /// principal, interest and PMI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_categories: Option<Vec<PaymentCategory>>,
}

impl MortgageInputs {
    /// Clamp every field into range and apply defaults.
    pub fn resolve(&self) -> InputSnapshot {
        let price = non_negative(self.price);
        let home_value = match non_negative(self.home_value) {
            v if v.is_zero() => price,
            v => v,
        };

        let down_from_fraction = unit_interval(self.down_payment_fraction) * price;
        let down_payment = if down_from_fraction.is_zero() {
            or_zero(self.down_payment).clamp(Decimal::ZERO, price)
        } else {
            down_from_fraction
        };

        let pmi_equity_threshold = match unit_interval(self.pmi_equity_threshold) {
            t if t.is_zero() => DEFAULT_PMI_EQUITY_THRESHOLD,
            t => t,
        };

        let property_tax = match non_negative(self.property_tax) {
            t if t.is_zero() => {
                unit_interval(self.property_tax_rate) * home_value / MONTHS_PER_YEAR
            }
            t => t,
        };

        let term_years = match self.term_years {
            Some(t) if t > 0 => t.min(MAX_TERM_YEARS),
            _ => DEFAULT_TERM_YEARS,
        };

        InputSnapshot {
            price,
            home_value,
            down_payment,
            annual_rate: unit_interval(self.annual_rate),
            term_years,
            hoa: non_negative(self.hoa),
            property_tax,
            homeowners_insurance: non_negative(self.homeowners_insurance),
            pmi_monthly: non_negative(self.pmi_monthly),
            pmi_equity_threshold,
            closing_cost: non_negative(self.closing_cost),
            annual_income: non_negative(self.annual_income),
            monthly_debt: non_negative(self.monthly_debt),
        }
    }

    /// Categories to accumulate, falling back to the loan-cost set.
    pub fn cumulative_categories(&self) -> Vec<PaymentCategory> {
        self.cumulative_categories
            .clone()
            .unwrap_or_else(|| PaymentCategory::LOAN_COSTS.to_vec())
    }
}

fn or_zero(v: Option<Decimal>) -> Decimal {
    v.unwrap_or(Decimal::ZERO)
}

fn non_negative(v: Option<Decimal>) -> Decimal {
    or_zero(v).max(Decimal::ZERO)
}

fn unit_interval(v: Option<Decimal>) -> Decimal {
    or_zero(v).clamp(Decimal::ZERO, Decimal::ONE)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable numeric inputs for one recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub price: Money,
    pub home_value: Money,
    pub down_payment: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    /// Monthly HOA dues.
    pub hoa: Money,
    /// Monthly property tax.
    pub property_tax: Money,
    /// Monthly homeowner's insurance.
    pub homeowners_insurance: Money,
    pub pmi_monthly: Money,
    pub pmi_equity_threshold: Rate,
    pub closing_cost: Money,
    pub annual_income: Money,
    pub monthly_debt: Money,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        InputSnapshot {
            price: Decimal::ZERO,
            home_value: Decimal::ZERO,
            down_payment: Decimal::ZERO,
            annual_rate: Decimal::ZERO,
            term_years: DEFAULT_TERM_YEARS,
            hoa: Decimal::ZERO,
            property_tax: Decimal::ZERO,
            homeowners_insurance: Decimal::ZERO,
            pmi_monthly: Decimal::ZERO,
            pmi_equity_threshold: DEFAULT_PMI_EQUITY_THRESHOLD,
            closing_cost: Decimal::ZERO,
            annual_income: Decimal::ZERO,
            monthly_debt: Decimal::ZERO,
        }
    }
}

impl InputSnapshot {
    pub fn loan_amount(&self) -> Money {
        self.price - self.down_payment
    }

    /// Number of monthly payments.
    pub fn period_count(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate / MONTHS_PER_YEAR
    }

    /// Down payment as a fraction of price; zero when the price is zero.
    pub fn down_payment_fraction(&self) -> Rate {
        if self.price.is_zero() {
            Decimal::ZERO
        } else {
            self.down_payment / self.price
        }
    }

    /// Equity level below which PMI is charged.
    pub fn pmi_equity_target(&self) -> Money {
        self.pmi_equity_threshold * self.price
    }

    /// HOA + property tax + homeowner's insurance.
    pub fn monthly_extras(&self) -> Money {
        self.hoa + self.property_tax + self.homeowners_insurance
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> MortgageResult<()> {
        let non_negative = [
            ("price", self.price),
            ("home_value", self.home_value),
            ("down_payment", self.down_payment),
            ("hoa", self.hoa),
            ("property_tax", self.property_tax),
            ("homeowners_insurance", self.homeowners_insurance),
            ("pmi_monthly", self.pmi_monthly),
            ("closing_cost", self.closing_cost),
            ("annual_income", self.annual_income),
            ("monthly_debt", self.monthly_debt),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(MortgageError::invalid(field, "must be non-negative"));
            }
        }

        if self.down_payment > self.price {
            return Err(MortgageError::invalid(
                "down_payment",
                "cannot exceed the purchase price",
            ));
        }
        if self.annual_rate < Decimal::ZERO || self.annual_rate > Decimal::ONE {
            return Err(MortgageError::invalid("annual_rate", "must be within [0, 1]"));
        }
        if self.term_years == 0 {
            return Err(MortgageError::invalid("term_years", "must be positive"));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(MortgageError::invalid(
                "term_years",
                format!("must not exceed {} years", MAX_TERM_YEARS),
            ));
        }
        if self.pmi_equity_threshold <= Decimal::ZERO || self.pmi_equity_threshold > Decimal::ONE {
            return Err(MortgageError::invalid(
                "pmi_equity_threshold",
                "must be within (0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_inputs_resolve_to_defaults() {
        let snap = MortgageInputs::default().resolve();
        assert_eq!(snap, InputSnapshot::default());
        assert_eq!(snap.period_count(), 360);
        assert_eq!(snap.pmi_equity_threshold, dec!(0.22));
    }

    #[test]
    fn test_down_payment_fraction_takes_precedence() {
        let inputs = MortgageInputs {
            price: Some(dec!(400_000)),
            down_payment_fraction: Some(dec!(0.10)),
            down_payment: Some(dec!(100_000)),
            ..Default::default()
        };
        assert_eq!(inputs.resolve().down_payment, dec!(40_000));
    }

    #[test]
    fn test_absolute_down_payment_clamped_to_price() {
        let inputs = MortgageInputs {
            price: Some(dec!(200_000)),
            down_payment: Some(dec!(250_000)),
            ..Default::default()
        };
        let snap = inputs.resolve();
        assert_eq!(snap.down_payment, dec!(200_000));
        assert_eq!(snap.loan_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_fields_clamped_to_zero() {
        let inputs = MortgageInputs {
            price: Some(dec!(-5)),
            hoa: Some(dec!(-100)),
            annual_rate: Some(dec!(-0.02)),
            pmi_monthly: Some(dec!(-1)),
            ..Default::default()
        };
        let snap = inputs.resolve();
        assert_eq!(snap.price, Decimal::ZERO);
        assert_eq!(snap.hoa, Decimal::ZERO);
        assert_eq!(snap.annual_rate, Decimal::ZERO);
        assert_eq!(snap.pmi_monthly, Decimal::ZERO);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_rate_clamped_to_one() {
        let inputs = MortgageInputs {
            annual_rate: Some(dec!(6.5)),
            ..Default::default()
        };
        assert_eq!(inputs.resolve().annual_rate, Decimal::ONE);
    }

    #[test]
    fn test_property_tax_from_rate_uses_home_value() {
        let inputs = MortgageInputs {
            price: Some(dec!(300_000)),
            home_value: Some(dec!(240_000)),
            property_tax_rate: Some(dec!(0.012)),
            ..Default::default()
        };
        // 240k * 1.2% / 12 = 240
        assert_eq!(inputs.resolve().property_tax, dec!(240));
    }

    #[test]
    fn test_property_tax_rate_falls_back_to_price() {
        let inputs = MortgageInputs {
            price: Some(dec!(300_000)),
            property_tax_rate: Some(dec!(0.01)),
            ..Default::default()
        };
        let snap = inputs.resolve();
        assert_eq!(snap.home_value, dec!(300_000));
        assert_eq!(snap.property_tax, dec!(250));
    }

    #[test]
    fn test_absolute_property_tax_wins() {
        let inputs = MortgageInputs {
            price: Some(dec!(300_000)),
            property_tax: Some(dec!(410)),
            property_tax_rate: Some(dec!(0.01)),
            ..Default::default()
        };
        assert_eq!(inputs.resolve().property_tax, dec!(410));
    }

    #[test]
    fn test_zero_term_uses_default() {
        let inputs = MortgageInputs {
            term_years: Some(0),
            ..Default::default()
        };
        assert_eq!(inputs.resolve().term_years, DEFAULT_TERM_YEARS);
    }

    #[test]
    fn test_huge_term_clamped_to_max() {
        let inputs = MortgageInputs {
            price: Some(dec!(300_000)),
            term_years: Some(400_000_000),
            ..Default::default()
        };
        let snap = inputs.resolve();
        assert_eq!(snap.term_years, MAX_TERM_YEARS);
        assert_eq!(snap.period_count(), 1200);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_term_above_max() {
        let snap = InputSnapshot {
            term_years: MAX_TERM_YEARS + 1,
            ..Default::default()
        };
        match snap.validate() {
            Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        let max = InputSnapshot {
            term_years: MAX_TERM_YEARS,
            ..Default::default()
        };
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_derived_values() {
        let snap = InputSnapshot {
            price: dec!(300_000),
            down_payment: dec!(60_000),
            annual_rate: dec!(0.06),
            term_years: 15,
            ..Default::default()
        };
        assert_eq!(snap.loan_amount(), dec!(240_000));
        assert_eq!(snap.period_count(), 180);
        assert_eq!(snap.periodic_rate(), dec!(0.005));
        assert_eq!(snap.down_payment_fraction(), dec!(0.2));
        assert_eq!(snap.pmi_equity_target(), dec!(66_000));
    }

    #[test]
    fn test_validate_rejects_down_payment_above_price() {
        let snap = InputSnapshot {
            price: dec!(100),
            down_payment: dec!(150),
            ..Default::default()
        };
        match snap.validate() {
            Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, "down_payment"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let snap = InputSnapshot {
            pmi_equity_threshold: Decimal::ZERO,
            ..Default::default()
        };
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_inputs_deserialize_from_partial_json() {
        let inputs: MortgageInputs =
            serde_json::from_str(r#"{"price": 350000, "annual_rate": "0.055", "term_years": 15}"#)
                .unwrap();
        assert_eq!(inputs.price, Some(dec!(350000)));
        assert_eq!(inputs.annual_rate, Some(dec!(0.055)));
        assert_eq!(inputs.term_years, Some(15));
        assert_eq!(inputs.hoa, None);
        assert_eq!(
            inputs.cumulative_categories(),
            PaymentCategory::LOAN_COSTS.to_vec()
        );
    }
}
