//! Level monthly payment for a fully amortizing fixed-rate loan.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::MortgageError;
use crate::inputs::InputSnapshot;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Level principal + interest payment.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is zero.
/// When `(1+r)^n` exceeds decimal range the payment converges to `P * r`.
pub fn monthly_payment(principal: Money, periodic_rate: Rate, periods: u32) -> MortgageResult<Money> {
    if principal < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be non-negative".into(),
        });
    }
    if periodic_rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "periodic_rate".into(),
            reason: "Periodic rate must be non-negative".into(),
        });
    }
    if periods == 0 {
        return Err(MortgageError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = match (Decimal::ONE + periodic_rate).checked_powu(u64::from(periods)) {
        Some(f) => f,
        None => return Ok(principal * periodic_rate),
    };

    // Same quantity as r * f / (f - 1), arranged so P * f cannot overflow.
    let annuity_denominator = Decimal::ONE - Decimal::ONE / factor;
    if annuity_denominator.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "monthly payment annuity factor".into(),
        });
    }

    Ok(principal * periodic_rate / annuity_denominator)
}

/// Level payment for a snapshot; exactly zero when nothing is borrowed.
pub fn level_payment(snapshot: &InputSnapshot) -> MortgageResult<Money> {
    let loan = snapshot.loan_amount();
    if loan.is_zero() || snapshot.period_count() == 0 {
        return Ok(Decimal::ZERO);
    }
    monthly_payment(loan, snapshot.periodic_rate(), snapshot.period_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_standard_thirty_year() {
        let pmt = monthly_payment(dec!(240_000), dec!(0.005), 360).unwrap();
        assert_close(pmt, dec!(1438.92), dec!(0.01), "240k @ 6% / 30y");
    }

    #[test]
    fn test_fifteen_year() {
        // 200k @ 4.5% over 15 years: 1529.99
        let pmt = monthly_payment(dec!(200_000), dec!(0.045) / dec!(12), 180).unwrap();
        assert_close(pmt, dec!(1529.99), dec!(0.01), "200k @ 4.5% / 15y");
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = monthly_payment(dec!(240_000), Decimal::ZERO, 360).unwrap();
        assert_eq!(pmt, dec!(240_000) / dec!(360));
    }

    #[test]
    fn test_zero_principal() {
        let pmt = monthly_payment(Decimal::ZERO, dec!(0.005), 360).unwrap();
        assert_eq!(pmt, Decimal::ZERO);
    }

    #[test]
    fn test_single_period_repays_with_interest() {
        let pmt = monthly_payment(dec!(1000), dec!(0.01), 1).unwrap();
        assert_close(pmt, dec!(1010), dec!(0.0000001), "one period");
    }

    #[test]
    fn test_extreme_rate_converges_to_interest_only() {
        // (1 + 1/12)^12000 is far outside decimal range.
        let r = Decimal::ONE / dec!(12);
        let pmt = monthly_payment(dec!(100_000), r, 12_000).unwrap();
        assert_close(pmt, dec!(100_000) * r, dec!(0.01), "interest-only limit");
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = monthly_payment(dec!(-1), dec!(0.005), 360).unwrap_err();
        match err {
            MortgageError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(monthly_payment(dec!(1000), dec!(-0.001), 360).is_err());
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(monthly_payment(dec!(1000), dec!(0.005), 0).is_err());
    }

    #[test]
    fn test_level_payment_zero_when_fully_paid_down() {
        let snap = InputSnapshot {
            price: dec!(300_000),
            down_payment: dec!(300_000),
            annual_rate: dec!(0.07),
            ..Default::default()
        };
        assert_eq!(level_payment(&snap).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_level_payment_uses_snapshot_terms() {
        let snap = InputSnapshot {
            price: dec!(300_000),
            down_payment: dec!(60_000),
            annual_rate: dec!(0.06),
            term_years: 30,
            ..Default::default()
        };
        assert_close(level_payment(&snap).unwrap(), dec!(1438.92), dec!(0.01), "snapshot");
    }
}
