//! Fixed-rate mortgage amortization.
//!
//! A zero interest rate, or one too small to compound over the term,
//! amortizes in a straight line (`P / n` per payment) instead of dividing
//! by the rate.

use serde::{Deserialize, Serialize};

use crate::core::error::{HypercoinError, Result};
use crate::core::types::{Price, Rate, MONTHS_PER_YEAR};

/// Payments in the fixed 30-year term.
pub const MORTGAGE_TERM_PAYMENTS: u32 = 30 * MONTHS_PER_YEAR as u32;

/// `(1 + r)^n - 1` without cancellation for tiny `r`. Zero when `r` is zero
/// or too small to register over `n` periods.
#[inline]
fn compound_growth_minus_one(monthly_rate: Rate, periods: f64) -> f64 {
    (periods * monthly_rate.ln_1p()).exp_m1()
}

/// Level payment for principal `p`, monthly rate `r`, `n` payments.
pub fn monthly_payment(principal: Price, monthly_rate: Rate, num_payments: u32) -> Price {
    if num_payments == 0 {
        return 0.0;
    }
    let n = num_payments as f64;
    let growth_minus_one = compound_growth_minus_one(monthly_rate, n);
    if growth_minus_one == 0.0 {
        return principal / n;
    }
    principal * monthly_rate * (growth_minus_one + 1.0) / growth_minus_one
}

/// Outstanding balance after `payments_made` level payments.
pub fn remaining_balance(
    principal: Price,
    monthly_rate: Rate,
    num_payments: u32,
    payments_made: u32,
) -> Price {
    if payments_made >= num_payments {
        return 0.0;
    }
    let payment = monthly_payment(principal, monthly_rate, num_payments);
    let k = payments_made as f64;
    let growth_minus_one = compound_growth_minus_one(monthly_rate, k);
    if compound_growth_minus_one(monthly_rate, num_payments as f64) == 0.0 {
        return principal - payment * k;
    }
    principal * (growth_minus_one + 1.0) - payment * growth_minus_one / monthly_rate
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number.
    pub payment_number: u32,
    pub interest: Price,
    pub principal: Price,
    /// Balance after this payment.
    pub balance: Price,
}

/// A validated loan: principal, monthly rate and term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageAmortizer {
    pub principal: Price,
    pub monthly_rate: Rate,
    pub num_payments: u32,
}

impl MortgageAmortizer {
    /// 30-year loan at an annual rate given as a decimal fraction.
    pub fn new(principal: Price, annual_rate: Rate) -> Result<Self> {
        Self::with_term(principal, annual_rate / MONTHS_PER_YEAR as f64, MORTGAGE_TERM_PAYMENTS)
    }

    /// Loan with an explicit monthly rate and payment count.
    pub fn with_term(principal: Price, monthly_rate: Rate, num_payments: u32) -> Result<Self> {
        if !(principal >= 0.0) || !principal.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "loan principal must be non-negative",
            ));
        }
        if !(monthly_rate >= 0.0) || !monthly_rate.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "interest rate must be non-negative",
            ));
        }
        if num_payments == 0 {
            return Err(HypercoinError::invalid_parameter(
                "loan term must have at least one payment",
            ));
        }
        Ok(Self {
            principal,
            monthly_rate,
            num_payments,
        })
    }

    /// Principal-and-interest payment.
    #[inline]
    pub fn monthly_payment(&self) -> Price {
        monthly_payment(self.principal, self.monthly_rate, self.num_payments)
    }

    /// Balance after `payments_made` payments; zero once the term is complete.
    #[inline]
    pub fn remaining_balance(&self, payments_made: u32) -> Price {
        remaining_balance(
            self.principal,
            self.monthly_rate,
            self.num_payments,
            payments_made,
        )
    }

    /// Interest paid over the whole term.
    pub fn total_interest(&self) -> Price {
        self.monthly_payment() * self.num_payments as f64 - self.principal
    }

    /// Interest paid in the first `payments_made` payments.
    pub fn interest_paid_through(&self, payments_made: u32) -> Price {
        let k = payments_made.min(self.num_payments);
        let principal_repaid = self.principal - self.remaining_balance(k);
        self.monthly_payment() * k as f64 - principal_repaid
    }

    /// Full payment-by-payment schedule.
    pub fn schedule(&self) -> Vec<AmortizationRow> {
        let payment = self.monthly_payment();
        let mut balance = self.principal;
        (1..=self.num_payments)
            .map(|payment_number| {
                let interest = balance * self.monthly_rate;
                let principal = if payment_number == self.num_payments {
                    balance
                } else {
                    payment - interest
                };
                balance = (balance - principal).max(0.0);
                AmortizationRow {
                    payment_number,
                    interest,
                    principal,
                    balance,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOAN: f64 = 348_000.0;

    #[test]
    fn test_annuity_payment() {
        let loan = MortgageAmortizer::new(LOAN, 0.067).unwrap();
        assert!((loan.monthly_payment() - 2245.5673635795).abs() < 1e-6);
    }

    #[test]
    fn test_balance_endpoints() {
        let loan = MortgageAmortizer::new(LOAN, 0.067).unwrap();
        assert_eq!(loan.remaining_balance(0), LOAN);
        assert_eq!(loan.remaining_balance(360), 0.0);
        assert_eq!(loan.remaining_balance(400), 0.0);
        assert!((loan.remaining_balance(120) - 296_485.927154879).abs() < 1e-4);
    }

    #[test]
    fn test_balance_decreases() {
        let loan = MortgageAmortizer::new(LOAN, 0.05).unwrap();
        let mut prev = loan.remaining_balance(0);
        for k in 1..=360 {
            let b = loan.remaining_balance(k);
            assert!(b < prev);
            prev = b;
        }
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let loan = MortgageAmortizer::with_term(36_000.0, 0.0, 360).unwrap();
        assert!((loan.monthly_payment() - 100.0).abs() < 1e-12);
        assert!((loan.remaining_balance(180) - 18_000.0).abs() < 1e-9);
        assert_eq!(loan.remaining_balance(360), 0.0);
        assert!(loan.total_interest().abs() < 1e-9);
    }

    #[test]
    fn test_tiny_rate_stays_finite() {
        for annual_rate in [1e-15, 1e-300, f64::MIN_POSITIVE] {
            let loan = MortgageAmortizer::new(LOAN, annual_rate).unwrap();
            let payment = loan.monthly_payment();
            assert!(payment.is_finite());
            assert!((payment - LOAN / 360.0).abs() < 1e-6);
            let balance = loan.remaining_balance(120);
            assert!(balance.is_finite());
            assert!((balance - LOAN * 240.0 / 360.0).abs() < 1e-3);
            assert!(loan.total_interest().abs() < 1e-3);
        }
    }

    #[test]
    fn test_interest_accounting() {
        let loan = MortgageAmortizer::new(LOAN, 0.067).unwrap();
        let through_term = loan.interest_paid_through(360);
        assert!((through_term - loan.total_interest()).abs() < 1e-6);

        let schedule = loan.schedule();
        assert_eq!(schedule.len(), 360);
        let first_year: f64 = schedule[..12].iter().map(|r| r.interest).sum();
        assert!((first_year - loan.interest_paid_through(12)).abs() < 1e-6);
        assert!(schedule.last().unwrap().balance.abs() < 1e-6);
    }

    #[test]
    fn test_invalid_loans_rejected() {
        assert!(MortgageAmortizer::new(-1.0, 0.05).is_err());
        assert!(MortgageAmortizer::new(100.0, -0.01).is_err());
        assert!(MortgageAmortizer::with_term(100.0, 0.01, 0).is_err());
    }
}
