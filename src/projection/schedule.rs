//! Time-varying expected return and volatility per asset class.
//!
//! Bitcoin follows three regimes keyed by 1-based year:
//!
//! | years  | return                   | volatility               |
//! |--------|--------------------------|--------------------------|
//! | 1-5    | 0.42 - 0.03 (y - 1)      | 0.50 - 0.02 (y - 1)      |
//! | 6-15   | 0.23 - 0.002 (y - 5)     | 0.40 - 0.019 (y - 5)     |
//! | 16+    | long-run CAGR            | long-run CAGR            |
//!
//! The long-run CAGR is the rate that takes Bitcoin from $100k to $21M in
//! 21 years. Every other asset uses a constant.

use serde::{Deserialize, Serialize};

use crate::core::error::{HypercoinError, Result};
use crate::core::types::{AssetClass, AssetVector, Price, Rate};

/// Long-run Bitcoin price target.
pub const BTC_TARGET_PRICE: Price = 21_000_000.0;
/// Reference price the long-run CAGR starts from.
pub const BTC_REFERENCE_PRICE: Price = 100_000.0;
/// Years to reach the target.
pub const BTC_YEARS_TO_TARGET: f64 = 21.0;

/// CAGR from the reference price to the target price.
pub fn long_term_btc_cagr() -> Rate {
    (BTC_TARGET_PRICE / BTC_REFERENCE_PRICE).powf(1.0 / BTC_YEARS_TO_TARGET) - 1.0
}

/// Bitcoin market regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    /// Years 1-5.
    EarlyAdoption,
    /// Years 6-15.
    Maturation,
    /// Year 16 onwards.
    Mature,
}

impl Regime {
    /// Regime for a 1-based year. Year 0 is treated as year 1.
    pub fn for_year(year: u32) -> Self {
        match year {
            0..=5 => Regime::EarlyAdoption,
            6..=15 => Regime::Maturation,
            _ => Regime::Mature,
        }
    }
}

/// Expected annual return of `asset` during 1-based `year`.
pub fn annual_return(asset: AssetClass, year: u32) -> Rate {
    match asset {
        AssetClass::Bitcoin => {
            let y = year.max(1) as f64;
            match Regime::for_year(year) {
                Regime::EarlyAdoption => 0.42 - 0.03 * (y - 1.0),
                Regime::Maturation => 0.23 - 0.002 * (y - 5.0),
                Regime::Mature => long_term_btc_cagr(),
            }
        }
        AssetClass::EquityIndex => 0.10,
        AssetClass::Treasury => 0.04,
        AssetClass::YieldInstrument => 0.12,
        AssetClass::CashEquivalent => 0.045,
    }
}

/// Expected annual volatility of `asset` during 1-based `year`.
pub fn annual_volatility(asset: AssetClass, year: u32) -> Rate {
    match asset {
        AssetClass::Bitcoin => {
            let y = year.max(1) as f64;
            match Regime::for_year(year) {
                Regime::EarlyAdoption => 0.50 - 0.02 * (y - 1.0),
                Regime::Maturation => 0.40 - 0.019 * (y - 5.0),
                Regime::Mature => long_term_btc_cagr(),
            }
        }
        AssetClass::EquityIndex => 0.16,
        AssetClass::Treasury => 0.05,
        AssetClass::YieldInstrument => 0.02,
        AssetClass::CashEquivalent => 0.01,
    }
}

fn horizon_average(horizon_years: u32, rate: fn(AssetClass, u32) -> Rate) -> Result<AssetVector> {
    if horizon_years == 0 {
        return Err(HypercoinError::out_of_range(
            "horizon_years",
            0.0,
            1.0,
            f64::INFINITY,
        ));
    }
    let n = horizon_years as f64;
    Ok(AssetVector::from_fn(|asset| {
        (1..=horizon_years).map(|y| rate(asset, y)).sum::<f64>() / n
    }))
}

/// Arithmetic mean of each asset's yearly return over the horizon.
pub fn average_returns(horizon_years: u32) -> Result<AssetVector> {
    horizon_average(horizon_years, annual_return)
}

/// Arithmetic mean of each asset's yearly volatility over the horizon.
pub fn average_volatilities(horizon_years: u32) -> Result<AssetVector> {
    horizon_average(horizon_years, annual_volatility)
}

/// Bitcoin's return for each year 1..=horizon.
pub fn yearly_btc_returns(horizon_years: u32) -> Vec<Rate> {
    (1..=horizon_years)
        .map(|y| annual_return(AssetClass::Bitcoin, y))
        .collect()
}

/// Fixed pairwise correlations between asset classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationMatrix {
    values: [[f64; 5]; 5],
}

impl CorrelationMatrix {
    /// The model's static correlation assumptions.
    pub const fn standard() -> Self {
        // BTC, equity, treasury, yield instrument, cash
        Self {
            values: [
                [1.0, 0.3, -0.1, 0.7, 0.0],
                [0.3, 1.0, -0.2, 0.2, 0.1],
                [-0.1, -0.2, 1.0, -0.1, 0.0],
                [0.7, 0.2, -0.1, 1.0, 0.0],
                [0.0, 0.1, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[inline]
    pub fn get(&self, a: AssetClass, b: AssetClass) -> f64 {
        self.values[a.index()][b.index()]
    }
}

impl Default for CorrelationMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_term_cagr() {
        assert!((long_term_btc_cagr() - 0.289976715395158).abs() < 1e-12);
    }

    #[test]
    fn test_btc_return_regime_edges() {
        let r = |y| annual_return(AssetClass::Bitcoin, y);
        assert!((r(1) - 0.42).abs() < 1e-12);
        assert!((r(5) - 0.30).abs() < 1e-12);
        assert!((r(6) - 0.228).abs() < 1e-12);
        assert!((r(15) - 0.21).abs() < 1e-12);
        assert!((r(16) - long_term_btc_cagr()).abs() < 1e-12);
        assert!((r(40) - long_term_btc_cagr()).abs() < 1e-12);
    }

    #[test]
    fn test_btc_volatility_regime_edges() {
        let v = |y| annual_volatility(AssetClass::Bitcoin, y);
        assert!((v(1) - 0.50).abs() < 1e-12);
        assert!((v(5) - 0.42).abs() < 1e-12);
        assert!((v(6) - 0.381).abs() < 1e-12);
        assert!((v(15) - 0.21).abs() < 1e-12);
        assert!((v(16) - long_term_btc_cagr()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_assets() {
        for year in [1, 6, 16] {
            assert_eq!(annual_return(AssetClass::EquityIndex, year), 0.10);
            assert_eq!(annual_volatility(AssetClass::CashEquivalent, year), 0.01);
        }
    }

    #[test]
    fn test_average_over_horizon() {
        let returns = average_returns(2).unwrap();
        assert!((returns.btc - (0.42 + 0.39) / 2.0).abs() < 1e-12);
        assert!((returns.treasury - 0.04).abs() < 1e-12);
        assert!(average_returns(0).is_err());
        assert!(average_volatilities(0).is_err());
    }

    #[test]
    fn test_correlation_symmetric() {
        let m = CorrelationMatrix::standard();
        for a in AssetClass::ALL {
            assert_eq!(m.get(a, a), 1.0);
            for b in AssetClass::ALL {
                assert_eq!(m.get(a, b), m.get(b, a));
            }
        }
        assert_eq!(m.get(AssetClass::Bitcoin, AssetClass::YieldInstrument), 0.7);
    }
}
