//! Core data types for Hypercoin.

use serde::{Deserialize, Serialize};

/// Type alias for price and currency values.
pub type Price = f64;

/// Type alias for decimal rates (0.04 = 4%).
pub type Rate = f64;

/// Trading days per year used for path discretization.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Months per year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Asset classes available to the comparison portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Bitcoin.
    Bitcoin,
    /// Broad equity index fund.
    EquityIndex,
    /// Government treasuries.
    Treasury,
    /// Bitcoin-backed yield instrument (preferred stock).
    YieldInstrument,
    /// High-yield savings / cash equivalents.
    CashEquivalent,
}

impl AssetClass {
    /// All asset classes in canonical order.
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Bitcoin,
        AssetClass::EquityIndex,
        AssetClass::Treasury,
        AssetClass::YieldInstrument,
        AssetClass::CashEquivalent,
    ];

    /// Position of the asset in canonical order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            AssetClass::Bitcoin => 0,
            AssetClass::EquityIndex => 1,
            AssetClass::Treasury => 2,
            AssetClass::YieldInstrument => 3,
            AssetClass::CashEquivalent => 4,
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Bitcoin => "BTC",
            AssetClass::EquityIndex => "Equity index",
            AssetClass::Treasury => "Treasuries",
            AssetClass::YieldInstrument => "Yield instrument",
            AssetClass::CashEquivalent => "Cash",
        }
    }
}

/// One value per asset class (weights, returns or volatilities).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetVector {
    pub btc: f64,
    pub equity_index: f64,
    pub treasury: f64,
    pub yield_instrument: f64,
    pub cash_equivalent: f64,
}

impl AssetVector {
    /// Create a vector from values in canonical order.
    pub fn new(
        btc: f64,
        equity_index: f64,
        treasury: f64,
        yield_instrument: f64,
        cash_equivalent: f64,
    ) -> Self {
        Self {
            btc,
            equity_index,
            treasury,
            yield_instrument,
            cash_equivalent,
        }
    }

    /// Build a vector by evaluating `f` for every asset class.
    pub fn from_fn(mut f: impl FnMut(AssetClass) -> f64) -> Self {
        Self {
            btc: f(AssetClass::Bitcoin),
            equity_index: f(AssetClass::EquityIndex),
            treasury: f(AssetClass::Treasury),
            yield_instrument: f(AssetClass::YieldInstrument),
            cash_equivalent: f(AssetClass::CashEquivalent),
        }
    }

    /// Value for one asset class.
    #[inline]
    pub fn get(&self, asset: AssetClass) -> f64 {
        match asset {
            AssetClass::Bitcoin => self.btc,
            AssetClass::EquityIndex => self.equity_index,
            AssetClass::Treasury => self.treasury,
            AssetClass::YieldInstrument => self.yield_instrument,
            AssetClass::CashEquivalent => self.cash_equivalent,
        }
    }

    /// Copy with one asset's value replaced.
    pub fn with(mut self, asset: AssetClass, value: f64) -> Self {
        match asset {
            AssetClass::Bitcoin => self.btc = value,
            AssetClass::EquityIndex => self.equity_index = value,
            AssetClass::Treasury => self.treasury = value,
            AssetClass::YieldInstrument => self.yield_instrument = value,
            AssetClass::CashEquivalent => self.cash_equivalent = value,
        }
        self
    }

    /// Values in canonical order.
    #[inline]
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.btc,
            self.equity_index,
            self.treasury,
            self.yield_instrument,
            self.cash_equivalent,
        ]
    }

    /// Iterate `(asset, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        AssetClass::ALL.iter().map(move |&a| (a, self.get(a)))
    }

    /// Sum of all values.
    pub fn sum(&self) -> f64 {
        self.to_array().iter().sum()
    }

    /// Element-wise product summed (weighted sum).
    pub fn dot(&self, other: &AssetVector) -> f64 {
        self.iter().map(|(a, v)| v * other.get(a)).sum()
    }

    /// Multiply every value by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::from_fn(|a| self.get(a) * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, asset) in AssetClass::ALL.iter().enumerate() {
            assert_eq!(asset.index(), i);
        }
    }

    #[test]
    fn test_vector_accessors() {
        let v = AssetVector::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(v.get(AssetClass::Treasury), 3.0);
        assert_eq!(v.sum(), 15.0);
        assert_eq!(v.with(AssetClass::Bitcoin, 10.0).btc, 10.0);
        assert_eq!(v.scale(2.0).cash_equivalent, 10.0);
        assert!((v.dot(&AssetVector::new(1.0, 0.0, 0.0, 0.0, 1.0)) - 6.0).abs() < 1e-12);
    }
}
