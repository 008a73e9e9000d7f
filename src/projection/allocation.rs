//! Portfolio allocation across the five asset classes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{HypercoinError, Result};
use crate::core::types::{AssetClass, AssetVector};

/// Allowed deviation of the allocation total from 100%.
pub const ALLOCATION_TOLERANCE_PCT: f64 = 0.1;

/// Allocation percentages that are non-negative and total 100% (within
/// [`ALLOCATION_TOLERANCE_PCT`]). Can only be built through validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationVector {
    percentages: AssetVector,
}

impl AllocationVector {
    /// Validate percentages given in canonical asset order.
    pub fn new(
        btc: f64,
        equity_index: f64,
        treasury: f64,
        yield_instrument: f64,
        cash_equivalent: f64,
    ) -> Result<Self> {
        Self::from_percentages(AssetVector::new(
            btc,
            equity_index,
            treasury,
            yield_instrument,
            cash_equivalent,
        ))
    }

    /// Validate a percentage vector.
    pub fn from_percentages(percentages: AssetVector) -> Result<Self> {
        for (asset, pct) in percentages.iter() {
            if !pct.is_finite() || pct < 0.0 {
                return Err(HypercoinError::invalid_parameter(format!(
                    "{} allocation must be a non-negative percentage, got {}",
                    asset.label(),
                    pct
                )));
            }
        }

        let total = percentages.sum();
        if (total - 100.0).abs() > ALLOCATION_TOLERANCE_PCT {
            warn!(total, "allocation rejected");
            return Err(HypercoinError::InvalidAllocation { total });
        }

        Ok(Self { percentages })
    }

    /// 100% in a single asset.
    pub fn single(asset: AssetClass) -> Self {
        Self {
            percentages: AssetVector::default().with(asset, 100.0),
        }
    }

    /// Equal 20% weights.
    pub fn equal_weight() -> Self {
        Self {
            percentages: AssetVector::new(20.0, 20.0, 20.0, 20.0, 20.0),
        }
    }

    /// Allocation in percent.
    #[inline]
    pub fn percentages(&self) -> AssetVector {
        self.percentages
    }

    /// Allocation as decimal weights (percent / 100).
    #[inline]
    pub fn weights(&self) -> AssetVector {
        self.percentages.scale(0.01)
    }

    /// Sum of the percentages.
    #[inline]
    pub fn total(&self) -> f64 {
        self.percentages.sum()
    }
}

impl Default for AllocationVector {
    fn default() -> Self {
        Self::equal_weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_weight_accepted() {
        let alloc = AllocationVector::new(20.0, 20.0, 20.0, 20.0, 20.0).unwrap();
        assert!((alloc.weights().btc - 0.2).abs() < 1e-12);
        assert!((alloc.total() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_total_rejected() {
        match AllocationVector::new(20.0, 20.0, 20.0, 20.0, 19.0) {
            Err(HypercoinError::InvalidAllocation { total }) => {
                assert!((total - 99.0).abs() < 1e-12)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tolerance() {
        assert!(AllocationVector::new(20.05, 20.0, 20.0, 20.0, 20.0).is_ok());
        assert!(AllocationVector::new(20.2, 20.0, 20.0, 20.0, 20.0).is_err());
    }

    #[test]
    fn test_negative_rejected() {
        assert!(AllocationVector::new(-10.0, 30.0, 40.0, 20.0, 20.0).is_err());
    }

    #[test]
    fn test_single_asset() {
        let alloc = AllocationVector::single(AssetClass::Treasury);
        assert_eq!(alloc.weights().treasury, 1.0);
        assert_eq!(alloc.weights().btc, 0.0);
    }
}
