//! Percentile statistics over terminal prices.

use serde::{Deserialize, Serialize};

use crate::core::error::{HypercoinError, Result};
use crate::core::types::Price;

/// Summary of one horizon's terminal price distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub median: Price,
    pub p10: Price,
    pub p25: Price,
    pub p75: Price,
    pub p90: Price,
    pub mean: Price,
    pub min: Price,
    pub max: Price,
}

/// Computes [`Statistics`] by sorting ascending and indexing at `floor(n * q)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Compute statistics from an unsorted slice. The slice is left untouched;
    /// a sorted snapshot is taken internally.
    pub fn compute(prices: &[Price]) -> Result<Statistics> {
        let mut sorted = prices.to_vec();
        Self::compute_in_place(&mut sorted)
    }

    /// Compute statistics, sorting `prices` in place.
    ///
    /// The original ordering is lost. Callers that still need it (milestone
    /// probabilities read the cached paths) must snapshot first or use
    /// [`StatisticsAggregator::compute`].
    pub fn compute_in_place(prices: &mut [Price]) -> Result<Statistics> {
        if prices.is_empty() {
            return Err(HypercoinError::empty_data("statistics"));
        }
        prices.sort_by(|a, b| a.total_cmp(b));

        let n = prices.len();
        let at = |q: f64| prices[((n as f64 * q).floor() as usize).min(n - 1)];

        Ok(Statistics {
            median: at(0.5),
            p10: at(0.1),
            p25: at(0.25),
            p75: at(0.75),
            p90: at(0.9),
            mean: prices.iter().sum::<f64>() / n as f64,
            min: prices[0],
            max: prices[n - 1],
        })
    }
}
