//! Probability of reaching price milestones.

use serde::{Deserialize, Serialize};

use super::runner::SimulationCache;
use crate::core::error::{HypercoinError, Result};
use crate::core::types::Price;

/// Default milestone ladder in USD.
pub const DEFAULT_MILESTONES: [Price; 9] = [
    100_000.0,
    250_000.0,
    500_000.0,
    1_000_000.0,
    2_000_000.0,
    5_000_000.0,
    10_000_000.0,
    15_000_000.0,
    20_000_000.0,
];

/// Probability of finishing at or above one milestone for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MilestoneProbability {
    pub horizon_years: u32,
    /// Fraction of paths in [0, 1].
    pub probability: f64,
}

impl MilestoneProbability {
    /// Probability expressed in percent.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

/// One table row: a milestone and its probability per horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRow {
    pub milestone: Price,
    pub probabilities: Vec<MilestoneProbability>,
}

impl MilestoneRow {
    /// Probability for a given horizon, if present.
    pub fn for_horizon(&self, horizon_years: u32) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|p| p.horizon_years == horizon_years)
            .map(|p| p.probability)
    }
}

/// Milestone x horizon probability table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestoneTable {
    pub rows: Vec<MilestoneRow>,
}

impl MilestoneTable {
    /// Look up the probability for a milestone and horizon.
    pub fn get(&self, milestone: Price, horizon_years: u32) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.milestone == milestone)
            .and_then(|r| r.for_horizon(horizon_years))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts cached paths that finish at or above each milestone.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilestoneProbabilityCalculator;

impl MilestoneProbabilityCalculator {
    /// Fraction of `prices` that are `>= milestone`.
    pub fn probability(prices: &[Price], milestone: Price) -> Result<f64> {
        if prices.is_empty() {
            return Err(HypercoinError::empty_data("milestone probability"));
        }
        let hits = prices.iter().filter(|&&p| p >= milestone).count();
        Ok(hits as f64 / prices.len() as f64)
    }

    /// Build the probability table from a run's cache.
    ///
    /// Milestones below `current_price` are skipped entirely. Every horizon
    /// must already be present in the cache.
    pub fn table(
        cache: &SimulationCache,
        milestones: &[Price],
        horizons: &[u32],
        current_price: Price,
    ) -> Result<MilestoneTable> {
        let mut rows = Vec::new();

        for &milestone in milestones {
            if milestone < current_price {
                continue;
            }

            let probabilities = horizons
                .iter()
                .map(|&years| {
                    let prices = cache.get(years).ok_or_else(|| {
                        HypercoinError::invalid_parameter(format!(
                            "horizon {} years was not simulated",
                            years
                        ))
                    })?;
                    Ok(MilestoneProbability {
                        horizon_years: years,
                        probability: Self::probability(prices, milestone)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            rows.push(MilestoneRow {
                milestone,
                probabilities,
            });
        }

        Ok(MilestoneTable { rows })
    }
}
