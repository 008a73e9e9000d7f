//! Monte Carlo runs across a set of time horizons.
//!
//! Each horizon is simulated exactly once per run and its raw terminal
//! prices are kept in a [`SimulationCache`] owned by the run. Statistics and
//! milestone probabilities both read from that cache. Horizons are simulated
//! in parallel via Rayon, each with its own RNG stream.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::milestones::{MilestoneProbabilityCalculator, MilestoneTable, DEFAULT_MILESTONES};
use super::path::{PathSimulator, SimulationParameters};
use super::sampler::{derive_seed, make_rng};
use super::statistics::{Statistics, StatisticsAggregator};
use crate::core::config::SimulatorInputs;
use crate::core::error::{HypercoinError, Result};
use crate::core::types::{Price, Rate};

/// Horizons plotted on the percentile chart.
pub const CHART_HORIZONS: [u32; 7] = [4, 5, 6, 8, 10, 12, 15];

/// Horizons reported in the milestone probability table.
pub const PROBABILITY_HORIZONS: [u32; 4] = [5, 10, 15, 20];

/// Horizons shown as headline projections.
pub const SUMMARY_HORIZONS: [u32; 3] = [5, 10, 15];

/// Configuration for a Monte Carlo run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Horizons that get full statistics.
    pub chart_horizons: Vec<u32>,
    /// Horizons used for milestone probabilities.
    pub probability_horizons: Vec<u32>,
    /// Milestone prices.
    pub milestones: Vec<Price>,
    /// Seed for reproducibility (None = entropy).
    pub seed: Option<u64>,
    /// Simulate horizons on the Rayon pool.
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            chart_horizons: CHART_HORIZONS.to_vec(),
            probability_horizons: PROBABILITY_HORIZONS.to_vec(),
            milestones: DEFAULT_MILESTONES.to_vec(),
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chart_horizons(mut self, horizons: Vec<u32>) -> Self {
        self.chart_horizons = horizons;
        self
    }

    pub fn with_probability_horizons(mut self, horizons: Vec<u32>) -> Self {
        self.probability_horizons = horizons;
        self
    }

    pub fn with_milestones(mut self, milestones: Vec<Price>) -> Self {
        self.milestones = milestones;
        self
    }

    /// Union of chart and probability horizons, ascending and deduplicated.
    pub fn all_horizons(&self) -> Vec<u32> {
        self.chart_horizons
            .iter()
            .chain(self.probability_horizons.iter())
            .copied()
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }
}

/// Raw terminal prices per horizon, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationCache {
    prices: BTreeMap<u32, Vec<Price>>,
}

impl SimulationCache {
    /// Wrap already-materialized price collections.
    pub fn from_prices(prices: BTreeMap<u32, Vec<Price>>) -> Self {
        Self { prices }
    }

    /// Prices for one horizon.
    pub fn get(&self, horizon_years: u32) -> Option<&[Price]> {
        self.prices.get(&horizon_years).map(|v| v.as_slice())
    }

    /// Cached horizons, ascending.
    pub fn horizons(&self) -> impl Iterator<Item = u32> + '_ {
        self.prices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Percentile band for one chart horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub horizon_years: u32,
    pub p10: Price,
    pub p25: Price,
    pub p50: Price,
    pub p75: Price,
    pub p90: Price,
}

/// Everything one simulator request produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Inputs the run was computed from.
    pub inputs: SimulatorInputs,
    /// Statistics per chart horizon.
    pub statistics: BTreeMap<u32, Statistics>,
    /// Milestone probabilities.
    pub milestones: MilestoneTable,
    /// Raw terminal prices per simulated horizon.
    pub cache: SimulationCache,
}

impl SimulationRun {
    /// Percentile series for the chart, in horizon order.
    pub fn percentile_series(&self) -> Vec<PercentileBand> {
        self.statistics
            .iter()
            .map(|(&horizon_years, s)| PercentileBand {
                horizon_years,
                p10: s.p10,
                p25: s.p25,
                p50: s.median,
                p75: s.p75,
                p90: s.p90,
            })
            .collect()
    }

    /// Headline statistics for the 5/10/15-year horizons that were simulated.
    pub fn summary(&self) -> Vec<(u32, Statistics)> {
        SUMMARY_HORIZONS
            .iter()
            .filter_map(|y| self.statistics.get(y).map(|s| (*y, *s)))
            .collect()
    }
}

/// Runs `num_simulations` independent paths per horizon.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloRunner {
    config: MonteCarloConfig,
}

impl MonteCarloRunner {
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Simulate one horizon sequentially with the supplied generator.
    pub fn simulate_horizon<R: Rng + ?Sized>(
        params: &SimulationParameters,
        num_simulations: usize,
        rng: &mut R,
    ) -> Vec<Price> {
        (0..num_simulations)
            .map(|_| PathSimulator::terminal_price(params, rng))
            .collect()
    }

    /// Simulate every configured horizon and return the raw price cache.
    pub fn run_horizons(
        &self,
        start_price: Price,
        annual_return: Rate,
        volatility: Rate,
        num_simulations: usize,
    ) -> Result<SimulationCache> {
        if !(start_price > 0.0) || !start_price.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "start price must be positive",
            ));
        }
        if !(volatility >= 0.0) || !volatility.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "volatility must be non-negative",
            ));
        }
        if !annual_return.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "annual return must be finite",
            ));
        }
        if num_simulations == 0 {
            return Err(HypercoinError::invalid_parameter(
                "number of simulations must be at least 1",
            ));
        }

        let horizons = self.config.all_horizons();
        let base_seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        debug!(
            horizons = ?horizons,
            num_simulations,
            seeded = self.config.seed.is_some(),
            "simulating horizons"
        );

        let simulate = |years: u32| {
            let params =
                SimulationParameters::new(start_price, years as f64, annual_return, volatility);
            let mut rng = make_rng(Some(derive_seed(base_seed, years as u64)));
            (years, Self::simulate_horizon(&params, num_simulations, &mut rng))
        };

        let prices: BTreeMap<u32, Vec<Price>> = if self.config.parallel {
            horizons.into_par_iter().map(simulate).collect()
        } else {
            horizons.into_iter().map(simulate).collect()
        };

        Ok(SimulationCache::from_prices(prices))
    }

    /// Full simulator request: validate inputs, simulate, aggregate.
    pub fn run(&self, inputs: &SimulatorInputs) -> Result<SimulationRun> {
        inputs.validate()?;

        let cache = self.run_horizons(
            inputs.current_price,
            inputs.annual_return,
            inputs.volatility(),
            inputs.num_simulations,
        )?;

        let mut statistics = BTreeMap::new();
        for &years in &self.config.chart_horizons {
            let prices = cache.get(years).ok_or_else(|| {
                HypercoinError::invalid_parameter(format!("horizon {} years missing", years))
            })?;
            statistics.insert(years, StatisticsAggregator::compute(prices)?);
        }

        let milestones = MilestoneProbabilityCalculator::table(
            &cache,
            &self.config.milestones,
            &self.config.probability_horizons,
            inputs.current_price,
        )?;

        info!(
            horizons = cache.len(),
            num_simulations = inputs.num_simulations,
            milestone_rows = milestones.len(),
            "simulation run complete"
        );

        Ok(SimulationRun {
            inputs: inputs.clone(),
            statistics,
            milestones,
            cache,
        })
    }
}
