//! Monte Carlo Bitcoin price simulator.

pub mod milestones;
pub mod path;
pub mod runner;
pub mod sampler;
pub mod statistics;

pub use milestones::{
    MilestoneProbability, MilestoneProbabilityCalculator, MilestoneRow, MilestoneTable,
    DEFAULT_MILESTONES,
};
pub use path::{PathSimulator, SimulationParameters};
pub use runner::{
    MonteCarloConfig, MonteCarloRunner, PercentileBand, SimulationCache, SimulationRun,
    CHART_HORIZONS, PROBABILITY_HORIZONS, SUMMARY_HORIZONS,
};
pub use statistics::{Statistics, StatisticsAggregator};
