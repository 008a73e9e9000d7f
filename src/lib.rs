//! Hypercoin - Bitcoin price simulation and buy-vs-invest projections.
//!
//! This crate provides:
//! - A Monte Carlo GBM simulator for Bitcoin terminal prices, with
//!   percentile statistics and milestone probabilities
//! - A projection engine comparing a mortgaged property, a multi-asset
//!   portfolio and renting while saving the difference in Bitcoin
//! - Price quote validation over pluggable providers
//! - Display formatting for reports
//!
//! Logging goes through `tracing`; install a subscriber in the host binary
//! to see it.

pub mod core;
pub mod projection;
pub mod quote;
pub mod report;
pub mod simulation;

pub use crate::core::{HypercoinError, ProjectionInputs, Result, SimulatorInputs};
pub use crate::projection::{ComparisonEngine, ComparisonReport};
pub use crate::simulation::{MonteCarloConfig, MonteCarloRunner, SimulationRun};
