//! Core types, configuration and errors for Hypercoin.

pub mod config;
pub mod error;
pub mod types;

pub use config::{InputBounds, ProjectionInputs, SimulatorInputs};
pub use error::{HypercoinError, Result};
pub use types::*;
