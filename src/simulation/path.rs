//! Single price-path simulation under geometric Brownian motion.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sampler::standard_normal;
use crate::core::types::{Price, Rate, TRADING_DAYS_PER_YEAR};

/// Inputs for one simulated trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Price at t = 0.
    pub start_price: Price,
    /// Horizon in years; may be fractional.
    pub years: f64,
    /// Annual drift as a decimal fraction.
    pub annual_return: Rate,
    /// Annual volatility as a decimal fraction.
    pub volatility: Rate,
}

impl SimulationParameters {
    pub fn new(start_price: Price, years: f64, annual_return: Rate, volatility: Rate) -> Self {
        Self {
            start_price,
            years,
            annual_return,
            volatility,
        }
    }

    /// Number of daily steps: `floor(years * 252)`, zero for non-positive horizons.
    #[inline]
    pub fn num_steps(&self) -> usize {
        if self.years <= 0.0 || !self.years.is_finite() {
            return 0;
        }
        (self.years * TRADING_DAYS_PER_YEAR as f64).floor() as usize
    }
}

/// Discretized GBM path generator.
///
/// Each step applies `price *= exp((mu - sigma^2 / 2) dt + sigma sqrt(dt) Z)`
/// with `dt = 1/252`. Only the terminal price is kept.
///
/// Callers are responsible for `start_price > 0` and `volatility >= 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSimulator;

impl PathSimulator {
    /// One trading day, in years.
    pub const DT: f64 = 1.0 / TRADING_DAYS_PER_YEAR as f64;

    /// Simulate one path and return its terminal price.
    pub fn terminal_price<R: Rng + ?Sized>(params: &SimulationParameters, rng: &mut R) -> Price {
        let steps = params.num_steps();
        let mut price = params.start_price;
        if steps == 0 {
            return price;
        }

        let drift = (params.annual_return - 0.5 * params.volatility * params.volatility) * Self::DT;
        let diffusion_scale = params.volatility * Self::DT.sqrt();

        for _ in 0..steps {
            let diffusion = diffusion_scale * standard_normal(rng);
            price *= (drift + diffusion).exp();
        }

        price
    }
}
