//! Multi-asset portfolio projection.
//!
//! Expected return is linear in the weights; volatility uses the full
//! variance expansion over the static correlation matrix. Growth is pure
//! compounding of the initial investment.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::allocation::AllocationVector;
use super::real_estate::cagr;
use super::schedule::{average_returns, average_volatilities, CorrelationMatrix};
use crate::core::error::{HypercoinError, Result};
use crate::core::types::{AssetClass, AssetVector, Price, Rate};

/// Volatility the optimizer aims for, comparable to real estate.
pub const TARGET_VOLATILITY: Rate = 0.10;

/// Portfolio volatility: `sqrt(sum w_i^2 s_i^2 + 2 sum_{i<j} w_i w_j s_i s_j p_ij)`.
pub fn portfolio_volatility(
    weights: &AssetVector,
    volatilities: &AssetVector,
    correlations: &CorrelationMatrix,
) -> Rate {
    let assets = AssetClass::ALL;
    let mut variance = 0.0;

    for (i, &a) in assets.iter().enumerate() {
        let wa = weights.get(a) * volatilities.get(a);
        variance += wa * wa;
        for &b in &assets[i + 1..] {
            let wb = weights.get(b) * volatilities.get(b);
            variance += 2.0 * wa * wb * correlations.get(a, b);
        }
    }

    variance.max(0.0).sqrt()
}

/// Step-halving search settings for [`optimize_for_volatility`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub target_volatility: Rate,
    /// Initial change in the Bitcoin weight per iteration.
    pub initial_step: f64,
    /// Stop once within this distance of the target.
    pub tolerance: f64,
    /// Skip the search entirely when the starting point is this close.
    pub accept_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            target_volatility: TARGET_VOLATILITY,
            initial_step: 0.01,
            tolerance: 0.005,
            accept_tolerance: 0.01,
            max_iterations: 100,
        }
    }
}

/// Bitcoin weight adjusted toward a target volatility. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedAllocation {
    /// Decimal weights; only the Bitcoin weight differs from the input, so
    /// they need not sum to one.
    pub weights: AssetVector,
    pub target_volatility: Rate,
    /// Volatility of `weights`.
    pub achieved_volatility: Rate,
    pub converged: bool,
    pub iterations: usize,
}

/// Move the Bitcoin weight toward `settings.target_volatility`, holding the
/// other weights fixed. The step reverses and halves on every overshoot; the
/// weight stays within [0, 1]. Returns the best effort after
/// `max_iterations`.
pub fn optimize_for_volatility(
    weights: &AssetVector,
    volatilities: &AssetVector,
    correlations: &CorrelationMatrix,
    settings: &OptimizerSettings,
) -> OptimizedAllocation {
    let target = settings.target_volatility;
    let vol_with_btc = |btc: f64| {
        portfolio_volatility(
            &weights.with(AssetClass::Bitcoin, btc),
            volatilities,
            correlations,
        )
    };

    let current = vol_with_btc(weights.btc);
    if (current - target).abs() < settings.accept_tolerance {
        return OptimizedAllocation {
            weights: *weights,
            target_volatility: target,
            achieved_volatility: current,
            converged: true,
            iterations: 0,
        };
    }

    let mut btc = weights.btc;
    let mut step = if current > target {
        -settings.initial_step
    } else {
        settings.initial_step
    };
    let mut converged = false;
    let mut iterations = 0;

    for _ in 0..settings.max_iterations {
        iterations += 1;
        let vol = vol_with_btc(btc);
        if (vol - target).abs() < settings.tolerance {
            converged = true;
            break;
        }
        if (vol > target && step > 0.0) || (vol < target && step < 0.0) {
            step *= -0.5;
        }
        btc = (btc + step).clamp(0.0, 1.0);
    }

    if !converged {
        warn!(target, btc, iterations, "volatility optimizer did not converge");
    }

    OptimizedAllocation {
        weights: weights.with(AssetClass::Bitcoin, btc),
        target_volatility: target,
        achieved_volatility: vol_with_btc(btc),
        converged,
        iterations,
    }
}

/// Inputs for a portfolio projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioParams {
    pub initial_investment: Price,
    pub allocation: AllocationVector,
    pub horizon_years: u32,
}

/// Result of a portfolio projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProjection {
    pub total_investment: Price,
    pub final_value: Price,
    pub net_gain: Price,
    /// Expected annual return used for compounding.
    pub annual_return: Rate,
    /// Weighted sum of per-asset expected returns (equal to `annual_return`).
    pub portfolio_return: Rate,
    /// CAGR implied by `final_value`.
    pub realized_cagr: Rate,
    /// Decimal weights of the user allocation.
    pub allocation: AssetVector,
    /// Horizon-averaged per-asset returns.
    pub expected_returns: AssetVector,
    /// Horizon-averaged per-asset volatilities.
    pub volatilities: AssetVector,
    pub actual_volatility: Rate,
    pub target_volatility: Rate,
    /// Informational; never feeds back into `final_value`.
    pub optimized_allocation: OptimizedAllocation,
}

/// Projects a lump-sum multi-asset portfolio.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioProjector;

impl PortfolioProjector {
    fn validate(params: &PortfolioParams) -> Result<()> {
        if !(params.initial_investment > 0.0) || !params.initial_investment.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "initial investment must be positive",
            ));
        }
        if params.horizon_years == 0 {
            return Err(HypercoinError::out_of_range(
                "horizon_years",
                0.0,
                1.0,
                f64::INFINITY,
            ));
        }
        Ok(())
    }

    pub fn project(params: &PortfolioParams) -> Result<PortfolioProjection> {
        Self::validate(params)?;

        let horizon = params.horizon_years;
        let weights = params.allocation.weights();
        let expected_returns = average_returns(horizon)?;
        let volatilities = average_volatilities(horizon)?;
        let correlations = CorrelationMatrix::standard();

        let portfolio_return = weights.dot(&expected_returns);
        let actual_volatility = portfolio_volatility(&weights, &volatilities, &correlations);
        let optimized_allocation = optimize_for_volatility(
            &weights,
            &volatilities,
            &correlations,
            &OptimizerSettings::default(),
        );

        let total_investment = params.initial_investment;
        let final_value = total_investment * (1.0 + portfolio_return).powi(horizon as i32);

        debug!(
            horizon,
            portfolio_return, actual_volatility, final_value, "portfolio projection"
        );

        Ok(PortfolioProjection {
            total_investment,
            final_value,
            net_gain: final_value - total_investment,
            annual_return: portfolio_return,
            portfolio_return,
            realized_cagr: cagr(total_investment, final_value, horizon as f64),
            allocation: weights,
            expected_returns,
            volatilities,
            actual_volatility,
            target_volatility: TARGET_VOLATILITY,
            optimized_allocation,
        })
    }

    /// Portfolio value at the end of each year; index 0 is the investment.
    pub fn yearly_values(params: &PortfolioParams) -> Result<Vec<Price>> {
        Self::validate(params)?;
        let r = params
            .allocation
            .weights()
            .dot(&average_returns(params.horizon_years)?);
        Ok((0..=params.horizon_years)
            .map(|y| params.initial_investment * (1.0 + r).powi(y as i32))
            .collect())
    }
}
