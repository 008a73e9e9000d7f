//! Side-by-side comparison of the three strategies for one request.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::bitcoin_savings::{BitcoinSavingsProjection, BitcoinSavingsProjector};
use super::portfolio::{PortfolioParams, PortfolioProjection, PortfolioProjector};
use super::real_estate::{RealEstateProjection, RealEstateProjector};
use crate::core::config::ProjectionInputs;
use crate::core::error::Result;
use crate::core::types::Price;

/// Strategy with the higher terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    RealEstate,
    Portfolio,
}

/// Which way the occupant's monthly cash flow leans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OccupantSavings {
    /// Renting costs less per month on average.
    Renting(Price),
    /// Owning costs no more per month on average.
    Buying(Price),
}

impl OccupantSavings {
    fn from_monthly_delta(delta: Price) -> Self {
        if delta > 0.0 {
            OccupantSavings::Renting(delta)
        } else {
            OccupantSavings::Buying(delta.abs())
        }
    }

    /// Absolute monthly amount saved.
    pub fn amount(&self) -> Price {
        match *self {
            OccupantSavings::Renting(a) | OccupantSavings::Buying(a) => a,
        }
    }
}

/// Headline comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub winner: Winner,
    /// Absolute gap between real-estate net worth and portfolio value.
    pub difference: Price,
    pub occupant: OccupantSavings,
}

impl ComparisonSummary {
    /// Real estate wins only when its net worth is strictly higher.
    pub fn new(real_estate: &RealEstateProjection, portfolio: &PortfolioProjection) -> Self {
        let winner = if real_estate.net_worth > portfolio.final_value {
            Winner::RealEstate
        } else {
            Winner::Portfolio
        };
        Self {
            winner,
            difference: (real_estate.net_worth - portfolio.final_value).abs(),
            occupant: OccupantSavings::from_monthly_delta(real_estate.monthly_savings),
        }
    }
}

/// Year-indexed values for charting the three strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeries {
    /// 0..=horizon.
    pub years: Vec<u32>,
    pub real_estate: Vec<Price>,
    pub portfolio: Vec<Price>,
    pub bitcoin_savings: Vec<Price>,
}

/// Everything one comparison request produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub real_estate: RealEstateProjection,
    pub portfolio: PortfolioProjection,
    pub bitcoin_savings: BitcoinSavingsProjection,
    pub growth: GrowthSeries,
    pub summary: ComparisonSummary,
}

/// Runs the three projections from one set of inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Validate every input, then project all strategies. Nothing is computed
    /// when any input is rejected.
    pub fn compare(inputs: &ProjectionInputs) -> Result<ComparisonReport> {
        inputs.validate()?;

        let re_params = inputs.real_estate_params();
        let portfolio_params = PortfolioParams {
            initial_investment: inputs.initial_investment,
            allocation: inputs.allocation()?,
            horizon_years: inputs.time_horizon_years,
        };

        let real_estate = RealEstateProjector::project(&re_params)?;
        let portfolio = PortfolioProjector::project(&portfolio_params)?;
        let bitcoin_savings = BitcoinSavingsProjector::project(&re_params, &real_estate)?;

        let growth = GrowthSeries {
            years: (0..=inputs.time_horizon_years).collect(),
            real_estate: RealEstateProjector::yearly_values(&re_params)?,
            portfolio: PortfolioProjector::yearly_values(&portfolio_params)?,
            bitcoin_savings: BitcoinSavingsProjector::yearly_values(
                &re_params,
                real_estate.monthly_payment.total,
            )?,
        };
        let summary = ComparisonSummary::new(&real_estate, &portfolio);

        info!(
            horizon = inputs.time_horizon_years,
            winner = ?summary.winner,
            difference = summary.difference,
            "comparison complete"
        );

        Ok(ComparisonReport {
            real_estate,
            portfolio,
            bitcoin_savings,
            growth,
            summary,
        })
    }
}
