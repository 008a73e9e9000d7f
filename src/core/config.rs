//! Input records and accepted ranges.
//!
//! These records are the boundary between a UI adapter and the engines.
//! Percent-valued fields are stored the way users type them (6.7 = 6.7%)
//! and converted to decimal fractions by the accessor methods.

use serde::{Deserialize, Serialize};

use super::error::{HypercoinError, Result};
use super::types::{AssetVector, Price, Rate};
use crate::projection::allocation::AllocationVector;
use crate::projection::real_estate::RealEstateParams;

/// Accepted range and default for one numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl InputBounds {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Return `value` if it lies within bounds, otherwise an `OutOfRange` error.
    pub fn check(&self, field: &str, value: f64) -> Result<f64> {
        if value.is_nan() || value < self.min || value > self.max {
            return Err(HypercoinError::out_of_range(field, value, self.min, self.max));
        }
        Ok(value)
    }

    /// Clamp into range; NaN and infinite input fall back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}

pub const CURRENT_PRICE_BOUNDS: InputBounds = InputBounds::new(1_000.0, 10_000_000.0, 115_000.0);
pub const VOLATILITY_PCT_BOUNDS: InputBounds = InputBounds::new(10.0, 200.0, 42.0);
pub const NUM_SIMULATIONS_BOUNDS: InputBounds = InputBounds::new(100.0, 50_000.0, 5_000.0);
/// Scenario drift as a decimal fraction. Keeps 50-year terminal prices finite and positive.
pub const ANNUAL_RETURN_BOUNDS: InputBounds = InputBounds::new(-1.0, 5.0, 0.25);

pub const PROPERTY_PRICE_BOUNDS: InputBounds =
    InputBounds::new(50_000.0, 50_000_000.0, 435_000.0);
pub const DOWN_PAYMENT_BOUNDS: InputBounds = InputBounds::new(1_000.0, 10_000_000.0, 87_000.0);
pub const INTEREST_RATE_PCT_BOUNDS: InputBounds = InputBounds::new(0.1, 30.0, 6.7);
pub const RENTAL_YIELD_PCT_BOUNDS: InputBounds = InputBounds::new(0.0, 20.0, 0.0);
pub const APPRECIATION_PCT_BOUNDS: InputBounds = InputBounds::new(-10.0, 20.0, 4.0);
pub const MAINTENANCE_PCT_BOUNDS: InputBounds = InputBounds::new(0.0, 10.0, 2.0);
pub const HOA_FEE_BOUNDS: InputBounds = InputBounds::new(0.0, 5_000.0, 0.0);
pub const INITIAL_INVESTMENT_BOUNDS: InputBounds =
    InputBounds::new(1_000.0, 10_000_000.0, 87_000.0);
pub const ALLOCATION_PCT_BOUNDS: InputBounds = InputBounds::new(0.0, 100.0, 20.0);
pub const CURRENT_RENT_BOUNDS: InputBounds = InputBounds::new(100.0, 20_000.0, 2_075.0);
pub const RENT_INFLATION_PCT_BOUNDS: InputBounds = InputBounds::new(0.0, 15.0, 3.5);
pub const TIME_HORIZON_BOUNDS: InputBounds = InputBounds::new(1.0, 50.0, 10.0);

/// Inputs for one simulator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorInputs {
    /// Starting Bitcoin price.
    pub current_price: Price,
    /// Annual volatility in percent (42 = 42%).
    pub volatility_pct: f64,
    /// Paths per horizon.
    pub num_simulations: usize,
    /// Scenario drift as a decimal fraction.
    pub annual_return: Rate,
}

impl Default for SimulatorInputs {
    fn default() -> Self {
        Self {
            current_price: CURRENT_PRICE_BOUNDS.default,
            volatility_pct: VOLATILITY_PCT_BOUNDS.default,
            num_simulations: NUM_SIMULATIONS_BOUNDS.default as usize,
            annual_return: ANNUAL_RETURN_BOUNDS.default,
        }
    }
}

impl SimulatorInputs {
    /// Parse from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HypercoinError::invalid_parameter(e.to_string()))
    }

    /// Reject any out-of-range field.
    pub fn validate(&self) -> Result<()> {
        CURRENT_PRICE_BOUNDS.check("current_price", self.current_price)?;
        VOLATILITY_PCT_BOUNDS.check("volatility_pct", self.volatility_pct)?;
        NUM_SIMULATIONS_BOUNDS.check("num_simulations", self.num_simulations as f64)?;
        ANNUAL_RETURN_BOUNDS.check("annual_return", self.annual_return)?;
        Ok(())
    }

    /// Copy with every bounded field clamped into range.
    pub fn clamped(&self) -> Self {
        Self {
            current_price: CURRENT_PRICE_BOUNDS.clamp(self.current_price),
            volatility_pct: VOLATILITY_PCT_BOUNDS.clamp(self.volatility_pct),
            num_simulations: NUM_SIMULATIONS_BOUNDS.clamp(self.num_simulations as f64) as usize,
            annual_return: ANNUAL_RETURN_BOUNDS.clamp(self.annual_return),
        }
    }

    /// Volatility as a decimal fraction.
    #[inline]
    pub fn volatility(&self) -> Rate {
        self.volatility_pct / 100.0
    }
}

/// Inputs for the real-estate vs. portfolio comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionInputs {
    pub property_price: Price,
    pub down_payment: Price,
    pub interest_rate_pct: f64,
    pub rental_yield_pct: f64,
    pub appreciation_pct: f64,
    pub maintenance_pct: f64,
    /// Monthly HOA fee.
    pub hoa_fee: Price,
    pub initial_investment: Price,
    /// Portfolio allocation in percent.
    pub allocation_pct: AssetVector,
    /// Initial monthly rent.
    pub current_rent: Price,
    pub rent_inflation_pct: f64,
    pub time_horizon_years: u32,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        let equal = ALLOCATION_PCT_BOUNDS.default;
        Self {
            property_price: PROPERTY_PRICE_BOUNDS.default,
            down_payment: DOWN_PAYMENT_BOUNDS.default,
            interest_rate_pct: INTEREST_RATE_PCT_BOUNDS.default,
            rental_yield_pct: RENTAL_YIELD_PCT_BOUNDS.default,
            appreciation_pct: APPRECIATION_PCT_BOUNDS.default,
            maintenance_pct: MAINTENANCE_PCT_BOUNDS.default,
            hoa_fee: HOA_FEE_BOUNDS.default,
            initial_investment: INITIAL_INVESTMENT_BOUNDS.default,
            allocation_pct: AssetVector::new(equal, equal, equal, equal, equal),
            current_rent: CURRENT_RENT_BOUNDS.default,
            rent_inflation_pct: RENT_INFLATION_PCT_BOUNDS.default,
            time_horizon_years: TIME_HORIZON_BOUNDS.default as u32,
        }
    }
}

impl ProjectionInputs {
    /// Parse from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HypercoinError::invalid_parameter(e.to_string()))
    }

    /// Reject out-of-range fields, an oversized down payment, or an
    /// allocation that does not total 100%.
    pub fn validate(&self) -> Result<()> {
        PROPERTY_PRICE_BOUNDS.check("property_price", self.property_price)?;
        DOWN_PAYMENT_BOUNDS.check("down_payment", self.down_payment)?;
        INTEREST_RATE_PCT_BOUNDS.check("interest_rate_pct", self.interest_rate_pct)?;
        RENTAL_YIELD_PCT_BOUNDS.check("rental_yield_pct", self.rental_yield_pct)?;
        APPRECIATION_PCT_BOUNDS.check("appreciation_pct", self.appreciation_pct)?;
        MAINTENANCE_PCT_BOUNDS.check("maintenance_pct", self.maintenance_pct)?;
        HOA_FEE_BOUNDS.check("hoa_fee", self.hoa_fee)?;
        INITIAL_INVESTMENT_BOUNDS.check("initial_investment", self.initial_investment)?;
        for (asset, pct) in self.allocation_pct.iter() {
            ALLOCATION_PCT_BOUNDS.check(asset.label(), pct)?;
        }
        CURRENT_RENT_BOUNDS.check("current_rent", self.current_rent)?;
        RENT_INFLATION_PCT_BOUNDS.check("rent_inflation_pct", self.rent_inflation_pct)?;
        TIME_HORIZON_BOUNDS.check("time_horizon_years", self.time_horizon_years as f64)?;

        if self.down_payment > self.property_price {
            return Err(HypercoinError::DownPaymentExceedsPrice {
                down_payment: self.down_payment,
                property_price: self.property_price,
            });
        }
        self.allocation().map(|_| ())
    }

    /// Copy with every bounded field clamped into range. A down payment above
    /// the property price is reset to 20% of the price.
    pub fn clamped(&self) -> Self {
        let property_price = PROPERTY_PRICE_BOUNDS.clamp(self.property_price);
        let mut down_payment = DOWN_PAYMENT_BOUNDS.clamp(self.down_payment);
        if down_payment > property_price {
            down_payment = property_price * 0.2;
        }
        Self {
            property_price,
            down_payment,
            interest_rate_pct: INTEREST_RATE_PCT_BOUNDS.clamp(self.interest_rate_pct),
            rental_yield_pct: RENTAL_YIELD_PCT_BOUNDS.clamp(self.rental_yield_pct),
            appreciation_pct: APPRECIATION_PCT_BOUNDS.clamp(self.appreciation_pct),
            maintenance_pct: MAINTENANCE_PCT_BOUNDS.clamp(self.maintenance_pct),
            hoa_fee: HOA_FEE_BOUNDS.clamp(self.hoa_fee),
            initial_investment: INITIAL_INVESTMENT_BOUNDS.clamp(self.initial_investment),
            allocation_pct: AssetVector::from_fn(|a| {
                ALLOCATION_PCT_BOUNDS.clamp(self.allocation_pct.get(a))
            }),
            current_rent: CURRENT_RENT_BOUNDS.clamp(self.current_rent),
            rent_inflation_pct: RENT_INFLATION_PCT_BOUNDS.clamp(self.rent_inflation_pct),
            time_horizon_years: TIME_HORIZON_BOUNDS.clamp(self.time_horizon_years as f64) as u32,
        }
    }

    /// Validated allocation vector.
    pub fn allocation(&self) -> Result<AllocationVector> {
        AllocationVector::from_percentages(self.allocation_pct)
    }

    /// Real-estate parameters with percentages converted to fractions.
    pub fn real_estate_params(&self) -> RealEstateParams {
        RealEstateParams {
            property_price: self.property_price,
            down_payment: self.down_payment,
            interest_rate: self.interest_rate_pct / 100.0,
            rental_yield: self.rental_yield_pct / 100.0,
            appreciation: self.appreciation_pct / 100.0,
            maintenance_rate: self.maintenance_pct / 100.0,
            monthly_hoa_fee: self.hoa_fee,
            initial_monthly_rent: self.current_rent,
            rent_inflation: self.rent_inflation_pct / 100.0,
            horizon_years: self.time_horizon_years,
        }
    }
}
