//! Buy-a-home projection: equity, carrying costs and the rent-vs-own delta.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mortgage::{MortgageAmortizer, MORTGAGE_TERM_PAYMENTS};
use crate::core::error::{HypercoinError, Result};
use crate::core::types::{Price, Rate, MONTHS_PER_YEAR};

/// Effective property tax, fraction of price per year.
pub const PROPERTY_TAX_RATE: Rate = 0.009;
/// Home insurance, fraction of price per year.
pub const HOME_INSURANCE_RATE: Rate = 0.0035;
/// PMI, fraction of the loan amount per year.
pub const PMI_RATE: Rate = 0.005;
/// PMI applies when the down payment is strictly below this fraction of price.
pub const PMI_DOWN_PAYMENT_THRESHOLD: f64 = 0.20;

/// Inputs for a real-estate projection. Rates are decimal fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealEstateParams {
    pub property_price: Price,
    pub down_payment: Price,
    /// Annual mortgage rate.
    pub interest_rate: Rate,
    /// Gross rental income, fraction of price per year.
    pub rental_yield: Rate,
    /// Annual price appreciation.
    pub appreciation: Rate,
    /// Maintenance, fraction of price per year.
    pub maintenance_rate: Rate,
    pub monthly_hoa_fee: Price,
    /// Rent the occupant would pay instead, in the first year.
    pub initial_monthly_rent: Price,
    /// Annual rent growth.
    pub rent_inflation: Rate,
    pub horizon_years: u32,
}

impl RealEstateParams {
    /// Reject inputs the projection cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(self.property_price > 0.0) || !self.property_price.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "property price must be positive",
            ));
        }
        if !(self.down_payment >= 0.0) || !self.down_payment.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "down payment must be non-negative",
            ));
        }
        if self.down_payment > self.property_price {
            return Err(HypercoinError::DownPaymentExceedsPrice {
                down_payment: self.down_payment,
                property_price: self.property_price,
            });
        }
        if self.horizon_years == 0 {
            return Err(HypercoinError::out_of_range(
                "horizon_years",
                0.0,
                1.0,
                f64::INFINITY,
            ));
        }
        if !(self.interest_rate >= 0.0) || !self.interest_rate.is_finite() {
            return Err(HypercoinError::invalid_parameter(
                "interest rate must be non-negative",
            ));
        }
        if !(self.monthly_hoa_fee >= 0.0) || !(self.initial_monthly_rent >= 0.0) {
            return Err(HypercoinError::invalid_parameter(
                "HOA fee and rent must be non-negative",
            ));
        }
        if !(self.appreciation > -1.0) || !(self.rent_inflation > -1.0) {
            return Err(HypercoinError::invalid_parameter(
                "appreciation and rent inflation must exceed -100%",
            ));
        }
        for (name, value) in [
            ("rental_yield", self.rental_yield),
            ("maintenance_rate", self.maintenance_rate),
            ("appreciation", self.appreciation),
            ("rent_inflation", self.rent_inflation),
            ("monthly_hoa_fee", self.monthly_hoa_fee),
            ("initial_monthly_rent", self.initial_monthly_rent),
        ] {
            if !value.is_finite() {
                return Err(HypercoinError::invalid_parameter(format!(
                    "{} must be finite",
                    name
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn loan_amount(&self) -> Price {
        self.property_price - self.down_payment
    }

    /// Whether PMI is charged (down payment below 20% of price).
    #[inline]
    pub fn requires_pmi(&self) -> bool {
        self.down_payment / self.property_price < PMI_DOWN_PAYMENT_THRESHOLD
    }

    /// Net rental income per year after maintenance.
    #[inline]
    pub fn net_annual_rental_income(&self) -> Price {
        self.property_price * (self.rental_yield - self.maintenance_rate)
    }

    /// Property value after `years` of appreciation.
    #[inline]
    pub fn property_value_at(&self, years: u32) -> Price {
        self.property_price * (1.0 + self.appreciation).powi(years as i32)
    }

    /// Monthly rent during 1-based `year`; rent steps up once per year.
    #[inline]
    pub fn monthly_rent_in_year(&self, year: u32) -> Price {
        self.initial_monthly_rent * (1.0 + self.rent_inflation).powi(year as i32 - 1)
    }

    fn amortizer(&self) -> Result<MortgageAmortizer> {
        MortgageAmortizer::new(self.loan_amount(), self.interest_rate)
    }
}

/// Monthly cost of ownership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPaymentBreakdown {
    pub principal_and_interest: Price,
    pub property_tax: Price,
    pub home_insurance: Price,
    pub pmi: Price,
    pub hoa_fee: Price,
    /// PITI + PMI + HOA.
    pub total: Price,
}

/// Result of a real-estate projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealEstateProjection {
    /// Down payment + term interest + term taxes/insurance/PMI + horizon HOA
    /// and maintenance.
    pub total_investment: Price,
    pub final_property_value: Price,
    /// Net rental income accumulated over the horizon.
    pub total_rental_income: Price,
    /// Equity at the horizon plus accumulated net rental income.
    pub net_worth: Price,
    /// CAGR of net worth over total investment.
    pub annual_return: Rate,
    pub monthly_payment: MonthlyPaymentBreakdown,
    /// Interest over the full loan term.
    pub total_interest: Price,
    /// Taxes, insurance and PMI over the full loan term.
    pub total_taxes_and_insurance: Price,
    pub total_hoa_fees: Price,
    pub total_maintenance: Price,
    pub remaining_balance: Price,
    /// Initial monthly rent.
    pub monthly_rent: Price,
    /// Average monthly (mortgage - rent); positive means renting is cheaper.
    pub monthly_savings: Price,
    /// Sum of (mortgage - rent) over the horizon.
    pub total_savings_for_occupant: Price,
    pub volatility: Rate,
    pub horizon_years: u32,
}

/// Price volatility by horizon band.
pub fn real_estate_volatility(horizon_years: u32) -> Rate {
    if horizon_years <= 5 {
        0.12
    } else if horizon_years <= 15 {
        0.10
    } else {
        0.08
    }
}

/// Projects owning a property over a fixed horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEstateProjector;

impl RealEstateProjector {
    /// Monthly payment breakdown for the given property and loan.
    pub fn monthly_breakdown(params: &RealEstateParams) -> Result<MonthlyPaymentBreakdown> {
        params.validate()?;
        let loan = params.amortizer()?;

        let principal_and_interest = loan.monthly_payment();
        let months = MONTHS_PER_YEAR as f64;
        let property_tax = params.property_price * PROPERTY_TAX_RATE / months;
        let home_insurance = params.property_price * HOME_INSURANCE_RATE / months;
        let pmi = if params.requires_pmi() {
            params.loan_amount() * PMI_RATE / months
        } else {
            0.0
        };
        let hoa_fee = params.monthly_hoa_fee;

        Ok(MonthlyPaymentBreakdown {
            principal_and_interest,
            property_tax,
            home_insurance,
            pmi,
            hoa_fee,
            total: principal_and_interest + property_tax + home_insurance + pmi + hoa_fee,
        })
    }

    /// Full projection over `params.horizon_years`.
    pub fn project(params: &RealEstateParams) -> Result<RealEstateProjection> {
        let payment = Self::monthly_breakdown(params)?;
        let loan = params.amortizer()?;
        let horizon = params.horizon_years;
        let years = horizon as f64;
        let term = MORTGAGE_TERM_PAYMENTS as f64;

        let total_interest = loan.total_interest();
        let total_taxes_and_insurance =
            (payment.property_tax + payment.home_insurance + payment.pmi) * term;
        let total_hoa_fees = params.monthly_hoa_fee * years * MONTHS_PER_YEAR as f64;
        let total_maintenance = params.property_price * params.maintenance_rate * years;

        let final_property_value = params.property_value_at(horizon);
        let total_rental_income = params.net_annual_rental_income() * years;

        let total_investment = params.down_payment
            + total_interest
            + total_taxes_and_insurance
            + total_hoa_fees
            + total_maintenance;
        let remaining_balance = loan.remaining_balance(horizon * MONTHS_PER_YEAR as u32);
        let net_worth = (final_property_value - remaining_balance) + total_rental_income;
        let annual_return = cagr(total_investment, net_worth, years);

        let total_rent_paid: Price = (1..=horizon)
            .map(|year| params.monthly_rent_in_year(year) * MONTHS_PER_YEAR as f64)
            .sum();
        let total_mortgage_paid = payment.total * MONTHS_PER_YEAR as f64 * years;
        let total_savings_for_occupant = total_mortgage_paid - total_rent_paid;
        let monthly_savings = total_savings_for_occupant / (MONTHS_PER_YEAR as f64 * years);

        debug!(
            horizon,
            net_worth,
            total_investment,
            monthly_payment = payment.total,
            "real estate projection"
        );

        Ok(RealEstateProjection {
            total_investment,
            final_property_value,
            total_rental_income,
            net_worth,
            annual_return,
            monthly_payment: payment,
            total_interest,
            total_taxes_and_insurance,
            total_hoa_fees,
            total_maintenance,
            remaining_balance,
            monthly_rent: params.initial_monthly_rent,
            monthly_savings,
            total_savings_for_occupant,
            volatility: real_estate_volatility(horizon),
            horizon_years: horizon,
        })
    }

    /// Net worth at the end of each year; index 0 is the down payment.
    pub fn yearly_values(params: &RealEstateParams) -> Result<Vec<Price>> {
        params.validate()?;
        let loan = params.amortizer()?;
        let net_rental = params.net_annual_rental_income();

        let mut values = Vec::with_capacity(params.horizon_years as usize + 1);
        values.push(params.down_payment);
        for year in 1..=params.horizon_years {
            let equity = params.property_value_at(year)
                - loan.remaining_balance(year * MONTHS_PER_YEAR as u32);
            values.push(equity + net_rental * year as f64);
        }
        Ok(values)
    }
}

/// Compound annual growth from `start` to `end` over `years`.
///
/// A non-positive end value is reported as a total loss (-100%).
pub fn cagr(start: Price, end: Price, years: f64) -> Rate {
    if start <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    if end <= 0.0 {
        return -1.0;
    }
    (end / start).powf(1.0 / years) - 1.0
}
