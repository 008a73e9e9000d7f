//! Rent instead of buying and put the monthly difference into Bitcoin.
//!
//! Each month where that year's rent is below the mortgage payment, the
//! difference is invested. Every contribution compounds at the Bitcoin
//! return schedule: a partial first year covering the months left in the
//! calendar year of the contribution, then full years to the horizon.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::real_estate::{RealEstateParams, RealEstateProjection, RealEstateProjector};
use super::schedule::{average_returns, yearly_btc_returns};
use crate::core::error::{HypercoinError, Result};
use crate::core::types::{Price, Rate, MONTHS_PER_YEAR};

/// One month of the renting occupant's cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyContribution {
    /// 1-based month from the start of the horizon.
    pub month: u32,
    /// 1-based year containing `month`.
    pub year: u32,
    /// Rent paid that month.
    pub rent: Price,
    /// Amount invested; zero when rent is not below the mortgage.
    pub amount: Price,
}

impl MonthlyContribution {
    /// Fraction of the contribution's first year left to compound (12/12 for
    /// the first month of a year, 1/12 for the last).
    #[inline]
    pub fn first_year_fraction(&self) -> f64 {
        let month_in_year = (self.month - 1) % MONTHS_PER_YEAR as u32 + 1;
        (MONTHS_PER_YEAR as u32 - month_in_year + 1) as f64 / MONTHS_PER_YEAR as f64
    }
}

/// Result of the Bitcoin savings strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BitcoinSavingsProjection {
    /// Average (mortgage - rent) from the real-estate projection.
    pub monthly_savings: Price,
    /// Total invested divided by months in the horizon.
    pub monthly_btc_investment: Price,
    pub total_investment: Price,
    pub final_value: Price,
    pub gain: Price,
    /// Horizon-averaged Bitcoin return; zero when nothing was invested.
    pub annual_return: Rate,
    /// Months with a non-zero contribution.
    pub contributing_months: u32,
}

/// Projects investing the rent-vs-mortgage delta in Bitcoin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinSavingsProjector;

impl BitcoinSavingsProjector {
    /// Month-by-month contributions over the horizon.
    pub fn contributions(
        params: &RealEstateParams,
        monthly_mortgage_payment: Price,
    ) -> Vec<MonthlyContribution> {
        let months = params.horizon_years * MONTHS_PER_YEAR as u32;
        (1..=months)
            .map(|month| {
                let year = (month - 1) / MONTHS_PER_YEAR as u32 + 1;
                let rent = params.monthly_rent_in_year(year);
                let amount = if rent < monthly_mortgage_payment {
                    monthly_mortgage_payment - rent
                } else {
                    0.0
                };
                MonthlyContribution {
                    month,
                    year,
                    rent,
                    amount,
                }
            })
            .collect()
    }

    /// Value at the end of `through_year` of one contribution.
    ///
    /// `yearly_returns[i]` is the return for year `i + 1` and must cover
    /// `through_year` years. Contributions made after `through_year` are worth
    /// nothing yet.
    pub fn future_value(
        contribution: &MonthlyContribution,
        through_year: u32,
        yearly_returns: &[Rate],
    ) -> Result<Price> {
        if yearly_returns.len() < through_year as usize {
            return Err(HypercoinError::invalid_parameter(format!(
                "return schedule covers {} years, {} needed",
                yearly_returns.len(),
                through_year
            )));
        }
        if contribution.amount <= 0.0 || contribution.year > through_year {
            return Ok(0.0);
        }
        let start = contribution.year - 1;
        let mut value = contribution.amount;
        for year_index in start..through_year {
            let years = if year_index == start {
                contribution.first_year_fraction()
            } else {
                1.0
            };
            value *= (1.0 + yearly_returns[year_index as usize]).powf(years);
        }
        Ok(value)
    }

    /// Full projection from a real-estate projection of the same inputs.
    ///
    /// `real_estate` must come from `params`: its horizon, starting rent and
    /// monthly payment are checked against them.
    pub fn project(
        params: &RealEstateParams,
        real_estate: &RealEstateProjection,
    ) -> Result<BitcoinSavingsProjection> {
        params.validate()?;
        let horizon = params.horizon_years;
        if real_estate.horizon_years != horizon {
            return Err(HypercoinError::invalid_parameter(format!(
                "real-estate projection covers {} years, parameters {}",
                real_estate.horizon_years, horizon
            )));
        }
        if real_estate.monthly_rent != params.initial_monthly_rent
            || real_estate.monthly_payment != RealEstateProjector::monthly_breakdown(params)?
        {
            return Err(HypercoinError::invalid_parameter(
                "real-estate projection was computed from different parameters",
            ));
        }
        let contributions = Self::contributions(params, real_estate.monthly_payment.total);

        let total_investment: Price = contributions.iter().map(|c| c.amount).sum();
        let contributing_months = contributions.iter().filter(|c| c.amount > 0.0).count() as u32;

        if total_investment == 0.0 {
            debug!(horizon, "rent never below mortgage; nothing invested");
            return Ok(BitcoinSavingsProjection {
                monthly_savings: real_estate.monthly_savings,
                monthly_btc_investment: 0.0,
                total_investment: 0.0,
                final_value: 0.0,
                gain: 0.0,
                annual_return: 0.0,
                contributing_months: 0,
            });
        }

        let yearly_returns = yearly_btc_returns(horizon);
        let final_value = contributions
            .iter()
            .map(|c| Self::future_value(c, horizon, &yearly_returns))
            .sum::<Result<Price>>()?;

        debug!(
            horizon,
            total_investment, final_value, contributing_months, "bitcoin savings projection"
        );

        Ok(BitcoinSavingsProjection {
            monthly_savings: real_estate.monthly_savings,
            monthly_btc_investment: total_investment / (horizon * MONTHS_PER_YEAR as u32) as f64,
            total_investment,
            final_value,
            gain: final_value - total_investment,
            annual_return: average_returns(horizon)?.btc,
            contributing_months,
        })
    }

    /// Strategy value at the end of each year; index 0 is zero.
    pub fn yearly_values(
        params: &RealEstateParams,
        monthly_mortgage_payment: Price,
    ) -> Result<Vec<Price>> {
        params.validate()?;
        let horizon = params.horizon_years;
        let contributions = Self::contributions(params, monthly_mortgage_payment);
        let yearly_returns = yearly_btc_returns(horizon);

        let mut values = Vec::with_capacity(horizon as usize + 1);
        values.push(0.0);
        for year in 1..=horizon {
            values.push(
                contributions
                    .iter()
                    .map(|c| Self::future_value(c, year, &yearly_returns))
                    .sum::<Result<Price>>()?,
            );
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::real_estate::RealEstateProjector;

    fn params() -> RealEstateParams {
        RealEstateParams {
            property_price: 435_000.0,
            down_payment: 87_000.0,
            interest_rate: 0.067,
            rental_yield: 0.0,
            appreciation: 0.04,
            maintenance_rate: 0.02,
            monthly_hoa_fee: 0.0,
            initial_monthly_rent: 2_075.0,
            rent_inflation: 0.035,
            horizon_years: 10,
        }
    }

    #[test]
    fn test_first_year_fraction() {
        let c = |month| MonthlyContribution {
            month,
            year: (month - 1) / 12 + 1,
            rent: 0.0,
            amount: 1.0,
        };
        assert_eq!(c(1).first_year_fraction(), 1.0);
        assert!((c(12).first_year_fraction() - 1.0 / 12.0).abs() < 1e-12);
        assert_eq!(c(13).first_year_fraction(), 1.0);
        assert!((c(18).first_year_fraction() - 7.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_contributions_stop_when_rent_catches_up() {
        let p = params();
        let contributions = BitcoinSavingsProjector::contributions(&p, 2_698.69);
        assert_eq!(contributions.len(), 120);
        // rent passes the mortgage during year 9
        assert!(contributions.iter().filter(|c| c.year <= 8).all(|c| c.amount > 0.0));
        assert!(contributions.iter().filter(|c| c.year >= 9).all(|c| c.amount == 0.0));
        assert!((contributions[0].amount - (2_698.69 - 2_075.0)).abs() < 1e-9);
    }

    #[test]
    fn test_future_value_single_contribution() {
        let returns = vec![0.10, 0.20, 0.30];
        let c = MonthlyContribution {
            month: 7,
            year: 1,
            rent: 0.0,
            amount: 100.0,
        };
        let fv = BitcoinSavingsProjector::future_value(&c, 3, &returns).unwrap();
        let expected = 100.0 * 1.10_f64.powf(0.5) * 1.20 * 1.30;
        assert!((fv - expected).abs() < 1e-9);
        assert_eq!(
            BitcoinSavingsProjector::future_value(&c, 0, &returns).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_future_value_short_schedule_rejected() {
        let c = MonthlyContribution {
            month: 1,
            year: 1,
            rent: 0.0,
            amount: 100.0,
        };
        assert!(matches!(
            BitcoinSavingsProjector::future_value(&c, 4, &[0.10, 0.20, 0.30]),
            Err(HypercoinError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_mismatched_real_estate_projection_rejected() {
        let p = params();
        let re = RealEstateProjector::project(&p).unwrap();

        let longer = RealEstateParams {
            horizon_years: 20,
            ..p
        };
        let cheaper_rent = RealEstateParams {
            initial_monthly_rent: 1_500.0,
            ..p
        };
        let lower_rate = RealEstateParams {
            interest_rate: 0.05,
            ..p
        };
        for other in [longer, cheaper_rent, lower_rate] {
            assert!(matches!(
                BitcoinSavingsProjector::project(&other, &re),
                Err(HypercoinError::InvalidParameter { .. })
            ));
        }
        assert!(BitcoinSavingsProjector::project(&p, &re).is_ok());
    }

    #[test]
    fn test_projection_totals() {
        let p = params();
        let re = RealEstateProjector::project(&p).unwrap();
        let btc = BitcoinSavingsProjector::project(&p, &re).unwrap();

        let expected_total: f64 = (1..=8)
            .map(|y| (re.monthly_payment.total - p.monthly_rent_in_year(y)) * 12.0)
            .sum();
        assert!((btc.total_investment - expected_total).abs() < 1e-6);
        assert_eq!(btc.contributing_months, 96);
        assert!(btc.final_value > btc.total_investment);
        assert!((btc.gain - (btc.final_value - btc.total_investment)).abs() < 1e-9);
        assert!((btc.monthly_btc_investment - expected_total / 120.0).abs() < 1e-9);
        assert!((btc.annual_return - average_returns(10).unwrap().btc).abs() < 1e-12);
        assert_eq!(btc.monthly_savings, re.monthly_savings);
    }

    #[test]
    fn test_rent_always_above_mortgage_invests_nothing() {
        let p = RealEstateParams {
            initial_monthly_rent: 5_000.0,
            ..params()
        };
        let re = RealEstateProjector::project(&p).unwrap();
        let btc = BitcoinSavingsProjector::project(&p, &re).unwrap();
        assert_eq!(btc.total_investment, 0.0);
        assert_eq!(btc.final_value, 0.0);
        assert_eq!(btc.gain, 0.0);
        assert_eq!(btc.annual_return, 0.0);
        assert_eq!(btc.monthly_btc_investment, 0.0);
    }

    #[test]
    fn test_yearly_values_end_at_final_value() {
        let p = params();
        let re = RealEstateProjector::project(&p).unwrap();
        let btc = BitcoinSavingsProjector::project(&p, &re).unwrap();
        let values = BitcoinSavingsProjector::yearly_values(&p, re.monthly_payment.total).unwrap();
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 0.0);
        assert!((values[10] - btc.final_value).abs() < 1e-6);
        assert!(values.windows(2).all(|w| w[1] >= w[0]));
    }
}
