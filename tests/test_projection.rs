//! Integration tests for the projection engine.

use hypercoin::core::config::ProjectionInputs;
use hypercoin::core::error::HypercoinError;
use hypercoin::core::types::{AssetClass, AssetVector};
use hypercoin::projection::comparison::{OccupantSavings, Winner};
use hypercoin::projection::schedule::{average_volatilities, long_term_btc_cagr};
use hypercoin::projection::{
    portfolio_volatility, AllocationVector, BitcoinSavingsProjector, ComparisonEngine,
    CorrelationMatrix, MortgageAmortizer, PortfolioParams, PortfolioProjector,
    RealEstateProjector,
};
use hypercoin::report::{format_currency, format_percent};
use proptest::prelude::*;

#[test]
fn test_default_house_has_no_pmi() {
    // 87k down on 435k is exactly 20%
    let params = ProjectionInputs::default().real_estate_params();
    let breakdown = RealEstateProjector::monthly_breakdown(&params).unwrap();

    assert_eq!(breakdown.pmi, 0.0);
    assert!((breakdown.principal_and_interest - 2245.5673635795).abs() < 1e-6);
    assert!((breakdown.property_tax - 326.25).abs() < 1e-9);
    assert!((breakdown.home_insurance - 126.875).abs() < 1e-9);
    assert!((breakdown.total - 2698.6923635795).abs() < 1e-6);
    assert_eq!(format_currency(breakdown.total), "$2,699");
}

#[test]
fn test_small_down_payment_adds_pmi() {
    let inputs = ProjectionInputs {
        down_payment: 43_500.0,
        ..Default::default()
    };
    let breakdown = RealEstateProjector::monthly_breakdown(&inputs.real_estate_params()).unwrap();
    // 0.5% of the 391,500 loan per year
    assert!((breakdown.pmi - 391_500.0 * 0.005 / 12.0).abs() < 1e-9);
}

#[test]
fn test_default_real_estate_projection() {
    let params = ProjectionInputs::default().real_estate_params();
    let re = RealEstateProjector::project(&params).unwrap();

    assert!((re.remaining_balance - 296_485.927154879).abs() < 1e-3);
    assert!((re.final_property_value - 435_000.0 * 1.04_f64.powi(10)).abs() < 1e-6);
    assert_eq!(re.total_rental_income, 0.0);
    assert!((re.net_worth - (re.final_property_value - re.remaining_balance)).abs() < 1e-6);
    assert!((re.total_maintenance - 87_000.0).abs() < 1e-9);
    assert_eq!(re.total_hoa_fees, 0.0);
    assert!((re.volatility - 0.10).abs() < 1e-12);
}

#[test]
fn test_down_payment_above_price_rejected() {
    let inputs = ProjectionInputs {
        down_payment: 500_000.0,
        ..Default::default()
    };
    assert!(matches!(
        ComparisonEngine::compare(&inputs),
        Err(HypercoinError::DownPaymentExceedsPrice { .. })
    ));
}

#[test]
fn test_single_asset_portfolio_volatility() {
    let vols = average_volatilities(10).unwrap();
    let corr = CorrelationMatrix::standard();
    for asset in AssetClass::ALL {
        let weights = AllocationVector::single(asset).weights();
        let sigma = portfolio_volatility(&weights, &vols, &corr);
        assert!((sigma - vols.get(asset)).abs() < 1e-12);
    }
}

#[test]
fn test_all_bitcoin_long_horizon() {
    let params = PortfolioParams {
        initial_investment: 100_000.0,
        allocation: AllocationVector::single(AssetClass::Bitcoin),
        horizon_years: 30,
    };
    let projection = PortfolioProjector::project(&params).unwrap();
    let years = PortfolioProjector::yearly_values(&params).unwrap();

    assert_eq!(years.len(), 31);
    assert_eq!(years[0], 100_000.0);
    assert!((years[30] - projection.final_value).abs() < 1e-6);
    // early high-return years are outweighed by the long-run regime
    assert!(projection.annual_return > 0.25);
    assert!(projection.annual_return < long_term_btc_cagr());
    assert_eq!(projection.target_volatility, 0.10);
}

#[test]
fn test_expensive_rent_means_no_bitcoin_savings() {
    let inputs = ProjectionInputs {
        current_rent: 6_000.0,
        ..Default::default()
    };
    let report = ComparisonEngine::compare(&inputs).unwrap();
    assert_eq!(report.bitcoin_savings.total_investment, 0.0);
    assert_eq!(report.bitcoin_savings.final_value, 0.0);
    assert!(report.growth.bitcoin_savings.iter().all(|&v| v == 0.0));
    assert!(matches!(report.summary.occupant, OccupantSavings::Buying(_)));
}

#[test]
fn test_comparison_from_json() {
    let json = r#"{
        "property_price": 600000,
        "down_payment": 120000,
        "allocation_pct": {
            "btc": 50, "equity_index": 50, "treasury": 0,
            "yield_instrument": 0, "cash_equivalent": 0
        },
        "time_horizon_years": 15
    }"#;
    let inputs = ProjectionInputs::from_json(json).unwrap();
    let report = ComparisonEngine::compare(&inputs).unwrap();

    assert_eq!(report.growth.years, (0..=15).collect::<Vec<u32>>());
    assert_eq!(report.growth.real_estate[0], 120_000.0);
    assert_eq!(report.growth.portfolio[0], 87_000.0);
    let expected_winner = if report.real_estate.net_worth > report.portfolio.final_value {
        Winner::RealEstate
    } else {
        Winner::Portfolio
    };
    assert_eq!(report.summary.winner, expected_winner);
    assert!(format_percent(report.portfolio.annual_return).ends_with('%'));
}

#[test]
fn test_bitcoin_savings_matches_growth_series() {
    let inputs = ProjectionInputs::default();
    let params = inputs.real_estate_params();
    let re = RealEstateProjector::project(&params).unwrap();
    let btc = BitcoinSavingsProjector::project(&params, &re).unwrap();
    let report = ComparisonEngine::compare(&inputs).unwrap();
    assert_eq!(report.bitcoin_savings, btc);
    assert_eq!(btc.contributing_months, 96);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_amortization_endpoints(
        principal in 1_000.0f64..5_000_000.0,
        annual_pct in 0.0f64..30.0,
    ) {
        let loan = MortgageAmortizer::new(principal, annual_pct / 100.0).unwrap();
        prop_assert!((loan.remaining_balance(0) - principal).abs() < 1e-6 * principal);
        prop_assert!(loan.remaining_balance(360).abs() < 1e-6 * principal);
        prop_assert!(loan.remaining_balance(120) <= principal + 1e-6);
        prop_assert!(loan.total_interest() >= -1e-6);
    }

    #[test]
    fn prop_allocation_accepts_only_hundred(
        a in 0.0f64..100.0,
        b in 0.0f64..100.0,
        c in 0.0f64..100.0,
        d in 0.0f64..100.0,
        e in 0.0f64..100.0,
    ) {
        let v = AssetVector::new(a, b, c, d, e);
        let total = v.sum();
        let result = AllocationVector::from_percentages(v);
        if (total - 100.0).abs() <= 0.1 {
            prop_assert!(result.is_ok());
        } else {
            let is_invalid = matches!(result, Err(HypercoinError::InvalidAllocation { .. }));
            prop_assert!(is_invalid);
        }
    }

    #[test]
    fn prop_normalized_allocation_accepted(
        raw in prop::collection::vec(0.01f64..1.0, 5),
    ) {
        let sum: f64 = raw.iter().sum();
        let v = AssetVector::new(
            raw[0] / sum * 100.0,
            raw[1] / sum * 100.0,
            raw[2] / sum * 100.0,
            raw[3] / sum * 100.0,
            raw[4] / sum * 100.0,
        );
        let allocation = AllocationVector::from_percentages(v).unwrap();
        prop_assert!((allocation.weights().sum() - 1.0).abs() < 1e-9);
    }
}
