//! Integration tests for the Monte Carlo simulator.

use hypercoin::core::config::SimulatorInputs;
use hypercoin::core::error::HypercoinError;
use hypercoin::report::render_run;
use hypercoin::simulation::{
    MilestoneProbabilityCalculator, MonteCarloConfig, MonteCarloRunner, StatisticsAggregator,
    DEFAULT_MILESTONES,
};
use proptest::prelude::*;

fn small_inputs() -> SimulatorInputs {
    SimulatorInputs {
        num_simulations: 200,
        ..Default::default()
    }
}

#[test]
fn test_default_run_shape() {
    let runner = MonteCarloRunner::new(MonteCarloConfig::default().with_seed(7));
    let run = runner.run(&small_inputs()).unwrap();

    assert_eq!(run.statistics.len(), 7);
    assert_eq!(run.percentile_series().len(), 7);
    assert_eq!(run.summary().len(), 3);

    // 100k is below the 115k start price and is skipped
    assert_eq!(run.milestones.len(), DEFAULT_MILESTONES.len() - 1);
    for row in &run.milestones.rows {
        assert_eq!(row.probabilities.len(), 4);
    }

    for band in run.percentile_series() {
        assert!(band.p10 <= band.p25);
        assert!(band.p25 <= band.p50);
        assert!(band.p50 <= band.p75);
        assert!(band.p75 <= band.p90);
    }
}

#[test]
fn test_seeded_runs_reproducible() {
    let config = MonteCarloConfig::default().with_seed(2024);
    let a = MonteCarloRunner::new(config.clone()).run(&small_inputs()).unwrap();
    let b = MonteCarloRunner::new(config.with_parallel(false))
        .run(&small_inputs())
        .unwrap();
    assert_eq!(a.statistics, b.statistics);
    assert_eq!(a.milestones, b.milestones);
}

#[test]
fn test_flat_market_stays_at_start() {
    let runner = MonteCarloRunner::new(MonteCarloConfig::default().with_seed(1));
    let cache = runner.run_horizons(100_000.0, 0.0, 0.0, 50).unwrap();
    for years in cache.horizons() {
        let stats = StatisticsAggregator::compute(cache.get(years).unwrap()).unwrap();
        assert!((stats.min - 100_000.0).abs() < 1e-6);
        assert!((stats.max - 100_000.0).abs() < 1e-6);
    }
}

#[test]
fn test_invalid_inputs_rejected() {
    let runner = MonteCarloRunner::new(MonteCarloConfig::default());
    let inputs = SimulatorInputs {
        volatility_pct: 500.0,
        ..small_inputs()
    };
    assert!(matches!(
        runner.run(&inputs),
        Err(HypercoinError::OutOfRange { .. })
    ));
    assert!(runner.run_horizons(-1.0, 0.25, 0.42, 10).is_err());
    assert!(runner.run_horizons(115_000.0, 0.25, 0.42, 0).is_err());
}

#[test]
fn test_extreme_drift_rejected() {
    let runner = MonteCarloRunner::new(MonteCarloConfig::default().with_seed(5));
    for annual_return in [-300.0, 300.0] {
        let inputs = SimulatorInputs {
            annual_return,
            ..small_inputs()
        };
        assert!(matches!(
            inputs.validate(),
            Err(HypercoinError::OutOfRange { .. })
        ));
        assert!(matches!(
            runner.run(&inputs),
            Err(HypercoinError::OutOfRange { .. })
        ));
    }
}

#[test]
fn test_drift_at_bounds_keeps_prices_finite() {
    let runner = MonteCarloRunner::new(MonteCarloConfig::default().with_seed(9));
    for annual_return in [-1.0, 5.0] {
        let inputs = SimulatorInputs {
            annual_return,
            volatility_pct: 200.0,
            ..small_inputs()
        };
        let run = runner.run(&inputs).unwrap();
        for stats in run.statistics.values() {
            assert!(stats.min > 0.0);
            assert!(stats.max.is_finite());
        }
    }
}

#[test]
fn test_inputs_from_json() {
    let inputs =
        SimulatorInputs::from_json(r#"{"current_price": 90000, "num_simulations": 1000}"#)
            .unwrap();
    assert_eq!(inputs.current_price, 90_000.0);
    assert_eq!(inputs.num_simulations, 1_000);
    assert_eq!(inputs.volatility_pct, 42.0);
}

#[test]
fn test_render_run_lists_milestones() {
    let runner = MonteCarloRunner::new(MonteCarloConfig::default().with_seed(3));
    let run = runner.run(&small_inputs()).unwrap();
    let text = render_run(&run);
    assert!(text.contains("$250K"));
    assert!(text.contains("$20.00M"));
    assert!(text.contains("20y"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_percentiles_ordered(prices in prop::collection::vec(1.0f64..1e7, 1..300)) {
        let s = StatisticsAggregator::compute(&prices).unwrap();
        prop_assert!(s.min <= s.p10);
        prop_assert!(s.p10 <= s.p25);
        prop_assert!(s.p25 <= s.median);
        prop_assert!(s.median <= s.p75);
        prop_assert!(s.p75 <= s.p90);
        prop_assert!(s.p90 <= s.max);
    }

    #[test]
    fn prop_milestone_probability_non_increasing(
        prices in prop::collection::vec(1.0f64..1e7, 1..300),
        low in 1.0f64..5e6,
        gap in 0.0f64..5e6,
    ) {
        let p_low = MilestoneProbabilityCalculator::probability(&prices, low).unwrap();
        let p_high = MilestoneProbabilityCalculator::probability(&prices, low + gap).unwrap();
        prop_assert!(p_high <= p_low);
        prop_assert!((0.0..=1.0).contains(&p_low));
    }
}
