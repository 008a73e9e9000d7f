//! Real estate vs. portfolio vs. Bitcoin-savings projections.

pub mod allocation;
pub mod bitcoin_savings;
pub mod comparison;
pub mod mortgage;
pub mod portfolio;
pub mod real_estate;
pub mod schedule;

pub use allocation::AllocationVector;
pub use bitcoin_savings::{BitcoinSavingsProjection, BitcoinSavingsProjector, MonthlyContribution};
pub use comparison::{ComparisonEngine, ComparisonReport, ComparisonSummary, GrowthSeries, Winner};
pub use mortgage::{MortgageAmortizer, MORTGAGE_TERM_PAYMENTS};
pub use portfolio::{
    optimize_for_volatility, portfolio_volatility, OptimizedAllocation, OptimizerSettings,
    PortfolioParams, PortfolioProjection, PortfolioProjector, TARGET_VOLATILITY,
};
pub use real_estate::{
    real_estate_volatility, MonthlyPaymentBreakdown, RealEstateParams, RealEstateProjection,
    RealEstateProjector,
};
pub use schedule::{annual_return, annual_volatility, CorrelationMatrix, Regime};
