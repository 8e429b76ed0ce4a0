//! Delay-penalty costing and monthly budget aggregation.

mod aggregator;
mod calculator;

pub use aggregator::BudgetAggregator;
pub use calculator::CostCalculator;
