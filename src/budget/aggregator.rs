//! Monthly budget recomputation.
//!
//! Spend is always re-derived from the month's closed cost rows, never
//! maintained incrementally, so a recompute converges to the same figure no
//! matter what update path preceded it.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::store::{Store, StoreResult};
use crate::types::{Budget, BudgetMonth, Cost};

#[derive(Debug, Clone)]
pub struct BudgetAggregator {
    default_monthly_limit: Decimal,
}

impl BudgetAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            default_monthly_limit: config.default_monthly_limit,
        }
    }

    /// Pure rollup: sum the closed costs dated in `month` and derive the
    /// remaining/over-budget fields. Costs outside the month or still open
    /// are ignored even if present in the slice.
    pub fn aggregate(&self, month: BudgetMonth, monthly_limit: Decimal, costs: &[Cost]) -> Budget {
        let spent: Decimal = costs
            .iter()
            .filter(|c| c.counts_toward_budget() && month.contains(c.incurred_on))
            .map(|c| c.final_amount)
            .sum();
        Budget::with_spend(month, monthly_limit, spent)
    }

    /// Rollup with one not-yet-persisted cost substituted for its stored row,
    /// used to pair a cost update with its budget in a single commit.
    pub fn aggregate_with(
        &self,
        month: BudgetMonth,
        monthly_limit: Decimal,
        stored: &[Cost],
        pending: &Cost,
    ) -> Budget {
        let costs: Vec<Cost> = stored
            .iter()
            .filter(|c| c.ticket_id != pending.ticket_id)
            .cloned()
            .chain(std::iter::once(pending.clone()))
            .collect();
        self.aggregate(month, monthly_limit, &costs)
    }

    /// Recompute the month's budget row against the store: fetch or create
    /// the row, re-derive spend from the scoped closed costs, and write only
    /// when the derived row differs from the stored one.
    pub async fn recompute<S: Store + ?Sized>(
        &self,
        store: &S,
        month: BudgetMonth,
    ) -> StoreResult<Budget> {
        let current = store.budget_for(month).await?;
        let monthly_limit = current
            .as_ref()
            .map(|b| b.monthly_limit)
            .unwrap_or(self.default_monthly_limit);

        let costs = store.closed_costs_in(month).await?;
        let derived = self.aggregate(month, monthly_limit, &costs);

        match current {
            Some(existing) if existing == derived => {
                debug!(month = %month, spent = %existing.spent, "budget unchanged, skipping write");
                Ok(existing)
            }
            Some(_) => {
                store.save_budget(&derived).await?;
                info!(
                    month = %month,
                    spent = %derived.spent,
                    remaining = %derived.remaining,
                    over_budget = derived.over_budget,
                    "budget recomputed"
                );
                Ok(derived)
            }
            None => {
                store.create_budget(&derived).await?;
                info!(
                    month = %month,
                    monthly_limit = %derived.monthly_limit,
                    spent = %derived.spent,
                    "budget row created"
                );
                Ok(derived)
            }
        }
    }
}
