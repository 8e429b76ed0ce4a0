//! Monthly budget row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BudgetMonth;

/// One budget row per calendar month.
///
/// `spent` is a materialized aggregate over the month's closed costs and is
/// re-derived on every recompute; it is never the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub month: BudgetMonth,
    pub monthly_limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}

impl Budget {
    /// A fresh row with no spend recorded yet.
    pub fn new(month: BudgetMonth, monthly_limit: Decimal) -> Self {
        Self::with_spend(month, monthly_limit, Decimal::ZERO)
    }

    /// Build a row with its derived fields computed from `spent`.
    pub fn with_spend(month: BudgetMonth, monthly_limit: Decimal, spent: Decimal) -> Self {
        Self {
            month,
            monthly_limit,
            spent,
            remaining: monthly_limit - spent,
            over_budget: spent > monthly_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn march() -> BudgetMonth {
        BudgetMonth::new(2025, 3).unwrap()
    }

    #[test]
    fn test_derived_fields() {
        let budget = Budget::with_spend(march(), dec!(1000.00), dec!(165.00));
        assert_eq!(budget.remaining, dec!(835.00));
        assert!(!budget.over_budget);
    }

    #[test]
    fn test_over_budget_flag() {
        let budget = Budget::with_spend(march(), dec!(100.00), dec!(115.00));
        assert_eq!(budget.remaining, dec!(-15.00));
        assert!(budget.over_budget);

        // spending exactly the limit is not over budget
        let at_limit = Budget::with_spend(march(), dec!(100.00), dec!(100.00));
        assert!(!at_limit.over_budget);
    }
}
