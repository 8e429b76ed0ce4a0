//! Per-ticket cost row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BudgetMonth, TicketId};

/// One cost row per ticket, bucketed into the budget month of `incurred_on`.
///
/// `final_amount` is derived: zero while the ticket is open, otherwise the
/// base amount with the delay penalty applied. Only closed costs contribute
/// to budget spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub ticket_id: TicketId,
    pub incurred_on: NaiveDate,
    pub base_amount: Decimal,
    pub delay_hours: u64,
    pub is_closed: bool,
    pub final_amount: Decimal,
}

impl Cost {
    pub fn new(ticket_id: TicketId, incurred_on: NaiveDate, base_amount: Decimal) -> Self {
        Self {
            ticket_id,
            incurred_on,
            base_amount,
            delay_hours: 0,
            is_closed: false,
            final_amount: Decimal::ZERO,
        }
    }

    /// The budget month this cost belongs to.
    pub fn month(&self) -> BudgetMonth {
        BudgetMonth::from_date(self.incurred_on)
    }

    pub fn counts_toward_budget(&self) -> bool {
        self.is_closed
    }

    /// Whether the stored row already carries these figures.
    pub fn matches(&self, figures: &CostFigures) -> bool {
        self.base_amount == figures.base_amount
            && self.delay_hours == figures.delay_hours
            && self.is_closed == figures.is_closed
            && self.final_amount == figures.final_amount
    }

    pub fn apply(&mut self, figures: CostFigures) {
        self.base_amount = figures.base_amount;
        self.delay_hours = figures.delay_hours;
        self.is_closed = figures.is_closed;
        self.final_amount = figures.final_amount;
    }
}

/// Freshly computed cost figures, compared against the stored row before any
/// write is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostFigures {
    pub base_amount: Decimal,
    pub delay_hours: u64,
    pub is_closed: bool,
    pub final_amount: Decimal,
}
