//! Storage seam consumed by the engine.
//!
//! The engine is handed records already loaded and persists results back
//! through [`Store`]; it never issues queries of its own beyond the scoped
//! lookups defined here.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Budget, BudgetMonth, Cost, DateEvent, Ticket, TicketId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("integrity violation: {message}")]
    Integrity { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing store for tickets, their event timelines, costs, and budgets.
#[async_trait]
pub trait Store: Send + Sync {
    fn name(&self) -> &str;

    async fn ticket(&self, id: TicketId) -> StoreResult<Option<Ticket>>;

    async fn tickets(&self) -> StoreResult<Vec<Ticket>>;

    async fn save_ticket(&self, ticket: &Ticket) -> StoreResult<()>;

    /// The ticket's ordered sequence of status-dated events.
    async fn events(&self, id: TicketId) -> StoreResult<Vec<DateEvent>>;

    /// Append one event. Re-appending an event with the same kind and
    /// timestamp violates the per-ticket uniqueness constraint.
    async fn append_event(&self, id: TicketId, event: DateEvent) -> StoreResult<()>;

    async fn cost_for(&self, id: TicketId) -> StoreResult<Option<Cost>>;

    /// Closed costs dated within `month`: the scoped query budget
    /// recomputation runs over.
    async fn closed_costs_in(&self, month: BudgetMonth) -> StoreResult<Vec<Cost>>;

    async fn save_cost(&self, cost: &Cost) -> StoreResult<()>;

    async fn budget_for(&self, month: BudgetMonth) -> StoreResult<Option<Budget>>;

    /// Create the budget row for a month. Fails with a validation error if a
    /// row for that month already exists; the stored row is left untouched.
    async fn create_budget(&self, budget: &Budget) -> StoreResult<()>;

    async fn save_budget(&self, budget: &Budget) -> StoreResult<()>;

    /// Persist a cost update together with its month's recomputed budget as
    /// one all-or-nothing write.
    async fn commit_cost_and_budget(&self, cost: &Cost, budget: &Budget) -> StoreResult<()>;
}
