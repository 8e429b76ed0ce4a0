//! In-memory store (for testing and single-instance deployments).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::types::{Budget, BudgetMonth, Cost, DateEvent, Ticket, TicketId};

#[derive(Debug, Default)]
struct Inner {
    tickets: HashMap<TicketId, Ticket>,
    events: HashMap<TicketId, Vec<DateEvent>>,
    costs: HashMap<TicketId, Cost>,
    budgets: HashMap<BudgetMonth, Budget>,
    writes: u64,
}

/// In-memory [`Store`] backend. All tables live behind a single lock, so the
/// paired cost + budget commit is atomic under one write guard.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write operations applied so far. Lets tests assert that a
    /// repeated run emits no additional writes.
    pub async fn write_count(&self) -> u64 {
        self.inner.read().await.writes
    }

    pub async fn ticket_count(&self) -> usize {
        self.inner.read().await.tickets.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn ticket(&self, id: TicketId) -> StoreResult<Option<Ticket>> {
        let inner = self.inner.read().await;
        Ok(inner.tickets.get(&id).cloned())
    }

    async fn tickets(&self) -> StoreResult<Vec<Ticket>> {
        let inner = self.inner.read().await;
        Ok(inner.tickets.values().cloned().collect())
    }

    async fn save_ticket(&self, ticket: &Ticket) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.tickets.insert(ticket.id, ticket.clone());
        inner.writes += 1;
        Ok(())
    }

    async fn events(&self, id: TicketId) -> StoreResult<Vec<DateEvent>> {
        let inner = self.inner.read().await;
        Ok(inner.events.get(&id).cloned().unwrap_or_default())
    }

    async fn append_event(&self, id: TicketId, event: DateEvent) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let events = inner.events.entry(id).or_default();
        if events
            .iter()
            .any(|e| e.kind == event.kind && e.at == event.at)
        {
            return Err(StoreError::Integrity {
                message: format!(
                    "duplicate {} event at {} for ticket {}",
                    event.kind.as_str(),
                    event.at,
                    id
                ),
            });
        }
        events.push(event);
        inner.writes += 1;
        Ok(())
    }

    async fn cost_for(&self, id: TicketId) -> StoreResult<Option<Cost>> {
        let inner = self.inner.read().await;
        Ok(inner.costs.get(&id).cloned())
    }

    async fn closed_costs_in(&self, month: BudgetMonth) -> StoreResult<Vec<Cost>> {
        let inner = self.inner.read().await;
        Ok(inner
            .costs
            .values()
            .filter(|c| c.is_closed && month.contains(c.incurred_on))
            .cloned()
            .collect())
    }

    async fn save_cost(&self, cost: &Cost) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.costs.insert(cost.ticket_id, cost.clone());
        inner.writes += 1;
        Ok(())
    }

    async fn budget_for(&self, month: BudgetMonth) -> StoreResult<Option<Budget>> {
        let inner = self.inner.read().await;
        Ok(inner.budgets.get(&month).cloned())
    }

    async fn create_budget(&self, budget: &Budget) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if inner.budgets.contains_key(&budget.month) {
            return Err(StoreError::Validation {
                message: format!(
                    "a budget for {} already exists; only one budget per month is allowed",
                    budget.month
                ),
            });
        }
        inner.budgets.insert(budget.month, budget.clone());
        inner.writes += 1;
        Ok(())
    }

    async fn save_budget(&self, budget: &Budget) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.budgets.insert(budget.month, budget.clone());
        inner.writes += 1;
        Ok(())
    }

    async fn commit_cost_and_budget(&self, cost: &Cost, budget: &Budget) -> StoreResult<()> {
        // Single write guard: both rows land or neither does.
        let mut inner = self.inner.write().await;
        inner.costs.insert(cost.ticket_id, cost.clone());
        inner.budgets.insert(budget.month, budget.clone());
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use crate::types::Category;

    fn ticket() -> Ticket {
        Ticket::new("printer jam", Category::new("hardware", Some(24)), dec!(50))
    }

    #[tokio::test]
    async fn test_ticket_round_trip() {
        let store = MemoryStore::new();
        let ticket = ticket();
        store.save_ticket(&ticket).await.unwrap();

        let loaded = store.ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(loaded, ticket);
        assert_eq!(store.ticket_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_event_rejected() {
        let store = MemoryStore::new();
        let id = TicketId::new();
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();

        store.append_event(id, DateEvent::creation(at)).await.unwrap();
        let err = store.append_event(id, DateEvent::creation(at)).await;
        assert!(matches!(err, Err(StoreError::Integrity { .. })));

        // same timestamp with a different kind is allowed
        store
            .append_event(id, DateEvent::closure(at))
            .await
            .unwrap();
        assert_eq!(store.events(id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_budget_rejected_and_row_untouched() {
        let store = MemoryStore::new();
        let month = BudgetMonth::new(2025, 3).unwrap();
        let original = Budget::new(month, dec!(1000));
        store.create_budget(&original).await.unwrap();

        let second = Budget::new(month, dec!(9999));
        let err = store.create_budget(&second).await;
        assert!(matches!(err, Err(StoreError::Validation { .. })));

        let stored = store.budget_for(month).await.unwrap().unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn test_closed_costs_scoped_to_month() {
        let store = MemoryStore::new();
        let march = BudgetMonth::new(2025, 3).unwrap();

        let mut in_march = Cost::new(
            TicketId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            dec!(100),
        );
        in_march.is_closed = true;
        store.save_cost(&in_march).await.unwrap();

        let mut open_in_march = Cost::new(
            TicketId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            dec!(100),
        );
        open_in_march.is_closed = false;
        store.save_cost(&open_in_march).await.unwrap();

        let mut in_april = Cost::new(
            TicketId::new(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            dec!(100),
        );
        in_april.is_closed = true;
        store.save_cost(&in_april).await.unwrap();

        let scoped = store.closed_costs_in(march).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].ticket_id, in_march.ticket_id);
    }

    #[tokio::test]
    async fn test_write_count_tracks_mutations() {
        let store = MemoryStore::new();
        assert_eq!(store.write_count().await, 0);

        store.save_ticket(&ticket()).await.unwrap();
        assert_eq!(store.write_count().await, 1);

        let month = BudgetMonth::new(2025, 3).unwrap();
        let cost = Cost::new(
            TicketId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            dec!(10),
        );
        let budget = Budget::new(month, dec!(1000));
        store.commit_cost_and_budget(&cost, &budget).await.unwrap();
        assert_eq!(store.write_count().await, 2);
    }
}
