//! The SLA update orchestrator.
//!
//! Pulls each targeted ticket's timeline, runs the classifier and the cost
//! calculator, and persists only what actually changed. A cost change commits
//! together with its month's recomputed budget; a per-ticket failure is
//! logged and the batch moves on.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::budget::{BudgetAggregator, CostCalculator};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::sla::SlaClassifier;
use crate::store::Store;
use crate::types::{Budget, BudgetMonth, Cost, DateEvent, Ticket, TicketId, Timeline};

use super::{EngineError, EngineResult};

/// Outcome counts for one `update_sla` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlaBatchReport {
    /// Tickets examined.
    pub processed: usize,
    /// Tickets whose stored status changed.
    pub status_updates: usize,
    /// Tickets whose cost row was revalued (and budget recomputed).
    pub cost_updates: usize,
    /// Tickets skipped for a missing expected-closure record.
    pub skipped: usize,
    /// Tickets that errored; the batch continued past them.
    pub failed: usize,
}

impl std::fmt::Display for SlaBatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tickets processed ({} status updates, {} cost updates, {} skipped, {} failed)",
            self.processed, self.status_updates, self.cost_updates, self.skipped, self.failed
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TicketOutcome {
    skipped: bool,
    status_changed: bool,
    cost_changed: bool,
}

/// Orchestrates SLA classification, cost revaluation, and budget
/// recomputation over a [`Store`].
#[derive(Debug)]
pub struct SlaEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    config: EngineConfig,
    classifier: SlaClassifier,
    calculator: CostCalculator,
    aggregator: BudgetAggregator,
}

impl<S: Store> SlaEngine<S, SystemClock> {
    pub fn new(store: S, config: EngineConfig) -> EngineResult<Self> {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: Store, C: Clock> SlaEngine<S, C> {
    pub fn with_clock(store: S, config: EngineConfig, clock: C) -> EngineResult<Self> {
        config.validate()?;
        let classifier = SlaClassifier::new(&config);
        let calculator = CostCalculator::new(&config);
        let aggregator = BudgetAggregator::new(&config);
        Ok(Self {
            store,
            clock,
            config,
            classifier,
            calculator,
            aggregator,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Update SLA status (and dependent cost/budget rows) for one ticket, or
    /// for every ticket when `ticket_id` is `None`.
    ///
    /// Per-ticket failures are logged and counted; they never abort the rest
    /// of the batch. Targeting an unknown ticket id is an error.
    pub async fn update_sla(&self, ticket_id: Option<TicketId>) -> EngineResult<SlaBatchReport> {
        let now = self.clock.now();
        let tickets = match ticket_id {
            Some(id) => {
                let ticket = self.store.ticket(id).await?.ok_or(EngineError::NotFound {
                    entity: "ticket",
                    id: id.to_string(),
                })?;
                vec![ticket]
            }
            None => self.store.tickets().await?,
        };

        let mut report = SlaBatchReport::default();
        for ticket in &tickets {
            report.processed += 1;
            match self.update_one(ticket, now).await {
                Ok(outcome) => {
                    if outcome.skipped {
                        report.skipped += 1;
                    }
                    if outcome.status_changed {
                        report.status_updates += 1;
                    }
                    if outcome.cost_changed {
                        report.cost_updates += 1;
                    }
                }
                Err(e) => {
                    error!(ticket = %ticket.id, error = %e, "SLA update failed, continuing batch");
                    report.failed += 1;
                }
            }
        }

        info!(%report, "SLA update pass complete");
        Ok(report)
    }

    async fn update_one(&self, ticket: &Ticket, now: DateTime<Utc>) -> EngineResult<TicketOutcome> {
        let events = self.store.events(ticket.id).await?;
        let timeline = Timeline::new(&events);

        let Some(expected_closure) = timeline.expected_closure() else {
            warn!(ticket = %ticket.id, "expected closure date missing, skipping SLA update");
            return Ok(TicketOutcome {
                skipped: true,
                ..Default::default()
            });
        };
        let closure = timeline.closure();
        let assessment = self.classifier.assess(expected_closure, now, closure);

        let mut outcome = TicketOutcome::default();

        if let Some(mut cost) = self.store.cost_for(ticket.id).await? {
            let figures = self
                .calculator
                .revalue(ticket, &assessment, closure.is_some());
            if cost.matches(&figures) {
                debug!(ticket = %ticket.id, "cost figures unchanged");
            } else {
                cost.apply(figures);
                let budget = self.derive_budget_with(&cost).await?;
                self.store.commit_cost_and_budget(&cost, &budget).await?;
                info!(
                    ticket = %ticket.id,
                    month = %cost.month(),
                    final_amount = %cost.final_amount,
                    spent = %budget.spent,
                    "cost revalued and budget recomputed"
                );
                outcome.cost_changed = true;
            }
        }

        if ticket.sla_status != assessment.status {
            let mut updated = ticket.clone();
            updated.sla_status = assessment.status;
            self.store.save_ticket(&updated).await?;
            info!(
                ticket = %ticket.id,
                from = %ticket.sla_status,
                to = %assessment.status,
                "SLA status updated"
            );
            outcome.status_changed = true;
        } else {
            debug!(ticket = %ticket.id, status = %ticket.sla_status, "SLA status unchanged");
        }

        Ok(outcome)
    }

    /// The budget row that must accompany `cost` in one commit: the month's
    /// stored closed costs with the pending row substituted in.
    async fn derive_budget_with(&self, cost: &Cost) -> EngineResult<Budget> {
        let month = cost.month();
        let monthly_limit = self
            .store
            .budget_for(month)
            .await?
            .map(|b| b.monthly_limit)
            .unwrap_or(self.config.default_monthly_limit);
        let stored = self.store.closed_costs_in(month).await?;
        Ok(self
            .aggregator
            .aggregate_with(month, monthly_limit, &stored, cost))
    }

    /// Revalue a single ticket's cost row, committing it with the month's
    /// budget when the figures changed. Returns the up-to-date row.
    pub async fn finalize_cost(&self, ticket_id: TicketId) -> EngineResult<Cost> {
        let ticket = self
            .store
            .ticket(ticket_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "ticket",
                id: ticket_id.to_string(),
            })?;
        let mut cost = self
            .store
            .cost_for(ticket_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "cost",
                id: ticket_id.to_string(),
            })?;

        let events = self.store.events(ticket_id).await?;
        let timeline = Timeline::new(&events);
        let expected_closure =
            timeline
                .expected_closure()
                .ok_or(EngineError::NotFound {
                    entity: "expected closure date",
                    id: ticket_id.to_string(),
                })?;
        let closure = timeline.closure();

        let assessment = self
            .classifier
            .assess(expected_closure, self.clock.now(), closure);
        let figures = self
            .calculator
            .revalue(&ticket, &assessment, closure.is_some());

        if cost.matches(&figures) {
            debug!(ticket = %ticket_id, "cost already final, no write");
            return Ok(cost);
        }

        cost.apply(figures);
        let budget = self.derive_budget_with(&cost).await?;
        self.store.commit_cost_and_budget(&cost, &budget).await?;
        info!(
            ticket = %ticket_id,
            final_amount = %cost.final_amount,
            "cost finalized"
        );
        Ok(cost)
    }

    /// Recompute the month's budget row from its closed costs.
    pub async fn recompute_budget(&self, month: BudgetMonth) -> EngineResult<Budget> {
        Ok(self.aggregator.recompute(&self.store, month).await?)
    }

    /// Record a ticket's creation and derive its expected-closure deadline.
    ///
    /// Deriving the deadline is an explicit step here, never a side effect of
    /// persisting the creation date. Idempotent: an already-derived deadline
    /// is returned untouched.
    pub async fn record_creation(
        &self,
        ticket_id: TicketId,
        at: DateTime<Utc>,
    ) -> EngineResult<DateTime<Utc>> {
        let ticket = self
            .store
            .ticket(ticket_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "ticket",
                id: ticket_id.to_string(),
            })?;

        let events = self.store.events(ticket_id).await?;
        let timeline = Timeline::new(&events);

        let created_at = match timeline.creation() {
            Some(existing) => existing,
            None => {
                self.store
                    .append_event(ticket_id, DateEvent::creation(at))
                    .await?;
                at
            }
        };

        if let Some(existing) = timeline.expected_closure() {
            debug!(ticket = %ticket_id, deadline = %existing, "expected closure already derived");
            return Ok(existing);
        }

        let deadline = self
            .classifier
            .deadline(created_at, ticket.category.sla_hours);
        self.store
            .append_event(ticket_id, DateEvent::expected_closure(deadline))
            .await?;
        info!(
            ticket = %ticket_id,
            category = %ticket.category.name,
            deadline = %deadline,
            "expected closure derived"
        );
        Ok(deadline)
    }

    /// Record a ticket's closure and converge its status, cost, and budget.
    /// A second call with the ticket already closed changes nothing.
    pub async fn record_closure(
        &self,
        ticket_id: TicketId,
        at: DateTime<Utc>,
    ) -> EngineResult<SlaBatchReport> {
        let events = self.store.events(ticket_id).await?;
        let timeline = Timeline::new(&events);

        match timeline.closure() {
            Some(existing) => {
                debug!(ticket = %ticket_id, closed_at = %existing, "closure already recorded");
            }
            None => {
                self.store
                    .append_event(ticket_id, DateEvent::closure(at))
                    .await?;
                info!(ticket = %ticket_id, closed_at = %at, "closure recorded");
            }
        }

        self.update_sla(Some(ticket_id)).await
    }
}
