//! # helpdesk-sla
//!
//! SLA and cost engine for a helpdesk ticketing backend: derives
//! expected-closure deadlines from category SLA windows, classifies tickets
//! as On Track / At Risk / Breached, applies a delay penalty to each closed
//! ticket's service cost, and rolls closed costs up into a monthly IT budget.
//!
//! The engine is handed ticket, cost, and budget records through a [`Store`]
//! and persists only what changed; authentication, HTTP, and ticket CRUD are
//! collaborators outside this crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use helpdesk_sla::{EngineConfig, MemoryStore, SlaEngine, Store};
//! use helpdesk_sla::types::{Category, Ticket};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), helpdesk_sla::EngineError> {
//!     let engine = SlaEngine::new(MemoryStore::new(), EngineConfig::default())?;
//!
//!     let ticket = Ticket::new("vpn down", Category::new("network", Some(48)), dec!(100.00));
//!     engine.store().save_ticket(&ticket).await?;
//!     engine.record_creation(ticket.id, Utc::now()).await?;
//!
//!     let report = engine.update_sla(None).await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod budget;
pub mod clock;
pub mod config;
pub mod engine;
pub mod prelude;
pub mod sla;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use budget::{BudgetAggregator, CostCalculator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{EngineError, EngineResult, SlaBatchReport, SlaEngine};
pub use sla::{SlaAssessment, SlaClassifier, SlaOutcome};
pub use store::{MemoryStore, Store, StoreError, StoreResult};
pub use types::{Budget, BudgetMonth, Cost, SlaStatus, Ticket, TicketId};
