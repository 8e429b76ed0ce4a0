//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use helpdesk_sla::prelude::*;
//! ```

// Engine
pub use crate::EngineConfig;
pub use crate::engine::{EngineError, EngineResult, SlaBatchReport, SlaEngine};

// Components
pub use crate::budget::{BudgetAggregator, CostCalculator};
pub use crate::sla::{SlaAssessment, SlaClassifier, SlaOutcome};

// Clock
pub use crate::clock::{Clock, FixedClock, SystemClock};

// Store
pub use crate::store::{MemoryStore, Store, StoreError, StoreResult};

// Domain records
pub use crate::types::{
    Budget, BudgetMonth, Category, Cost, CostFigures, DateEvent, DateEventKind, SlaStatus, Ticket,
    TicketId, Timeline,
};
