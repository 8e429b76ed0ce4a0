//! Domain records shared across the engine.

mod budget;
mod cost;
mod month;
mod ticket;

pub use budget::Budget;
pub use cost::{Cost, CostFigures};
pub use month::BudgetMonth;
pub use ticket::{Category, DateEvent, DateEventKind, SlaStatus, Ticket, TicketId, Timeline};
