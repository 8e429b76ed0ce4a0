//! Ticket record, SLA status, and the dated event timeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub Uuid);

impl TicketId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SLA compliance state of a ticket.
///
/// Open tickets drift `OnTrack -> AtRisk -> Breached` as time passes; closure
/// freezes the state at `OnTrack` or `Breached` depending on whether the
/// deadline was met.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlaStatus {
    #[default]
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Breached")]
    Breached,
}

impl SlaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Breached => "Breached",
        }
    }
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service category. The SLA window is category policy; `None` or `Some(0)`
/// means the configured default applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub sla_hours: Option<u32>,
}

impl Category {
    pub fn new(name: impl Into<String>, sla_hours: Option<u32>) -> Self {
        Self {
            name: name.into(),
            sla_hours,
        }
    }

    /// The category's SLA window, falling back to `default` when unset or zero.
    pub fn sla_hours_or(&self, default: u32) -> u32 {
        match self.sla_hours {
            Some(hours) if hours > 0 => hours,
            _ => default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub category: Category,
    /// Base price of the requested service, copied into the ticket's cost row.
    pub service_price: Decimal,
    pub sla_status: SlaStatus,
}

impl Ticket {
    pub fn new(title: impl Into<String>, category: Category, service_price: Decimal) -> Self {
        Self {
            id: TicketId::new(),
            title: title.into(),
            category,
            service_price,
            sla_status: SlaStatus::OnTrack,
        }
    }
}

/// Kind of a dated ticket event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateEventKind {
    Creation,
    ExpectedClosure,
    Closure,
}

impl DateEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::ExpectedClosure => "expected_closure",
            Self::Closure => "closure",
        }
    }
}

/// One entry in a ticket's ordered sequence of status-dated events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEvent {
    pub kind: DateEventKind,
    pub at: DateTime<Utc>,
}

impl DateEvent {
    pub fn creation(at: DateTime<Utc>) -> Self {
        Self {
            kind: DateEventKind::Creation,
            at,
        }
    }

    pub fn expected_closure(at: DateTime<Utc>) -> Self {
        Self {
            kind: DateEventKind::ExpectedClosure,
            at,
        }
    }

    pub fn closure(at: DateTime<Utc>) -> Self {
        Self {
            kind: DateEventKind::Closure,
            at,
        }
    }
}

/// Read-only view over a ticket's event sequence. The first event of each
/// kind wins.
#[derive(Debug, Clone, Copy)]
pub struct Timeline<'a> {
    events: &'a [DateEvent],
}

impl<'a> Timeline<'a> {
    pub fn new(events: &'a [DateEvent]) -> Self {
        Self { events }
    }

    fn first_of(&self, kind: DateEventKind) -> Option<DateTime<Utc>> {
        self.events.iter().find(|e| e.kind == kind).map(|e| e.at)
    }

    pub fn creation(&self) -> Option<DateTime<Utc>> {
        self.first_of(DateEventKind::Creation)
    }

    pub fn expected_closure(&self) -> Option<DateTime<Utc>> {
        self.first_of(DateEventKind::ExpectedClosure)
    }

    pub fn closure(&self) -> Option<DateTime<Utc>> {
        self.first_of(DateEventKind::Closure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_ticket_starts_on_track() {
        let ticket = Ticket::new("vpn down", Category::new("network", Some(48)), dec!(100));
        assert_eq!(ticket.sla_status, SlaStatus::OnTrack);
    }

    #[test]
    fn test_sla_hours_fallback() {
        assert_eq!(Category::new("network", Some(48)).sla_hours_or(42), 48);
        assert_eq!(Category::new("misc", None).sla_hours_or(42), 42);
        assert_eq!(Category::new("misc", Some(0)).sla_hours_or(42), 42);
    }

    #[test]
    fn test_timeline_first_of_each_kind() {
        let events = vec![
            DateEvent::creation(at(8)),
            DateEvent::expected_closure(at(10)),
            DateEvent::closure(at(9)),
            DateEvent::closure(at(11)),
        ];
        let timeline = Timeline::new(&events);
        assert_eq!(timeline.creation(), Some(at(8)));
        assert_eq!(timeline.expected_closure(), Some(at(10)));
        assert_eq!(timeline.closure(), Some(at(9)));
    }

    #[test]
    fn test_timeline_missing_events() {
        let events = vec![DateEvent::creation(at(8))];
        let timeline = Timeline::new(&events);
        assert!(timeline.expected_closure().is_none());
        assert!(timeline.closure().is_none());
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(
            serde_json::to_string(&SlaStatus::AtRisk).unwrap(),
            "\"At Risk\""
        );
        assert_eq!(SlaStatus::Breached.to_string(), "Breached");
    }
}
