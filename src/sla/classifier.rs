//! Pure SLA classification.
//!
//! Derives the expected-closure deadline from a ticket's creation time and
//! its category's SLA window, and assesses the compliance state against
//! either the closure time (closed tickets) or "now" (open tickets).

use chrono::{DateTime, Duration, Utc};

use crate::config::EngineConfig;
use crate::types::SlaStatus;

/// Status plus the breach delay, if any.
///
/// `delay_hours` is only non-zero for a ticket that closed past its deadline:
/// full hours past expected closure, rounded down, never negative. Open
/// tickets carry no delay yet, whatever their current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaAssessment {
    pub status: SlaStatus,
    pub delay_hours: u64,
}

/// Full classification result, deadline included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaOutcome {
    pub expected_closure: DateTime<Utc>,
    pub status: SlaStatus,
    pub delay_hours: u64,
}

#[derive(Debug, Clone)]
pub struct SlaClassifier {
    default_sla_hours: u32,
    at_risk_window: Duration,
}

impl SlaClassifier {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            default_sla_hours: config.default_sla_hours,
            at_risk_window: Duration::hours(i64::from(config.at_risk_window_hours)),
        }
    }

    /// Expected-closure deadline for a ticket created at `created_at`.
    /// A missing or zero category window falls back to the configured default.
    pub fn deadline(&self, created_at: DateTime<Utc>, sla_hours: Option<u32>) -> DateTime<Utc> {
        let effective = match sla_hours {
            Some(hours) if hours > 0 => hours,
            _ => self.default_sla_hours,
        };
        created_at + Duration::hours(i64::from(effective))
    }

    /// Assess compliance against a stored deadline.
    pub fn assess(
        &self,
        expected_closure: DateTime<Utc>,
        now: DateTime<Utc>,
        actual_closure: Option<DateTime<Utc>>,
    ) -> SlaAssessment {
        match actual_closure {
            Some(closed_at) => {
                if closed_at <= expected_closure {
                    SlaAssessment {
                        status: SlaStatus::OnTrack,
                        delay_hours: 0,
                    }
                } else {
                    SlaAssessment {
                        status: SlaStatus::Breached,
                        delay_hours: full_hours_between(expected_closure, closed_at),
                    }
                }
            }
            None => {
                let status = if now > expected_closure {
                    SlaStatus::Breached
                } else if expected_closure - now <= self.at_risk_window {
                    SlaStatus::AtRisk
                } else {
                    SlaStatus::OnTrack
                };
                SlaAssessment {
                    status,
                    delay_hours: 0,
                }
            }
        }
    }

    /// Derive the deadline and assess in one step.
    pub fn classify(
        &self,
        created_at: DateTime<Utc>,
        sla_hours: Option<u32>,
        now: DateTime<Utc>,
        actual_closure: Option<DateTime<Utc>>,
    ) -> SlaOutcome {
        let expected_closure = self.deadline(created_at, sla_hours);
        let assessment = self.assess(expected_closure, now, actual_closure);
        SlaOutcome {
            expected_closure,
            status: assessment.status,
            delay_hours: assessment.delay_hours,
        }
    }
}

/// Full hours from `from` to `to`, floored, clamped at zero.
fn full_hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_hours().max(0) as u64
}
