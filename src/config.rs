//! Engine policy configuration.
//!
//! SLA windows and penalty rates are fixed business policy. They are named
//! here once so every component reads the same values; nothing is
//! user-configurable at runtime beyond constructing the engine with a
//! different [`EngineConfig`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, EngineResult};

/// Fallback SLA window for a category with no (or a zero) window of its own.
///
/// Historical records carried both 42h and 48h; 48h is the adopted value.
pub const DEFAULT_SLA_HOURS: u32 = 48;

/// Open tickets within this many hours of their deadline are At Risk.
pub const AT_RISK_WINDOW_HOURS: u32 = 24;

/// Surcharge applied to the base cost per full hour of breach.
pub const PENALTY_RATE: Decimal = dec!(0.05);

/// Monthly limit used when a budget row is auto-created.
pub const DEFAULT_MONTHLY_LIMIT: Decimal = dec!(1_000_000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_sla_hours: u32,
    pub at_risk_window_hours: u32,
    pub penalty_rate: Decimal,
    pub default_monthly_limit: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_sla_hours: DEFAULT_SLA_HOURS,
            at_risk_window_hours: AT_RISK_WINDOW_HOURS,
            penalty_rate: PENALTY_RATE,
            default_monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_sla_hours(mut self, hours: u32) -> Self {
        self.default_sla_hours = hours;
        self
    }

    pub fn with_at_risk_window_hours(mut self, hours: u32) -> Self {
        self.at_risk_window_hours = hours;
        self
    }

    pub fn with_penalty_rate(mut self, rate: Decimal) -> Self {
        self.penalty_rate = rate;
        self
    }

    pub fn with_default_monthly_limit(mut self, limit: Decimal) -> Self {
        self.default_monthly_limit = limit;
        self
    }

    /// Reject configurations that would make deadlines or costs undefined.
    pub fn validate(&self) -> EngineResult<()> {
        if self.default_sla_hours == 0 {
            return Err(EngineError::Validation {
                message: "default_sla_hours must be positive".into(),
            });
        }
        if self.penalty_rate < Decimal::ZERO {
            return Err(EngineError::Validation {
                message: "penalty_rate must not be negative".into(),
            });
        }
        if self.default_monthly_limit < Decimal::ZERO {
            return Err(EngineError::Validation {
                message: "default_monthly_limit must not be negative".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_sla_hours, 48);
        assert_eq!(config.at_risk_window_hours, 24);
        assert_eq!(config.penalty_rate, dec!(0.05));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_sla_window() {
        let config = EngineConfig::default().with_default_sla_hours(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_penalty_rate() {
        let config = EngineConfig::default().with_penalty_rate(dec!(-0.05));
        assert!(config.validate().is_err());
    }
}
