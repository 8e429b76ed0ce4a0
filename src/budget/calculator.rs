//! Final cost computation from the base service price and breach delay.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::config::EngineConfig;
use crate::sla::SlaAssessment;
use crate::types::{CostFigures, Ticket};

#[derive(Debug, Clone)]
pub struct CostCalculator {
    penalty_rate: Decimal,
}

impl CostCalculator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            penalty_rate: config.penalty_rate,
        }
    }

    /// Delay-penalty multiplier: a surcharge per full hour of breach, floored
    /// at 1.00 so a delay never discounts the base cost.
    pub fn multiplier(&self, delay_hours: u64) -> Decimal {
        let surcharge = self.penalty_rate * Decimal::from(delay_hours);
        (dec!(1.00) + surcharge).max(dec!(1.00))
    }

    /// Final monetary cost: base times multiplier, rounded half-up to two
    /// decimal places for reproducible financial figures.
    pub fn finalize(&self, base_amount: Decimal, delay_hours: u64) -> Decimal {
        (base_amount * self.multiplier(delay_hours))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Figures for a ticket's cost row given its current SLA assessment.
    /// An open ticket contributes nothing yet, even while accruing delay.
    pub fn revalue(
        &self,
        ticket: &Ticket,
        assessment: &SlaAssessment,
        is_closed: bool,
    ) -> CostFigures {
        let base_amount = ticket.service_price;
        let final_amount = if is_closed {
            self.finalize(base_amount, assessment.delay_hours)
        } else {
            Decimal::ZERO
        };
        CostFigures {
            base_amount,
            delay_hours: assessment.delay_hours,
            is_closed,
            final_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, SlaStatus};

    fn calculator() -> CostCalculator {
        CostCalculator::new(&EngineConfig::default())
    }

    #[test]
    fn test_multiplier_floor_and_values() {
        let c = calculator();
        assert_eq!(c.multiplier(0), dec!(1.00));
        assert_eq!(c.multiplier(1), dec!(1.05));
        assert_eq!(c.multiplier(3), dec!(1.15));
        assert_eq!(c.multiplier(20), dec!(2.00));
    }

    #[test]
    fn test_multiplier_monotonic() {
        let c = calculator();
        let mut prev = Decimal::ZERO;
        for delay in 0..200 {
            let m = c.multiplier(delay);
            assert!(m >= prev);
            assert!(m >= dec!(1.00));
            prev = m;
        }
    }

    #[test]
    fn test_finalize_three_hours_late() {
        // base 100.00, closed 3h past the deadline: 100 * 1.15 = 115.00
        let c = calculator();
        assert_eq!(c.finalize(dec!(100.00), 3), dec!(115.00));
    }

    #[test]
    fn test_finalize_rounds_half_up() {
        let c = calculator();
        // 33.33 * 1.05 = 34.9965 -> 35.00
        assert_eq!(c.finalize(dec!(33.33), 1), dec!(35.00));
        // midpoint case: 10.10 * 1.15 = 11.615 -> 11.62
        assert_eq!(c.finalize(dec!(10.10), 3), dec!(11.62));
    }

    #[test]
    fn test_revalue_open_ticket_contributes_nothing() {
        let c = calculator();
        let ticket = Ticket::new("no email", Category::new("software", Some(48)), dec!(100.00));
        let assessment = SlaAssessment {
            status: SlaStatus::Breached,
            delay_hours: 0,
        };
        let figures = c.revalue(&ticket, &assessment, false);
        assert_eq!(figures.final_amount, Decimal::ZERO);
        assert!(!figures.is_closed);
    }

    #[test]
    fn test_revalue_closed_ticket_applies_penalty() {
        let c = calculator();
        let ticket = Ticket::new("no email", Category::new("software", Some(48)), dec!(100.00));
        let assessment = SlaAssessment {
            status: SlaStatus::Breached,
            delay_hours: 3,
        };
        let figures = c.revalue(&ticket, &assessment, true);
        assert_eq!(figures.base_amount, dec!(100.00));
        assert_eq!(figures.delay_hours, 3);
        assert_eq!(figures.final_amount, dec!(115.00));
    }
}
