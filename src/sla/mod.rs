//! SLA deadline derivation and status assessment.

mod classifier;

pub use classifier::{SlaAssessment, SlaClassifier, SlaOutcome};
