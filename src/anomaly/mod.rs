//! Anomaly Guard
//!
//! Stateless checks over one equipment snapshot. Each check yields at most
//! one finding, or reports why it could not run.
//!
//! ## Checks
//!
//! 1. **Standby grease** - grease cycles accumulated while parked
//! 2. **Thermal inertia** - bearing temperature runaway (two selectable modes)
//! 3. **Wear texture** - erosion / cavitation lookup from inspection scores

pub mod grease;
pub mod thermal_inertia;
pub mod wear;

pub use grease::StandbyGreaseCheck;
pub use thermal_inertia::ThermalInertiaCheck;
pub use wear::{classify_wear, evaluate_wear, WearClass};

use crate::config::AnomalyConfig;
use crate::error::DomainError;
use crate::types::{CheckOutcome, EquipmentState, FindingSource, WearTexture};

/// A rule over an equipment snapshot
pub trait StateCheck: Send + Sync {
    /// Rule family the check reports under
    fn source(&self) -> FindingSource;

    /// Evaluate the snapshot against the configured thresholds
    fn evaluate(
        &self,
        state: &EquipmentState,
        cfg: &AnomalyConfig,
    ) -> Result<CheckOutcome, DomainError>;
}

/// Standby grease first (static), then thermal inertia (real-time)
pub fn default_state_checks() -> Vec<Box<dyn StateCheck>> {
    vec![Box::new(StandbyGreaseCheck), Box::new(ThermalInertiaCheck)]
}

/// Runs the equipment checks with one config.
pub struct AnomalyGuard<'a> {
    cfg: &'a AnomalyConfig,
    checks: Vec<Box<dyn StateCheck>>,
}

impl<'a> AnomalyGuard<'a> {
    pub fn new(cfg: &'a AnomalyConfig) -> Self {
        Self {
            cfg,
            checks: default_state_checks(),
        }
    }

    /// Outcome of every state check, in check order.
    pub fn evaluate_state(
        &self,
        state: &EquipmentState,
    ) -> Result<Vec<(FindingSource, CheckOutcome)>, DomainError> {
        self.checks
            .iter()
            .map(|check| {
                check
                    .evaluate(state, self.cfg)
                    .map(|outcome| (check.source(), outcome))
            })
            .collect()
    }

    pub fn evaluate_wear(&self, texture: &WearTexture) -> Result<CheckOutcome, DomainError> {
        wear::evaluate_wear(texture, self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentStatus;

    #[test]
    fn test_guard_runs_checks_in_order() {
        let cfg = AnomalyConfig::default();
        let guard = AnomalyGuard::new(&cfg);
        let state = EquipmentState {
            status: EquipmentStatus::Standby,
            standby_grease_cycles: 3,
            recent_temperature_series: Vec::new(),
        };

        let outcomes = guard.evaluate_state(&state).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, FindingSource::StandbyGrease);
        assert_eq!(outcomes[0].1, CheckOutcome::Passed);
        assert_eq!(outcomes[1].0, FindingSource::ThermalInertia);
        assert!(outcomes[1].1.is_skipped());
    }
}
