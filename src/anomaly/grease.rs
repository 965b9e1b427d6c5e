//! Standby grease accumulation - seal blowout risk on the next startup

use tracing::warn;

use super::StateCheck;
use crate::config::AnomalyConfig;
use crate::error::DomainError;
use crate::types::{
    CheckOutcome, EquipmentState, Finding, FindingSource, RecommendedAction, Severity, SkipReason,
};

/// Flags a parked unit whose automatic lubrication kept cycling.
pub struct StandbyGreaseCheck;

impl StateCheck for StandbyGreaseCheck {
    fn source(&self) -> FindingSource {
        FindingSource::StandbyGrease
    }

    fn evaluate(
        &self,
        state: &EquipmentState,
        cfg: &AnomalyConfig,
    ) -> Result<CheckOutcome, DomainError> {
        if !state.status.is_idle() {
            return Ok(CheckOutcome::Skipped(SkipReason::StatusNotApplicable));
        }

        let cycles = state.standby_grease_cycles;
        if cycles <= cfg.standby_grease_cycle_limit {
            return Ok(CheckOutcome::Passed);
        }

        warn!(
            status = %state.status,
            cycles,
            limit = cfg.standby_grease_cycle_limit,
            "Grease accumulated while idle"
        );

        let finding = Finding::new(
            FindingSource::StandbyGrease,
            Severity::CriticalAlarm,
            RecommendedAction::PreventStartup,
            format!(
                "Unit {} with {cycles} grease cycles since last run (limit {}): bearing cavity \
                 overfilled, seal blowout risk on startup",
                state.status, cfg.standby_grease_cycle_limit
            ),
        )
        .with_message("Purge excess grease before startup")
        .with_avoided_loss(cfg.grease_avoided_loss_eur);

        Ok(CheckOutcome::Finding(finding))
    }
}
