//! Thermal inertia - bearing temperature still climbing faster than the oil
//! can carry heat away
//!
//! Two formulations, selected by `AnomalyConfig::thermal_inertia_mode`:
//! - `RateOfRise`: °C/min between the two newest samples, any status
//! - `ShutdownJump`: °C jump between the two newest of the last window,
//!   only while the unit is shutting down

use tracing::{debug, warn};

use super::StateCheck;
use crate::config::{AnomalyConfig, ThermalInertiaMode};
use crate::error::{ensure_finite, DomainError};
use crate::types::{
    elapsed_seconds, CheckOutcome, EquipmentState, EquipmentStatus, Finding, FindingSource, RecommendedAction,
    Severity, SkipReason, TemperatureSample,
};

pub struct ThermalInertiaCheck;

impl StateCheck for ThermalInertiaCheck {
    fn source(&self) -> FindingSource {
        FindingSource::ThermalInertia
    }

    fn evaluate(
        &self,
        state: &EquipmentState,
        cfg: &AnomalyConfig,
    ) -> Result<CheckOutcome, DomainError> {
        for sample in &state.recent_temperature_series {
            ensure_finite("temp_c", sample.temp_c)?;
        }

        let outcome = match cfg.thermal_inertia_mode {
            ThermalInertiaMode::RateOfRise => rate_of_rise(&state.recent_temperature_series, cfg),
            ThermalInertiaMode::ShutdownJump => shutdown_jump(state, cfg),
        };
        if let CheckOutcome::Skipped(reason) = &outcome {
            debug!(mode = %cfg.thermal_inertia_mode, %reason, "Thermal inertia check skipped");
        }
        Ok(outcome)
    }
}

fn emergency(message: String) -> CheckOutcome {
    CheckOutcome::Finding(
        Finding::new(
            FindingSource::ThermalInertia,
            Severity::Emergency,
            RecommendedAction::InitiateSafeShutdown,
            message,
        )
        .with_message("Start emergency auxiliary cooling"),
    )
}

fn rate_of_rise(series: &[TemperatureSample], cfg: &AnomalyConfig) -> CheckOutcome {
    let [.., prev, last] = series else {
        return CheckOutcome::Skipped(SkipReason::InsufficientSamples {
            have: series.len(),
            need: 2,
        });
    };

    let elapsed_min = elapsed_seconds(prev.timestamp, last.timestamp) / 60.0;
    if elapsed_min <= 0.0 {
        return CheckOutcome::Skipped(SkipReason::NonPositiveElapsedTime);
    }

    let rate = (last.temp_c - prev.temp_c) / elapsed_min;
    if rate <= cfg.max_temp_rise_c_per_min {
        return CheckOutcome::Passed;
    }

    warn!(rate, limit = cfg.max_temp_rise_c_per_min, "Bearing temperature runaway");
    emergency(format!(
        "Bearing temperature rising {rate:.2} °C/min (limit {:.2} °C/min): heat is not being \
         carried away",
        cfg.max_temp_rise_c_per_min
    ))
}

fn shutdown_jump(state: &EquipmentState, cfg: &AnomalyConfig) -> CheckOutcome {
    if state.status != EquipmentStatus::ShutdownInProgress {
        return CheckOutcome::Skipped(SkipReason::StatusNotApplicable);
    }

    let series = &state.recent_temperature_series;
    let need = cfg.shutdown_window_samples;
    if series.len() < need {
        return CheckOutcome::Skipped(SkipReason::InsufficientSamples {
            have: series.len(),
            need,
        });
    }

    let window = &series[series.len() - need..];
    let [.., prev, last] = window else {
        return CheckOutcome::Skipped(SkipReason::InsufficientSamples {
            have: window.len(),
            need: 2,
        });
    };

    let jump = last.temp_c - prev.temp_c;
    if jump < cfg.shutdown_jump_c {
        return CheckOutcome::Passed;
    }

    warn!(jump, limit = cfg.shutdown_jump_c, "Temperature surge during shutdown");
    emergency(format!(
        "Bearing temperature jumped {jump:.2} °C during shutdown (limit {:.2} °C): thermal \
         inertia surge after flow loss",
        cfg.shutdown_jump_c
    ))
}
