//! Legacy pattern watcher - matches live conditions to historical incidents
//!
//! Two conditions preceded the recorded incidents:
//! 1. A field bore that drifted from design (static, checked before startup)
//! 2. A pressure gradient spike (dynamic, checked on live telemetry)

use tracing::{debug, warn};

use crate::error::{ensure_finite, DomainError};
use crate::types::{
    elapsed_seconds, CheckOutcome, DeviationCheck, Finding, FindingSource, IncidentSignature, PressureSample,
    RecommendedAction, Severity, SkipReason,
};

// ============================================================================
// Configuration Deviation
// ============================================================================

/// Compare a field diameter with design against a signature's tolerance.
///
/// Violation when |field - designed| / designed × 100 > `max_variance_pct`.
pub fn check_configuration_deviation(
    designed_mm: f64,
    field_mm: f64,
    signature: &IncidentSignature,
) -> Result<DeviationCheck, DomainError> {
    let designed = ensure_finite("designed_diameter_mm", designed_mm)?;
    let field = ensure_finite("field_diameter_mm", field_mm)?;
    if designed <= 0.0 {
        return Err(DomainError::NonPositiveDesignedDiameter(designed));
    }
    if field <= 0.0 {
        return Err(DomainError::NonPositiveDiameter(field));
    }

    let variance_pct = (field - designed).abs() * 100.0 / designed;
    Ok(DeviationCheck {
        is_violation: variance_pct > signature.max_variance_pct,
        variance_pct,
        is_enlarged: field > designed,
    })
}

/// Configuration deviation as a finding.
///
/// An enlarged bore carries an extra physics note: less hydraulic damping
/// means a sharper water hammer. A narrowed bore does not.
pub fn evaluate_configuration(
    designed_mm: f64,
    field_mm: f64,
    signature: &IncidentSignature,
) -> Result<CheckOutcome, DomainError> {
    let check = check_configuration_deviation(designed_mm, field_mm, signature)?;
    if !check.is_violation {
        debug!(
            incident = %signature.incident_id,
            variance_pct = check.variance_pct,
            "Configuration within tolerance"
        );
        return Ok(CheckOutcome::Passed);
    }

    warn!(
        incident = %signature.incident_id,
        variance_pct = check.variance_pct,
        max_variance_pct = signature.max_variance_pct,
        enlarged = check.is_enlarged,
        "Configuration deviation matches incident signature"
    );

    let mut finding = Finding::new(
        FindingSource::ConfigurationDeviation,
        Severity::CriticalAlarm,
        RecommendedAction::PreventStartup,
        format!(
            "{}: field diameter {field_mm:.1} mm deviates {:.1}% from design {designed_mm:.1} mm \
             (tolerance {:.1}%)",
            signature.incident_id, check.variance_pct, signature.max_variance_pct
        ),
    );
    if check.is_enlarged {
        finding = finding.with_message(
            "Enlarged bore reduces hydraulic damping; pressure waves travel unattenuated and \
             water hammer risk rises on load rejection",
        );
    }
    Ok(CheckOutcome::Finding(finding))
}

// ============================================================================
// Pressure Gradient
// ============================================================================

/// True when the live gradient strictly exceeds the historical trigger.
pub fn check_gradient_match(current_gradient_bar_per_s: f64, signature: &IncidentSignature) -> bool {
    current_gradient_bar_per_s > signature.trigger_gradient_bar_per_s
}

/// Gradient check as a finding.
pub fn evaluate_gradient(
    current_gradient_bar_per_s: f64,
    signature: &IncidentSignature,
) -> Result<CheckOutcome, DomainError> {
    let gradient = ensure_finite("pressure_gradient_bar_per_s", current_gradient_bar_per_s)?;
    if !check_gradient_match(gradient, signature) {
        return Ok(CheckOutcome::Passed);
    }

    warn!(
        incident = %signature.incident_id,
        gradient,
        trigger = signature.trigger_gradient_bar_per_s,
        "Pressure gradient matches incident trigger"
    );

    Ok(CheckOutcome::Finding(Finding::new(
        FindingSource::PressureGradient,
        Severity::Emergency,
        RecommendedAction::InitiateSafeShutdown,
        format!(
            "{}: pressure rising {gradient:.1} bar/s, above the {:.1} bar/s that preceded the \
             historical event",
            signature.incident_id, signature.trigger_gradient_bar_per_s
        ),
    )))
}

/// Steepest rise (bar/s) between consecutive samples of a chronological series.
///
/// Pairs whose timestamps do not increase are ignored. `Err` carries the
/// reason no gradient can be derived: fewer than two samples, or no pair
/// with positive elapsed time.
pub fn steepest_gradient(samples: &[PressureSample]) -> Result<f64, SkipReason> {
    if samples.len() < 2 {
        return Err(SkipReason::InsufficientSamples {
            have: samples.len(),
            need: 2,
        });
    }

    samples
        .windows(2)
        .filter_map(|pair| {
            let elapsed_s = elapsed_seconds(pair[0].timestamp, pair[1].timestamp);
            (elapsed_s > 0.0).then(|| (pair[1].pressure_bar - pair[0].pressure_bar) / elapsed_s)
        })
        .reduce(f64::max)
        .ok_or(SkipReason::NonPositiveElapsedTime)
}

/// Derive the gradient from raw samples, then run the gradient check.
pub fn evaluate_pressure_series(
    samples: &[PressureSample],
    signature: &IncidentSignature,
) -> Result<CheckOutcome, DomainError> {
    for s in samples {
        ensure_finite("pressure_bar", s.pressure_bar)?;
    }
    match steepest_gradient(samples) {
        Ok(gradient) => evaluate_gradient(gradient, signature),
        Err(reason) => {
            debug!(%reason, "Pressure gradient check skipped");
            Ok(CheckOutcome::Skipped(reason))
        }
    }
}
