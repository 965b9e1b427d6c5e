//! Penstock hydraulics: friction and local losses between gross and net head
//!
//! Key calculations:
//! - Darcy friction factor (laminar closed form / Swamee-Jain)
//! - Darcy-Weisbach friction loss and the local-loss allowance
//! - Net head, hydraulic power estimate and head-based family suggestion

use std::f64::consts::PI;

use tracing::debug;

use super::round_to;
use crate::config::{defaults, PhysicsConfig};
use crate::error::{ensure_finite, DomainError};
use crate::types::{FlowRegime, HydraulicProfile, HydraulicReport, TurbineFamily};

// ============================================================================
// Friction Factor
// ============================================================================

/// Darcy friction factor for a given Reynolds number.
///
/// - Re <= `laminar_limit`: f = 64 / Re
/// - otherwise Swamee-Jain: f = 0.25 / [log₁₀(ε/3.7 + 5.74/Re^0.9)]²
///
/// `relative_roughness` must already be floored above zero and `reynolds`
/// must be positive; `analyze` guarantees both.
pub fn darcy_friction_factor(reynolds: f64, relative_roughness: f64, laminar_limit: f64) -> f64 {
    if reynolds <= laminar_limit {
        return 64.0 / reynolds;
    }

    let log_term = (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9)).log10();
    0.25 / (log_term * log_term)
}

/// Flow regime the friction factor will use
pub fn flow_regime(reynolds: f64, laminar_limit: f64) -> FlowRegime {
    if reynolds <= laminar_limit {
        FlowRegime::Laminar
    } else {
        FlowRegime::Turbulent
    }
}

// ============================================================================
// Net Head
// ============================================================================

fn validate_profile(profile: &HydraulicProfile) -> Result<(), DomainError> {
    let diameter = ensure_finite("pipe_diameter_mm", profile.pipe_diameter_mm)?;
    let flow = ensure_finite("design_flow_cms", profile.design_flow_cms)?;
    ensure_finite("gross_head_m", profile.gross_head_m)?;
    let length = ensure_finite("pipe_length_m", profile.pipe_length_m)?;

    if diameter <= 0.0 {
        return Err(DomainError::NonPositiveDiameter(diameter));
    }
    if flow <= 0.0 {
        return Err(DomainError::NonPositiveFlow(flow));
    }
    if length < 0.0 {
        return Err(DomainError::NegativePipeLength(length));
    }
    if let Some(ks) = profile.roughness_ks_mm {
        let ks = ensure_finite("roughness_ks_mm", ks)?;
        if ks < 0.0 {
            return Err(DomainError::NegativeRoughness(ks));
        }
    }
    Ok(())
}

/// Full hydraulic loss breakdown for a profile.
///
/// Area = π(d/2)², v = Q/A, Re = v·d/ν, friction loss = f·(L/d)·v²/2g,
/// local losses = `local_loss_fraction`·v²/2g. Net head is rounded to
/// 3 decimals; the intermediate figures are not rounded.
pub fn analyze(
    profile: &HydraulicProfile,
    physics: &PhysicsConfig,
) -> Result<HydraulicReport, DomainError> {
    validate_profile(profile)?;

    let d_m = profile.pipe_diameter_mm / 1000.0;
    let area = PI * (d_m / 2.0).powi(2);
    let velocity = profile.design_flow_cms / area;

    let ks_mm = profile.effective_roughness_mm(physics.default_roughness_ks_mm);
    let relative_roughness = ((ks_mm / 1000.0) / d_m).max(physics.min_relative_roughness);

    let reynolds = velocity * d_m / physics.kinematic_viscosity_m2_s;
    let regime = flow_regime(reynolds, physics.laminar_reynolds_limit);
    let friction_factor =
        darcy_friction_factor(reynolds, relative_roughness, physics.laminar_reynolds_limit);

    let velocity_head = velocity * velocity / (2.0 * physics.gravity_m_s2);
    let friction_loss = friction_factor * (profile.pipe_length_m / d_m) * velocity_head;
    let local_loss = physics.local_loss_fraction * velocity_head;

    let net_head = round_to(
        profile.gross_head_m - friction_loss - local_loss,
        defaults::NET_HEAD_DECIMALS,
    );

    debug!(
        velocity,
        reynolds,
        %regime,
        friction_factor,
        friction_loss,
        local_loss,
        net_head,
        "Hydraulic analysis complete"
    );

    Ok(HydraulicReport {
        velocity_m_s: velocity,
        reynolds,
        regime,
        relative_roughness,
        friction_factor,
        velocity_head_m: velocity_head,
        friction_loss_m: friction_loss,
        local_loss_m: local_loss,
        net_head_m: net_head,
    })
}

/// Net head (m) after friction and local losses, rounded to 3 decimals.
pub fn compute_net_head(
    profile: &HydraulicProfile,
    physics: &PhysicsConfig,
) -> Result<f64, DomainError> {
    analyze(profile, physics).map(|report| report.net_head_m)
}

// ============================================================================
// Power and Family Suggestion
// ============================================================================

/// Hydraulic power at the shaft: P = ρ·g·Q·H·η (kW).
///
/// `efficiency` is a fraction in (0, 1].
pub fn estimate_power_kw(
    net_head_m: f64,
    flow_cms: f64,
    efficiency: f64,
    physics: &PhysicsConfig,
) -> Result<f64, DomainError> {
    let flow = ensure_finite("flow_cms", flow_cms)?;
    let head = ensure_finite("net_head_m", net_head_m)?;
    let eta = ensure_finite("efficiency", efficiency)?;
    if flow <= 0.0 {
        return Err(DomainError::NonPositiveFlow(flow));
    }
    if eta <= 0.0 || eta > 1.0 {
        return Err(DomainError::OutOfUnitRange {
            field: "efficiency",
            value: eta,
        });
    }

    Ok(physics.water_density_kg_m3 * physics.gravity_m_s2 * flow * head.max(0.0) * eta / 1000.0)
}

/// Turbine family that naturally fits a net head.
///
/// Below 30 m Kaplan, below 400 m Francis, Pelton above.
pub fn suggest_turbine_family(net_head_m: f64) -> TurbineFamily {
    if net_head_m < defaults::KAPLAN_HEAD_UPPER_M {
        TurbineFamily::Kaplan
    } else if net_head_m < defaults::FRANCIS_HEAD_UPPER_M {
        TurbineFamily::Francis
    } else {
        TurbineFamily::Pelton
    }
}
