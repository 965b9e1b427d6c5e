//! Shaft thermal growth and cold alignment offset

use tracing::debug;

use super::round_to;
use crate::config::{defaults, PhysicsConfig};
use crate::error::{ensure_finite, DomainError};
use crate::types::{ThermalContext, ThermalOffset, MILS_PER_MM};

/// Linear thermal growth of a shaft and the cold offset that cancels it.
///
/// expansion (mm) = L(m) × 1000 × α × ΔT, rounded to 4 decimals. The cold
/// offset is the exact negation of the rounded expansion, so the two always
/// sum to zero. A negative ΔT (operating colder than ambient) gives a
/// contraction and a positive offset.
pub fn compute_offset(
    ctx: &ThermalContext,
    physics: &PhysicsConfig,
) -> Result<ThermalOffset, DomainError> {
    let length = ensure_finite("shaft_length_m", ctx.shaft_length_m)?;
    ensure_finite("ambient_temp_c", ctx.ambient_temp_c)?;
    ensure_finite("operating_temp_c", ctx.operating_temp_c)?;
    if length <= 0.0 {
        return Err(DomainError::NonPositiveShaftLength(length));
    }

    let alpha = ensure_finite(
        "expansion_coefficient",
        ctx.material.expansion_coefficient(physics.steel_expansion_coefficient),
    )?;
    let delta_t = ctx.delta_t();

    let expansion_mm = round_to(length * 1000.0 * alpha * delta_t, defaults::OFFSET_DECIMALS);
    let required_cold_offset_mm = -expansion_mm;
    let expansion_mils = round_to(expansion_mm * MILS_PER_MM, 2);

    debug!(
        shaft_length_m = length,
        delta_t,
        alpha,
        expansion_mm,
        "Thermal offset computed"
    );

    Ok(ThermalOffset {
        expansion_mm,
        required_cold_offset_mm,
        expansion_mils,
        coefficient: alpha,
        delta_t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShaftMaterial;

    #[test]
    fn test_steel_shaft_offset() {
        let physics = PhysicsConfig::default();
        let offset = compute_offset(&ThermalContext::new(5.0, 22.0, 65.0), &physics).unwrap();

        assert!((offset.expansion_mm - 2.58).abs() < 1e-9);
        assert!((offset.required_cold_offset_mm + 2.58).abs() < 1e-9);
        assert_eq!(offset.delta_t, 43.0);
        assert!((offset.expansion_mils - 101.57).abs() < 1e-9);
    }

    #[test]
    fn test_offset_cancels_expansion_exactly() {
        let physics = PhysicsConfig::default();
        for (len, amb, op) in [(5.0, 22.0, 65.0), (3.3, 17.5, 71.2), (12.0, 30.0, 10.0)] {
            let offset = compute_offset(&ThermalContext::new(len, amb, op), &physics).unwrap();
            assert_eq!(offset.expansion_mm, -offset.required_cold_offset_mm);
        }
    }

    #[test]
    fn test_no_temperature_change_gives_zero() {
        let physics = PhysicsConfig::default();
        let offset = compute_offset(&ThermalContext::new(5.0, 40.0, 40.0), &physics).unwrap();
        assert_eq!(offset.expansion_mm, 0.0);
        assert_eq!(offset.required_cold_offset_mm, 0.0);
    }

    #[test]
    fn test_colder_than_ambient_contracts() {
        let physics = PhysicsConfig::default();
        let offset = compute_offset(&ThermalContext::new(2.0, 30.0, 10.0), &physics).unwrap();
        assert!(offset.expansion_mm < 0.0);
        assert!(offset.required_cold_offset_mm > 0.0);
    }

    #[test]
    fn test_material_coefficients() {
        let physics = PhysicsConfig::default();
        let ctx = ThermalContext::new(1.0, 20.0, 70.0);

        let stainless =
            compute_offset(&ctx.clone().with_material(ShaftMaterial::Stainless), &physics).unwrap();
        let titanium =
            compute_offset(&ctx.clone().with_material(ShaftMaterial::Titanium), &physics).unwrap();

        assert!((stainless.expansion_mm - 0.8).abs() < 1e-9);
        assert!((titanium.expansion_mm - 0.43).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_shaft_length_rejected() {
        let physics = PhysicsConfig::default();
        assert_eq!(
            compute_offset(&ThermalContext::new(0.0, 20.0, 60.0), &physics),
            Err(DomainError::NonPositiveShaftLength(0.0))
        );
        assert!(compute_offset(&ThermalContext::new(-1.0, 20.0, 60.0), &physics).is_err());
    }
}
