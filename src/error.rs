//! Error taxonomy for invalid physical input
//!
//! A `DomainError` is fatal to the single evaluation call that raised it and
//! is always returned to the caller. Missing data for a rule is not an error;
//! see `CheckOutcome::Skipped`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Pipe diameter must be > 0 mm, got {0}")]
    NonPositiveDiameter(f64),

    #[error("Design flow must be > 0 m³/s, got {0}")]
    NonPositiveFlow(f64),

    #[error("Shaft length must be > 0 m, got {0}")]
    NonPositiveShaftLength(f64),

    #[error("Designed diameter must be > 0 mm, got {0}")]
    NonPositiveDesignedDiameter(f64),

    #[error("Pipe length must be >= 0 m, got {0}")]
    NegativePipeLength(f64),

    #[error("Roughness ks must be >= 0 mm, got {0}")]
    NegativeRoughness(f64),

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("Unknown incident signature '{0}'")]
    UnknownIncident(String),
}

/// Reject NaN and infinities before they reach a formula.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { field, value })
    }
}
