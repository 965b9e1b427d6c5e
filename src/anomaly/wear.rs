//! Wear texture classification from runner inspection scores
//!
//! Pure lookup over two scores in [0, 1]:
//!
//! | smoothness | sharpness | class         |
//! |------------|-----------|---------------|
//! | > 0.8      | any       | EROSION       |
//! | < 0.4      | > 0.7     | CAVITATION    |
//! | otherwise  |           | INDETERMINATE |

use serde::{Deserialize, Serialize};

use crate::config::AnomalyConfig;
use crate::error::DomainError;
use crate::types::{CheckOutcome, Finding, FindingSource, RecommendedAction, Severity, WearTexture};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WearClass {
    /// Polished, wavy surface from sand and sediment
    Erosion,
    /// Porous, sharp-edged pitting
    Cavitation,
    Indeterminate,
}

impl std::fmt::Display for WearClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WearClass::Erosion => write!(f, "EROSION"),
            WearClass::Cavitation => write!(f, "CAVITATION"),
            WearClass::Indeterminate => write!(f, "INDETERMINATE"),
        }
    }
}

fn unit_score(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::OutOfUnitRange { field, value })
    }
}

pub fn classify_wear(texture: &WearTexture, cfg: &AnomalyConfig) -> Result<WearClass, DomainError> {
    let smoothness = unit_score("smoothness_score", texture.smoothness_score)?;
    let sharpness = unit_score("edge_sharpness", texture.edge_sharpness)?;

    Ok(if smoothness > cfg.erosion_smoothness_min {
        WearClass::Erosion
    } else if smoothness < cfg.cavitation_smoothness_max && sharpness > cfg.cavitation_sharpness_min
    {
        WearClass::Cavitation
    } else {
        WearClass::Indeterminate
    })
}

/// Wear class as a finding. Indeterminate still reports, at NORMAL, so the
/// inspection request reaches the operator.
pub fn evaluate_wear(texture: &WearTexture, cfg: &AnomalyConfig) -> Result<CheckOutcome, DomainError> {
    let class = classify_wear(texture, cfg)?;
    let scores = format!(
        "smoothness {:.2}, edge sharpness {:.2}",
        texture.smoothness_score, texture.edge_sharpness
    );

    let finding = match class {
        WearClass::Erosion => Finding::new(
            FindingSource::WearTexture,
            Severity::Warning,
            RecommendedAction::None,
            format!("EROSION wear ({scores}): sand/sediment abrasion"),
        )
        .with_message("Check desilter and intake filters"),
        WearClass::Cavitation => Finding::new(
            FindingSource::WearTexture,
            Severity::Warning,
            RecommendedAction::None,
            format!("CAVITATION wear ({scores}): porous sharp-edged pitting"),
        )
        .with_message("Check tailwater level and vacuum breaker"),
        WearClass::Indeterminate => Finding::new(
            FindingSource::WearTexture,
            Severity::Normal,
            RecommendedAction::None,
            format!("INDETERMINATE wear pattern ({scores}): manual inspection recommended"),
        ),
    };
    Ok(CheckOutcome::Finding(finding))
}
