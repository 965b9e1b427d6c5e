//! Historical incident signatures and pressure telemetry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::defaults;

fn default_max_variance_pct() -> f64 {
    defaults::MAX_VARIANCE_PCT
}

/// A known incident reduced to the two conditions that preceded it:
/// a field diameter that drifted from design, and a pressure gradient spike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidentSignature {
    pub incident_id: String,
    /// As-designed bore of the affected line (mm)
    pub designed_diameter_mm: f64,
    /// Tolerated deviation of the field diameter from design (%)
    #[serde(default = "default_max_variance_pct")]
    pub max_variance_pct: f64,
    /// Pressure rise rate that triggered the historical event (bar/s)
    pub trigger_gradient_bar_per_s: f64,
    /// Free-text summary of what happened
    #[serde(default)]
    pub description: String,
}

/// Outcome of comparing a field diameter with design
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeviationCheck {
    pub is_violation: bool,
    /// |field - designed| / designed × 100
    pub variance_pct: f64,
    /// Field bore is larger than designed
    pub is_enlarged: bool,
}

/// Penstock / pilot-line pressure reading (bar)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PressureSample {
    pub timestamp: DateTime<Utc>,
    pub pressure_bar: f64,
}

impl PressureSample {
    pub fn new(timestamp: DateTime<Utc>, pressure_bar: f64) -> Self {
        Self {
            timestamp,
            pressure_bar,
        }
    }
}
