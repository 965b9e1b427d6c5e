//! Equipment status, operational counters and short telemetry windows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating status of a unit at evaluation time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Running,
    #[default]
    Stopped,
    Standby,
    ShutdownInProgress,
}

impl EquipmentStatus {
    /// Unit is parked with the lubrication system cycling
    pub const fn is_idle(self) -> bool {
        matches!(self, EquipmentStatus::Stopped | EquipmentStatus::Standby)
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentStatus::Running => write!(f, "RUNNING"),
            EquipmentStatus::Stopped => write!(f, "STOPPED"),
            EquipmentStatus::Standby => write!(f, "STANDBY"),
            EquipmentStatus::ShutdownInProgress => write!(f, "SHUTDOWN_IN_PROGRESS"),
        }
    }
}

/// Bearing / oil temperature reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureSample {
    pub timestamp: DateTime<Utc>,
    pub temp_c: f64,
}

impl TemperatureSample {
    pub fn new(timestamp: DateTime<Utc>, temp_c: f64) -> Self {
        Self { timestamp, temp_c }
    }
}

/// Snapshot of one unit handed to the anomaly guard.
///
/// `recent_temperature_series` must be chronological; the guard only ever
/// looks at the newest samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EquipmentState {
    pub status: EquipmentStatus,
    /// Automatic grease cycles executed while the unit was not running
    #[serde(default)]
    pub standby_grease_cycles: u32,
    #[serde(default)]
    pub recent_temperature_series: Vec<TemperatureSample>,
}

/// Surface texture scores from a runner inspection image, both in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WearTexture {
    pub smoothness_score: f64,
    pub edge_sharpness: f64,
}
