//! Shared value records for the hydraulic/thermal diagnostic rule engine
//!
//! Every record here is constructed fresh by the caller for one evaluation:
//! - Hydraulics: HydraulicProfile, PipeMaterial, HydraulicReport
//! - Procurement: BidOffer, TurbineFamily, BidEvaluation
//! - Thermal: ThermalContext, ShaftMaterial, ThermalOffset
//! - Equipment: EquipmentState, EquipmentStatus, TemperatureSample
//! - Incidents: IncidentSignature, PressureSample
//! - Verdicts: Severity, RecommendedAction, Finding, CheckOutcome, VerdictReport

mod hydraulics;
mod bid;
mod thermal;
mod equipment;
mod incident;
mod verdict;

pub use hydraulics::*;
pub use bid::*;
pub use thermal::*;
pub use equipment::*;
pub use incident::*;
pub use verdict::*;

use chrono::{DateTime, Utc};

/// Seconds between two sample timestamps at microsecond resolution.
///
/// Falls back to milliseconds when the span overflows microseconds.
pub(crate) fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1_000.0,
        |us| us as f64 / 1_000_000.0,
    )
}
