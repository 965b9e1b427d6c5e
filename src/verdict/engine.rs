//! Diagnostic engine facade
//!
//! Owns one immutable `EngineConfig` and the incident library built from it.
//! Every method takes `&self`, so a single engine can serve any number of
//! concurrent callers.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::VerdictAggregator;
use crate::anomaly::AnomalyGuard;
use crate::config::EngineConfig;
use crate::error::DomainError;
use crate::incidents::{self, IncidentLibrary};
use crate::physics_engine;
use crate::procurement;
use crate::types::{
    BidEvaluation, BidOffer, BidSite, EquipmentState, FindingSource, HydraulicProfile,
    HydraulicReport, PressureSample, ThermalContext, ThermalOffset, VerdictReport, WearTexture,
};

// ============================================================================
// Request
// ============================================================================

/// Offer plus the site it is judged against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidRequest {
    pub site: BidSite,
    pub offer: BidOffer,
}

/// Field-measured bore of the line covered by the incident signature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfigurationInput {
    pub field_diameter_mm: f64,
    /// Overrides the signature's designed diameter when the plant differs
    pub designed_diameter_mm: Option<f64>,
}

/// Live pressure data: an explicit gradient wins over raw samples
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PressureInput {
    pub gradient_bar_per_s: Option<f64>,
    #[serde(default)]
    pub samples: Vec<PressureSample>,
}

/// Everything known about one unit at evaluation time. Absent parts are
/// simply not checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EvaluationRequest {
    /// Incident signature for the deviation and gradient checks; the first
    /// library entry when absent
    pub incident_id: Option<String>,
    pub bid: Option<BidRequest>,
    pub configuration: Option<ConfigurationInput>,
    pub pressure: Option<PressureInput>,
    pub equipment: Option<EquipmentState>,
    pub wear: Option<WearTexture>,
}

// ============================================================================
// Engine
// ============================================================================

#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    config: EngineConfig,
    library: IncidentLibrary,
}

impl DiagnosticEngine {
    pub fn new(config: EngineConfig) -> Self {
        let library = IncidentLibrary::from_config(&config);
        info!(
            plant = %config.plant.name,
            incidents = library.len(),
            thermal_mode = %config.anomaly.thermal_inertia_mode,
            "Diagnostic engine ready"
        );
        Self { config, library }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn library(&self) -> &IncidentLibrary {
        &self.library
    }

    pub fn hydraulics(&self, profile: &HydraulicProfile) -> Result<HydraulicReport, DomainError> {
        physics_engine::analyze(profile, &self.config.physics)
    }

    pub fn net_head(&self, profile: &HydraulicProfile) -> Result<f64, DomainError> {
        physics_engine::compute_net_head(profile, &self.config.physics)
    }

    pub fn thermal_offset(&self, ctx: &ThermalContext) -> Result<ThermalOffset, DomainError> {
        physics_engine::compute_offset(ctx, &self.config.physics)
    }

    pub fn evaluate_bid(&self, site: &BidSite, offer: &BidOffer) -> Result<BidEvaluation, DomainError> {
        procurement::evaluate(site, offer, &self.config.bid)
    }

    /// Run every check the request has data for and merge the results.
    ///
    /// Any `DomainError` aborts the whole evaluation; missing data only
    /// skips the affected check.
    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<VerdictReport, DomainError> {
        let mut aggregator = VerdictAggregator::new();

        if let Some(bid) = &request.bid {
            let evaluation = self.evaluate_bid(&bid.site, &bid.offer)?;
            aggregator.set_score(evaluation.score).push(evaluation.to_finding());
        }

        if request.configuration.is_some() || request.pressure.is_some() {
            let signature = self.library.resolve(request.incident_id.as_deref())?;

            if let Some(cfg) = &request.configuration {
                let designed = cfg.designed_diameter_mm.unwrap_or(signature.designed_diameter_mm);
                aggregator.record(
                    FindingSource::ConfigurationDeviation,
                    incidents::evaluate_configuration(designed, cfg.field_diameter_mm, signature)?,
                );
            }

            if let Some(pressure) = &request.pressure {
                let outcome = match pressure.gradient_bar_per_s {
                    Some(gradient) => incidents::evaluate_gradient(gradient, signature)?,
                    None => incidents::evaluate_pressure_series(&pressure.samples, signature)?,
                };
                aggregator.record(FindingSource::PressureGradient, outcome);
            }
        }

        let guard = AnomalyGuard::new(&self.config.anomaly);
        if let Some(state) = &request.equipment {
            for (source, outcome) in guard.evaluate_state(state)? {
                aggregator.record(source, outcome);
            }
        }
        if let Some(texture) = &request.wear {
            aggregator.record(FindingSource::WearTexture, guard.evaluate_wear(texture)?);
        }

        Ok(aggregator.finish())
    }
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EquipmentStatus, RecommendedAction, Severity, TurbineFamily};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<DiagnosticEngine>();
    }

    #[test]
    fn test_empty_request_is_normal() {
        let engine = DiagnosticEngine::default();
        let report = engine.evaluate(&EvaluationRequest::default()).unwrap();
        assert!(report.is_normal());
        assert_eq!(report.recommended_action, RecommendedAction::None);
    }

    #[test]
    fn test_deviation_then_gradient_escalates() {
        let engine = DiagnosticEngine::default();
        let request = EvaluationRequest {
            configuration: Some(ConfigurationInput {
                field_diameter_mm: 16.0,
                designed_diameter_mm: None,
            }),
            pressure: Some(PressureInput {
                gradient_bar_per_s: Some(65.0),
                samples: Vec::new(),
            }),
            ..EvaluationRequest::default()
        };

        let report = engine.evaluate(&request).unwrap();
        assert_eq!(report.status, Severity::Emergency);
        assert_eq!(report.recommended_action, RecommendedAction::InitiateSafeShutdown);
        assert_eq!(
            report.sources,
            vec![FindingSource::ConfigurationDeviation, FindingSource::PressureGradient]
        );
        assert!(report.messages.iter().any(|m| m.contains("hydraulic damping")));
    }

    #[test]
    fn test_bid_score_carried_on_report() {
        let engine = DiagnosticEngine::default();
        let request = EvaluationRequest {
            bid: Some(BidRequest {
                site: BidSite {
                    net_head_m: 120.0,
                    design_flow_cms: 20.0,
                },
                offer: BidOffer {
                    manufacturer: "Acme Hydro".to_string(),
                    turbine_family: TurbineFamily::Francis,
                    claimed_efficiency_pct: 98.0,
                    price: 12_000_000.0,
                    rated_power_mw: None,
                },
            }),
            ..EvaluationRequest::default()
        };

        let report = engine.evaluate(&request).unwrap();
        assert_eq!(report.score, Some(50.0));
        assert_eq!(report.status, Severity::CriticalAlarm);
        assert_eq!(report.recommended_action, RecommendedAction::Reject);
    }

    #[test]
    fn test_unknown_incident_is_error() {
        let engine = DiagnosticEngine::default();
        let request = EvaluationRequest {
            incident_id: Some("SPIRAL_CASE".to_string()),
            configuration: Some(ConfigurationInput {
                field_diameter_mm: 16.0,
                designed_diameter_mm: None,
            }),
            ..EvaluationRequest::default()
        };
        assert!(matches!(
            engine.evaluate(&request),
            Err(DomainError::UnknownIncident(_))
        ));
    }

    #[test]
    fn test_equipment_skips_are_listed() {
        let engine = DiagnosticEngine::default();
        let request = EvaluationRequest {
            equipment: Some(EquipmentState {
                status: EquipmentStatus::Running,
                standby_grease_cycles: 0,
                recent_temperature_series: Vec::new(),
            }),
            ..EvaluationRequest::default()
        };
        let report = engine.evaluate(&request).unwrap();
        assert!(report.is_normal());
        assert_eq!(report.skipped.len(), 2);
    }
}
