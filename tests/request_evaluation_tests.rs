//! Request Evaluation Tests
//!
//! Feeds JSON requests, as an application layer would send them, through
//! `DiagnosticEngine::evaluate` and inspects the serialized verdicts.

use hydro_diagnostics::config::{EngineConfig, ThermalInertiaMode};
use hydro_diagnostics::{
    DiagnosticEngine, DomainError, EvaluationRequest, FindingSource, RecommendedAction, Severity,
    SkipReason,
};

fn evaluate_json(engine: &DiagnosticEngine, json: &str) -> Result<serde_json::Value, DomainError> {
    let request: EvaluationRequest = serde_json::from_str(json).unwrap();
    let report = engine.evaluate(&request)?;
    Ok(serde_json::to_value(report).unwrap())
}

// ============================================================================
// Full Requests
// ============================================================================

#[test]
fn idle_unit_with_grease_and_cavitation() {
    let engine = DiagnosticEngine::default();
    let report = evaluate_json(
        &engine,
        r#"{
            "equipment": {
                "status": "STANDBY",
                "standby_grease_cycles": 34
            },
            "wear": { "smoothness_score": 0.2, "edge_sharpness": 0.85 }
        }"#,
    )
    .unwrap();

    assert_eq!(report["status"], "CRITICAL_ALARM");
    assert_eq!(report["recommended_action"], "PREVENT_STARTUP");
    assert_eq!(report["sources"][0], "STANDBY_GREASE");
    assert_eq!(report["sources"][1], "WEAR_TEXTURE");
    assert!(report.get("score").is_none());

    let messages: Vec<&str> = report["messages"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m.as_str())
        .collect();
    assert!(messages[0].contains("seal blowout"));
    assert!(messages.iter().any(|m| m.contains("CAVITATION")));
}

#[test]
fn pressure_samples_derive_gradient() {
    let engine = DiagnosticEngine::default();
    let report = evaluate_json(
        &engine,
        r#"{
            "incident_id": "PILOT_LINE_WATER_HAMMER",
            "pressure": {
                "samples": [
                    { "timestamp": "2024-05-01T08:00:00Z",     "pressure_bar": 40.0 },
                    { "timestamp": "2024-05-01T08:00:00.500Z", "pressure_bar": 45.0 },
                    { "timestamp": "2024-05-01T08:00:00.700Z", "pressure_bar": 60.0 }
                ]
            }
        }"#,
    )
    .unwrap();

    // 15 bar in 0.2 s = 75 bar/s
    assert_eq!(report["status"], "EMERGENCY");
    assert_eq!(report["recommended_action"], "INITIATE_SAFE_SHUTDOWN");
}

#[test]
fn bid_request_reports_score_and_warning() {
    let engine = DiagnosticEngine::default();
    let report = evaluate_json(
        &engine,
        r#"{
            "bid": {
                "site": { "net_head_m": 95.4, "design_flow_cms": 5.0 },
                "offer": {
                    "manufacturer": "Nordic Turbines",
                    "turbine_family": "francis",
                    "claimed_efficiency_pct": 96.2,
                    "price": 3500000.0,
                    "rated_power_mw": 4.2
                }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(report["status"], "WARNING");
    assert_eq!(report["recommended_action"], "NEGOTIATE");
    assert_eq!(report["score"], 80.0);
}

#[test]
fn everything_at_once_orders_static_first() {
    let engine = DiagnosticEngine::default();
    let request: EvaluationRequest = serde_json::from_str(
        r#"{
            "bid": {
                "site": { "net_head_m": 120.0, "design_flow_cms": 8.0 },
                "offer": {
                    "manufacturer": "Acme Hydro",
                    "turbine_family": "KAPLAN",
                    "claimed_efficiency_pct": 94.0,
                    "price": 9000000.0
                }
            },
            "configuration": { "field_diameter_mm": 16.0 },
            "pressure": { "gradient_bar_per_s": 12.0 },
            "equipment": {
                "status": "RUNNING",
                "recent_temperature_series": [
                    { "timestamp": "2024-05-01T08:00:00Z", "temp_c": 58.0 },
                    { "timestamp": "2024-05-01T08:01:00Z", "temp_c": 61.5 }
                ]
            }
        }"#,
    )
    .unwrap();

    let report = engine.evaluate(&request).unwrap();
    assert_eq!(report.status, Severity::Emergency);
    assert_eq!(report.recommended_action, RecommendedAction::InitiateSafeShutdown);
    assert_eq!(report.score, Some(70.0));
    assert_eq!(
        report.sources,
        vec![
            FindingSource::BidPlausibility,
            FindingSource::ConfigurationDeviation,
            FindingSource::ThermalInertia,
        ]
    );
    // grease check does not apply to a running unit
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::StatusNotApplicable);
}

// ============================================================================
// Skips and Errors
// ============================================================================

#[test]
fn duplicate_timestamps_skip_rather_than_fail() {
    let engine = DiagnosticEngine::default();
    let report = evaluate_json(
        &engine,
        r#"{
            "equipment": {
                "status": "RUNNING",
                "recent_temperature_series": [
                    { "timestamp": "2024-05-01T08:00:00Z", "temp_c": 58.0 },
                    { "timestamp": "2024-05-01T08:00:00Z", "temp_c": 90.0 }
                ]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(report["status"], "NORMAL");
    let skipped = report["skipped"].as_array().unwrap();
    assert!(skipped
        .iter()
        .any(|s| s["source"] == "THERMAL_INERTIA" && s["reason"] == "NON_POSITIVE_ELAPSED_TIME"));
}

#[test]
fn shutdown_jump_mode_from_config() {
    let mut config = EngineConfig::default();
    config.anomaly.thermal_inertia_mode = ThermalInertiaMode::ShutdownJump;
    let engine = DiagnosticEngine::new(config);

    let report = evaluate_json(
        &engine,
        r#"{
            "equipment": {
                "status": "SHUTDOWN_IN_PROGRESS",
                "recent_temperature_series": [
                    { "timestamp": "2024-05-01T08:00:00Z", "temp_c": 66.0 },
                    { "timestamp": "2024-05-01T08:00:10Z", "temp_c": 66.4 },
                    { "timestamp": "2024-05-01T08:00:20Z", "temp_c": 69.0 }
                ]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(report["status"], "EMERGENCY");
}

#[test]
fn invalid_wear_score_aborts_evaluation() {
    let engine = DiagnosticEngine::default();
    let err = evaluate_json(
        &engine,
        r#"{ "wear": { "smoothness_score": 1.7, "edge_sharpness": 0.2 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::OutOfUnitRange { .. }));
}

#[test]
fn unknown_family_falls_back_to_default_ceiling() {
    let engine = DiagnosticEngine::default();
    let report = evaluate_json(
        &engine,
        r#"{
            "bid": {
                "site": { "net_head_m": 200.0, "design_flow_cms": 3.0 },
                "offer": {
                    "manufacturer": "Obscure Works",
                    "turbine_family": "Turgo",
                    "claimed_efficiency_pct": 89.5,
                    "price": 1.0
                }
            }
        }"#,
    )
    .unwrap();

    // 89.5 is within 1 pt of the 90 % default ceiling
    assert_eq!(report["score"], 80.0);
    assert_eq!(report["status"], "WARNING");
}
