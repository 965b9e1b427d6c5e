//! Config Loading Tests
//!
//! Loads engine configs from files on disk, checks typo detection and
//! range validation, and confirms that a loaded config changes engine
//! behaviour.

use std::fs;

use hydro_diagnostics::config::validation::{
    known_config_keys, suggest_correction, validate_unknown_keys,
};
use hydro_diagnostics::config::{ConfigError, ThermalInertiaMode};
use hydro_diagnostics::{
    DiagnosticEngine, EngineConfig, EquipmentState, EquipmentStatus, EvaluationRequest, Severity,
};
use tempfile::TempDir;

// ============================================================================
// Files on Disk
// ============================================================================

#[test]
fn load_plant_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("diagnostics.toml");
    fs::write(
        &path,
        r#"
[plant]
name = "Peruca"
unit = "G2"

[anomaly]
standby_grease_cycle_limit = 5
thermal_inertia_mode = "shutdown_jump"

[[incidents]]
incident_id = "PILOT_LINE_WATER_HAMMER"
designed_diameter_mm = 12.0
trigger_gradient_bar_per_s = 50.0

[[incidents]]
incident_id = "SPIRAL_CASE_DRAIN"
designed_diameter_mm = 150.0
max_variance_pct = 10.0
trigger_gradient_bar_per_s = 20.0
"#,
    )
    .unwrap();

    let config = EngineConfig::load_from_file(&path).unwrap();
    assert_eq!(config.plant.name, "Peruca");
    assert_eq!(config.anomaly.standby_grease_cycle_limit, 5);
    assert_eq!(config.anomaly.thermal_inertia_mode, ThermalInertiaMode::ShutdownJump);
    assert_eq!(config.incidents.len(), 2);

    let engine = DiagnosticEngine::new(config);
    assert!(engine.library().get("SPIRAL_CASE_DRAIN").is_some());
}

#[test]
fn loaded_threshold_changes_verdict() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("strict.toml");
    fs::write(&path, "[anomaly]\nstandby_grease_cycle_limit = 5\n").unwrap();

    let request = EvaluationRequest {
        equipment: Some(EquipmentState {
            status: EquipmentStatus::Standby,
            standby_grease_cycles: 8,
            recent_temperature_series: Vec::new(),
        }),
        ..EvaluationRequest::default()
    };

    let default_report = DiagnosticEngine::default().evaluate(&request).unwrap();
    assert_eq!(default_report.status, Severity::Normal);

    let strict = DiagnosticEngine::new(EngineConfig::load_from_file(&path).unwrap());
    let strict_report = strict.evaluate(&request).unwrap();
    assert_eq!(strict_report.status, Severity::CriticalAlarm);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = EngineConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn broken_toml_is_parse_error_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[physics\ngravity_m_s2 = 9.81").unwrap();

    let err = EngineConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(ref p, _) if p == &path));
}

#[test]
fn inconsistent_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        r#"
[bid]
shortlist_above_score = 40.0
francis_ceiling_pct = 120.0

[anomaly]
cavitation_smoothness_max = 0.9
"#,
    )
    .unwrap();

    let err = EngineConfig::load_from_file(&path).unwrap_err();
    let ConfigError::Validation(errors) = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(errors.iter().any(|e| e.contains("shortlist_above_score")));
    assert!(errors.iter().any(|e| e.contains("francis_ceiling_pct")));
    assert!(errors.iter().any(|e| e.contains("cavitation_smoothness_max")));
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = EngineConfig::default();
    config.plant.name = "Zakucac".to_string();
    config.physics.local_loss_fraction = 0.15;
    config.save_to_file(&path).unwrap();

    let back = EngineConfig::load_from_file(&path).unwrap();
    assert_eq!(back.plant.name, "Zakucac");
    assert_eq!(back.physics.local_loss_fraction, 0.15);
    assert_eq!(back.incidents, config.incidents);
}

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_physics_section_suggests_fix() {
    let warnings = validate_unknown_keys("[physics]\ngravty_m_s2 = 9.81\n");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("physics.gravity_m_s2"));
}

#[test]
fn typo_in_incident_table_is_detected() {
    let warnings = validate_unknown_keys(
        r#"
[[incidents]]
incident_id = "X"
designed_diameter_mm = 10.0
trigger_gradent_bar_per_s = 5.0
"#,
    );
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].field.contains("trigger_gradent_bar_per_s"));
}

#[test]
fn far_off_key_gets_no_suggestion() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("plant.completely_unrelated", &known), None);
}
