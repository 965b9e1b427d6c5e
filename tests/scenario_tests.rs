//! Reference Scenario Tests
//!
//! End-to-end checks of the published reference cases through the public
//! API: penstock net head, bid screening, incident matching and thermal
//! offset, plus the cross-cutting properties (monotonicity, boundaries,
//! repeatability).

use hydro_diagnostics::config::PhysicsConfig;
use hydro_diagnostics::incidents::{check_configuration_deviation, IncidentLibrary};
use hydro_diagnostics::physics_engine::{self, darcy_friction_factor};
use hydro_diagnostics::verdict::{ConfigurationInput, PressureInput};
use hydro_diagnostics::{
    BidOffer, BidRecommendation, BidSite, DiagnosticEngine, EvaluationRequest, FindingSource,
    HydraulicProfile, RecommendedAction, Severity, ThermalContext, TurbineFamily,
};

fn scenario_a_profile() -> HydraulicProfile {
    HydraulicProfile::new(100.0, 5.0, 500.0, 1200.0, Some(0.045))
}

// ============================================================================
// Hydraulics
// ============================================================================

#[test]
fn scenario_a_net_head() {
    let engine = DiagnosticEngine::default();
    let report = engine.hydraulics(&scenario_a_profile()).unwrap();

    // Swamee-Jain at Re ≈ 4.06e6, ε = 3.75e-5
    assert!((report.friction_factor - 0.010_943_6).abs() < 1e-6);
    assert!((report.friction_loss_m - 4.542_38).abs() < 1e-4);
    assert!((report.local_loss_m - 0.099_618).abs() < 1e-5);
    assert_eq!(report.net_head_m, 95.358);
    assert_eq!(engine.net_head(&scenario_a_profile()).unwrap(), 95.358);
}

#[test]
fn other_reference_penstocks() {
    let physics = PhysicsConfig::default();
    let cases = [
        (HydraulicProfile::new(100.0, 5.0, 1000.0, 1200.0, Some(0.045)), 90.816),
        (HydraulicProfile::new(100.0, 5.0, 500.0, 1200.0, Some(1.5)), 91.248),
        (HydraulicProfile::new(30.0, 20.0, 200.0, 2500.0, Some(0.045)), 29.258),
    ];
    for (profile, expected) in cases {
        assert_eq!(
            physics_engine::compute_net_head(&profile, &physics).unwrap(),
            expected,
            "{profile:?}"
        );
    }
}

#[test]
fn net_head_monotonic_in_length_and_roughness() {
    let physics = PhysicsConfig::default();

    let heads: Vec<f64> = [50.0, 250.0, 750.0, 2000.0]
        .iter()
        .map(|&l| {
            let mut p = scenario_a_profile();
            p.pipe_length_m = l;
            physics_engine::compute_net_head(&p, &physics).unwrap()
        })
        .collect();
    assert!(heads.windows(2).all(|w| w[1] < w[0]), "{heads:?}");

    let heads: Vec<f64> = [0.01, 0.1, 1.0, 3.0]
        .iter()
        .map(|&ks| {
            let mut p = scenario_a_profile();
            p.roughness_ks_mm = Some(ks);
            physics_engine::compute_net_head(&p, &physics).unwrap()
        })
        .collect();
    assert!(heads.windows(2).all(|w| w[1] < w[0]), "{heads:?}");
}

#[test]
fn laminar_formula_at_reynolds_2000() {
    assert_eq!(darcy_friction_factor(2000.0, 1e-5, 2000.0), 0.032);
}

#[test]
fn calculators_are_bit_identical_on_repeat() {
    let engine = DiagnosticEngine::default();
    let a = engine.net_head(&scenario_a_profile()).unwrap();
    let b = engine.net_head(&scenario_a_profile()).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());

    let ctx = ThermalContext::new(5.0, 12.0, 55.0);
    let a = engine.thermal_offset(&ctx).unwrap();
    let b = engine.thermal_offset(&ctx).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Bid Screening
// ============================================================================

#[test]
fn scenario_b_francis_marketing_claim() {
    let engine = DiagnosticEngine::default();
    let site = BidSite {
        net_head_m: 95.358,
        design_flow_cms: 5.0,
    };
    let offer = BidOffer {
        manufacturer: "Acme Hydro".to_string(),
        turbine_family: TurbineFamily::Francis,
        claimed_efficiency_pct: 98.0,
        price: 4_000_000.0,
        rated_power_mw: None,
    };

    let evaluation = engine.evaluate_bid(&site, &offer).unwrap();
    assert_eq!(evaluation.score, 50.0);
    assert_eq!(evaluation.recommendation, BidRecommendation::Reject);
    assert!(!evaluation.is_realistic());

    let report = evaluation.to_verdict_report();
    assert_eq!(report.status, Severity::CriticalAlarm);
    assert_eq!(report.recommended_action, RecommendedAction::Reject);
    assert_eq!(report.score, Some(50.0));
}

// ============================================================================
// Incident Matching
// ============================================================================

#[test]
fn scenario_c_enlarged_pilot_line() {
    let library = IncidentLibrary::default();
    let signature = library.resolve(None).unwrap();
    let check = check_configuration_deviation(12.0, 16.0, signature).unwrap();
    assert!(check.is_violation);
    assert!((check.variance_pct - 33.3).abs() < 0.05);

    let engine = DiagnosticEngine::default();
    let request = EvaluationRequest {
        configuration: Some(ConfigurationInput {
            field_diameter_mm: 16.0,
            designed_diameter_mm: Some(12.0),
        }),
        ..EvaluationRequest::default()
    };
    let report = engine.evaluate(&request).unwrap();

    assert_eq!(report.status, Severity::CriticalAlarm);
    assert_eq!(report.recommended_action, RecommendedAction::PreventStartup);
    assert!(report.messages.iter().any(|m| m.contains("hydraulic damping")));
}

#[test]
fn scenario_d_gradient_escalates_to_emergency() {
    let engine = DiagnosticEngine::default();
    let request = EvaluationRequest {
        configuration: Some(ConfigurationInput {
            field_diameter_mm: 16.0,
            designed_diameter_mm: Some(12.0),
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
    // root cause before trigger
    assert_eq!(report.sources[0], FindingSource::ConfigurationDeviation);
    assert_eq!(report.sources[1], FindingSource::PressureGradient);
    let deviation_idx = report
        .messages
        .iter()
        .position(|m| m.contains("deviates"))
        .unwrap();
    let gradient_idx = report
        .messages
        .iter()
        .position(|m| m.contains("bar/s"))
        .unwrap();
    assert!(deviation_idx < gradient_idx);
}

// ============================================================================
// Thermal Offset
// ============================================================================

#[test]
fn scenario_e_shaft_offset() {
    let engine = DiagnosticEngine::default();
    let offset = engine
        .thermal_offset(&ThermalContext::new(5.0, 12.0, 55.0))
        .unwrap();

    assert!((offset.expansion_mm - 2.58).abs() < 1e-9);
    assert!((offset.required_cold_offset_mm + 2.58).abs() < 1e-9);
    assert_eq!(offset.expansion_mm, -offset.required_cold_offset_mm);
}

#[test]
fn non_positive_inputs_are_domain_errors() {
    let engine = DiagnosticEngine::default();

    let mut profile = scenario_a_profile();
    profile.pipe_diameter_mm = -5.0;
    assert!(engine.net_head(&profile).is_err());

    let mut profile = scenario_a_profile();
    profile.design_flow_cms = 0.0;
    assert!(engine.net_head(&profile).is_err());

    assert!(engine
        .thermal_offset(&ThermalContext::new(0.0, 12.0, 55.0))
        .is_err());
}
