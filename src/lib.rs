//! Hydro Diagnostics: hydraulic and thermal diagnostic rule engine
//!
//! Deterministic physics and rule checks for hydropower units, merged into
//! one ranked verdict.
//!
//! ## Architecture
//!
//! - **Physics Engine**: penstock net head (Darcy-Weisbach / Swamee-Jain),
//!   shaft thermal offset
//! - **Procurement**: physics plausibility screening of turbine offers
//! - **Incidents**: historical incident signatures and the pattern watcher
//! - **Anomaly Guard**: standby grease, thermal inertia, wear texture
//! - **Verdict**: aggregation into a `VerdictReport` and the
//!   `DiagnosticEngine` facade
//!
//! Every evaluator is a pure function of its inputs and an immutable
//! `EngineConfig`; nothing is persisted and no global state exists.

pub mod anomaly;
pub mod config;
pub mod error;
pub mod incidents;
pub mod physics_engine;
pub mod procurement;
pub mod types;
pub mod verdict;

// Re-export configuration
pub use config::{ConfigError, EngineConfig};

pub use error::DomainError;

// Re-export commonly used types
pub use types::{
    BidEvaluation, BidOffer, BidRecommendation, BidSite, CheckOutcome, EquipmentState,
    EquipmentStatus, Finding, FindingSource, HydraulicProfile, HydraulicReport,
    IncidentSignature, PipeMaterial, PressureSample, RecommendedAction, Severity, ShaftMaterial,
    SkipReason, TemperatureSample, ThermalContext, ThermalOffset, TurbineFamily, VerdictReport,
    WearTexture,
};

pub use incidents::IncidentLibrary;
pub use verdict::{DiagnosticEngine, EvaluationRequest, VerdictAggregator};
