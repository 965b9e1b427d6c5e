//! Verdict Module
//!
//! `VerdictAggregator` merges per-rule findings into one `VerdictReport`;
//! `DiagnosticEngine` wires every rule family to a loaded config.

pub mod aggregator;
pub mod engine;

pub use aggregator::{aggregate, VerdictAggregator};
pub use engine::{
    BidRequest, ConfigurationInput, DiagnosticEngine, EvaluationRequest, PressureInput,
};
