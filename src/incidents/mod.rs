//! Incident Library
//!
//! Fixed table of historical incident signatures, loaded once from
//! `EngineConfig` and never mutated afterwards. Share it by reference (or
//! behind an `Arc`) across any number of concurrent evaluations.

pub mod watcher;

pub use watcher::{
    check_configuration_deviation, check_gradient_match, evaluate_configuration,
    evaluate_gradient, evaluate_pressure_series, steepest_gradient,
};

use crate::config::{default_incidents, EngineConfig};
use crate::error::DomainError;
use crate::types::IncidentSignature;

/// Read-only set of incident signatures.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentLibrary {
    signatures: Vec<IncidentSignature>,
}

impl IncidentLibrary {
    pub fn new(signatures: Vec<IncidentSignature>) -> Self {
        Self { signatures }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.incidents.clone())
    }

    /// Look up a signature by id
    pub fn get(&self, incident_id: &str) -> Option<&IncidentSignature> {
        self.signatures.iter().find(|s| s.incident_id == incident_id)
    }

    /// Signature by id, or the first entry when no id is given.
    pub fn resolve(&self, incident_id: Option<&str>) -> Result<&IncidentSignature, DomainError> {
        match incident_id {
            Some(id) => self
                .get(id)
                .ok_or_else(|| DomainError::UnknownIncident(id.to_string())),
            None => self
                .signatures
                .first()
                .ok_or_else(|| DomainError::UnknownIncident("<empty library>".to_string())),
        }
    }

    /// Signatures whose trigger gradient is exceeded
    pub fn matching_gradient(&self, gradient_bar_per_s: f64) -> Vec<&IncidentSignature> {
        self.signatures
            .iter()
            .filter(|s| check_gradient_match(gradient_bar_per_s, s))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncidentSignature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl Default for IncidentLibrary {
    fn default() -> Self {
        Self::new(default_incidents())
    }
}
