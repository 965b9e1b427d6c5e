//! Penstock geometry and the hydraulic loss breakdown

use serde::{Deserialize, Serialize};

// ============================================================================
// Pipe Material
// ============================================================================

/// Penstock wall material, used to pick an equivalent sand roughness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipeMaterial {
    #[default]
    Steel,
    /// Glass-fibre reinforced plastic
    Grp,
    /// High-density polyethylene
    Pehd,
    Concrete,
}

impl PipeMaterial {
    /// Equivalent sand roughness ks (mm)
    pub const fn roughness_ks_mm(self) -> f64 {
        match self {
            PipeMaterial::Steel => 0.045,
            PipeMaterial::Grp => 0.01,
            PipeMaterial::Pehd => 0.005,
            PipeMaterial::Concrete => 1.5,
        }
    }
}

impl std::fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipeMaterial::Steel => write!(f, "STEEL"),
            PipeMaterial::Grp => write!(f, "GRP"),
            PipeMaterial::Pehd => write!(f, "PEHD"),
            PipeMaterial::Concrete => write!(f, "CONCRETE"),
        }
    }
}

// ============================================================================
// Hydraulic Profile (input)
// ============================================================================

/// Site hydraulics for a single penstock / turbine inlet.
///
/// Units: metres, m³/s and millimetres. `roughness_ks_mm` may be omitted or
/// zero, in which case the configured default (0.045 mm, steel) applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydraulicProfile {
    /// Gross geodetic head (m)
    pub gross_head_m: f64,
    /// Design flow (m³/s)
    pub design_flow_cms: f64,
    /// Penstock length (m)
    pub pipe_length_m: f64,
    /// Penstock inner diameter (mm)
    pub pipe_diameter_mm: f64,
    /// Equivalent sand roughness (mm)
    #[serde(default)]
    pub roughness_ks_mm: Option<f64>,
}

impl HydraulicProfile {
    pub fn new(
        gross_head_m: f64,
        design_flow_cms: f64,
        pipe_length_m: f64,
        pipe_diameter_mm: f64,
        roughness_ks_mm: Option<f64>,
    ) -> Self {
        Self {
            gross_head_m,
            design_flow_cms,
            pipe_length_m,
            pipe_diameter_mm,
            roughness_ks_mm,
        }
    }

    /// Build a profile whose roughness comes from the pipe material table.
    pub fn for_material(
        gross_head_m: f64,
        design_flow_cms: f64,
        pipe_length_m: f64,
        pipe_diameter_mm: f64,
        material: PipeMaterial,
    ) -> Self {
        Self::new(
            gross_head_m,
            design_flow_cms,
            pipe_length_m,
            pipe_diameter_mm,
            Some(material.roughness_ks_mm()),
        )
    }

    /// Roughness to use in the friction model, substituting `default_mm`
    /// when the caller left it absent or zero.
    pub fn effective_roughness_mm(&self, default_mm: f64) -> f64 {
        match self.roughness_ks_mm {
            Some(ks) if ks > 0.0 => ks,
            _ => default_mm,
        }
    }
}

// ============================================================================
// Hydraulic Report (output)
// ============================================================================

/// Flow regime selected for the friction factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowRegime::Laminar => write!(f, "LAMINAR"),
            FlowRegime::Turbulent => write!(f, "TURBULENT"),
        }
    }
}

/// Full loss breakdown behind a net head figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydraulicReport {
    /// Mean velocity in the penstock (m/s)
    pub velocity_m_s: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    /// Relative roughness ε = ks / d after flooring
    pub relative_roughness: f64,
    /// Darcy friction factor
    pub friction_factor: f64,
    /// Velocity head v²/2g (m)
    pub velocity_head_m: f64,
    /// Darcy-Weisbach friction loss (m)
    pub friction_loss_m: f64,
    /// Bends/valves allowance (m)
    pub local_loss_m: f64,
    /// Gross head minus all losses, rounded to 3 decimals (m)
    pub net_head_m: f64,
}

impl HydraulicReport {
    pub fn total_loss_m(&self) -> f64 {
        self.friction_loss_m + self.local_loss_m
    }
}
