//! Shaft thermal growth inputs and the resulting alignment offset

use serde::{Deserialize, Serialize};

/// Conversion factor from millimetres to mils (thousandths of an inch)
pub const MILS_PER_MM: f64 = 39.37;

/// Shaft material for the linear expansion coefficient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShaftMaterial {
    /// Carbon steel, coefficient taken from `PhysicsConfig`
    #[default]
    Steel,
    Stainless,
    Titanium,
    /// Explicit coefficient (1/°C)
    Custom(f64),
}

impl ShaftMaterial {
    /// Expansion coefficient α (1/°C); `steel_alpha` is the configured
    /// carbon-steel value.
    pub fn expansion_coefficient(self, steel_alpha: f64) -> f64 {
        match self {
            ShaftMaterial::Steel => steel_alpha,
            ShaftMaterial::Stainless => 16.0e-6,
            ShaftMaterial::Titanium => 8.6e-6,
            ShaftMaterial::Custom(alpha) => alpha,
        }
    }
}

/// Shaft geometry and temperatures for one alignment job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThermalContext {
    pub shaft_length_m: f64,
    pub ambient_temp_c: f64,
    pub operating_temp_c: f64,
    #[serde(default)]
    pub material: ShaftMaterial,
}

impl ThermalContext {
    pub fn new(shaft_length_m: f64, ambient_temp_c: f64, operating_temp_c: f64) -> Self {
        Self {
            shaft_length_m,
            ambient_temp_c,
            operating_temp_c,
            material: ShaftMaterial::Steel,
        }
    }

    pub fn with_material(mut self, material: ShaftMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn delta_t(&self) -> f64 {
        self.operating_temp_c - self.ambient_temp_c
    }
}

/// Thermal growth and the cold offset that cancels it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThermalOffset {
    /// Expected growth at operating temperature (mm), rounded to 4 decimals
    pub expansion_mm: f64,
    /// Pre-positioning to apply in the cold state (mm), always `-expansion_mm`
    pub required_cold_offset_mm: f64,
    /// Growth in mils, for alignment tooling that reads imperial
    pub expansion_mils: f64,
    /// Coefficient that was applied (1/°C)
    pub coefficient: f64,
    pub delta_t: f64,
}
