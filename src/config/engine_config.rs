//! Engine Configuration - physics constants and rule thresholds as TOML values
//!
//! Each struct implements `Default` with the values from `defaults`, so an
//! engine built without a config file behaves exactly like the documented
//! rule set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::{IncidentSignature, TurbineFamily};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one plant deployment.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$HYDRO_DIAG_CONFIG` env var
/// 2. `./diagnostics.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Plant identification
    #[serde(default)]
    pub plant: PlantInfo,

    /// Hydraulic and thermal physics assumptions
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Bid plausibility rules
    #[serde(default)]
    pub bid: BidConfig,

    /// Anomaly guard thresholds
    #[serde(default)]
    pub anomaly: AnomalyConfig,

    /// Incident signature table
    #[serde(default = "default_incidents")]
    pub incidents: Vec<IncidentSignature>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            plant: PlantInfo::default(),
            physics: PhysicsConfig::default(),
            bid: BidConfig::default(),
            anomaly: AnomalyConfig::default(),
            incidents: default_incidents(),
        }
    }
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$HYDRO_DIAG_CONFIG` environment variable
    /// 2. `./diagnostics.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), plant = %config.plant.name, "Loaded engine config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./diagnostics.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(plant = %config.plant.name, "Loaded engine config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// File the search order would read, without checking that it parses.
    ///
    /// A set `$HYDRO_DIAG_CONFIG` wins even when the file is missing, so the
    /// caller sees the I/O error. `None` means built-in defaults apply.
    pub fn search_path() -> Option<PathBuf> {
        Self::search_path_from(
            std::env::var_os(defaults::CONFIG_ENV_VAR).map(PathBuf::from),
            Path::new(defaults::LOCAL_CONFIG_FILE),
        )
    }

    fn search_path_from(env_path: Option<PathBuf>, local: &Path) -> Option<PathBuf> {
        env_path.or_else(|| local.exists().then(|| local.to_path_buf()))
    }

    /// Same search order as `load`, but a broken file is an error instead
    /// of a fallback to defaults.
    pub fn load_strict() -> Result<Self, ConfigError> {
        match Self::search_path() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Syntax(err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys only produce warnings; inconsistent or non-physical
    /// values are errors.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents).map_err(ConfigError::Syntax)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate all thresholds for internal consistency.
    ///
    /// Rules:
    /// - Divisors and coefficients must be positive
    /// - Score cut-offs must be ordered (shortlist above reject)
    /// - Wear cut-offs must leave an indeterminate band
    /// - Incident ids must be unique and their limits positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Physics: used as divisors or multipliers in the loss formulas
        let p = &self.physics;
        Self::check_positive(p.kinematic_viscosity_m2_s, "physics.kinematic_viscosity_m2_s", &mut errors);
        Self::check_positive(p.gravity_m_s2, "physics.gravity_m_s2", &mut errors);
        Self::check_positive(p.water_density_kg_m3, "physics.water_density_kg_m3", &mut errors);
        Self::check_positive(p.default_roughness_ks_mm, "physics.default_roughness_ks_mm", &mut errors);
        Self::check_positive(p.min_relative_roughness, "physics.min_relative_roughness", &mut errors);
        Self::check_positive(p.laminar_reynolds_limit, "physics.laminar_reynolds_limit", &mut errors);
        Self::check_positive(p.steel_expansion_coefficient, "physics.steel_expansion_coefficient", &mut errors);
        if !(0.0..1.0).contains(&p.local_loss_fraction) {
            errors.push(format!(
                "physics.local_loss_fraction ({:.3}) must be in [0, 1)",
                p.local_loss_fraction
            ));
        }

        // Bid: classification ladder must be ordered
        let b = &self.bid;
        if b.shortlist_above_score <= b.reject_at_or_below_score {
            errors.push(format!(
                "bid.shortlist_above_score ({:.1}) must be > reject_at_or_below_score ({:.1})",
                b.shortlist_above_score, b.reject_at_or_below_score
            ));
        }
        for (name, value) in [
            ("bid.exceeds_ceiling_penalty", b.exceeds_ceiling_penalty),
            ("bid.near_ceiling_penalty", b.near_ceiling_penalty),
            ("bid.kaplan_high_head_penalty", b.kaplan_high_head_penalty),
            ("bid.francis_low_head_penalty", b.francis_low_head_penalty),
            ("bid.low_price_penalty", b.low_price_penalty),
            ("bid.proximity_band_pct", b.proximity_band_pct),
        ] {
            if value < 0.0 {
                errors.push(format!("{name} ({value:.2}) must be >= 0"));
            }
        }
        if !(b.price_floor_ratio > 0.0 && b.price_floor_ratio <= 1.0) {
            errors.push(format!(
                "bid.price_floor_ratio ({:.2}) must be in (0, 1]",
                b.price_floor_ratio
            ));
        }

        // Anomaly guard
        let a = &self.anomaly;
        Self::check_positive(a.max_temp_rise_c_per_min, "anomaly.max_temp_rise_c_per_min", &mut errors);
        Self::check_positive(a.shutdown_jump_c, "anomaly.shutdown_jump_c", &mut errors);
        if a.shutdown_window_samples < 2 {
            errors.push("anomaly.shutdown_window_samples must be >= 2".to_string());
        }
        if a.cavitation_smoothness_max >= a.erosion_smoothness_min {
            errors.push(format!(
                "anomaly.cavitation_smoothness_max ({:.2}) must be < erosion_smoothness_min ({:.2})",
                a.cavitation_smoothness_max, a.erosion_smoothness_min
            ));
        }

        // Incident table
        let mut seen = HashSet::new();
        for sig in &self.incidents {
            if !seen.insert(sig.incident_id.as_str()) {
                errors.push(format!("incidents: duplicate incident_id '{}'", sig.incident_id));
            }
            if sig.designed_diameter_mm <= 0.0 {
                errors.push(format!(
                    "incidents.{}: designed_diameter_mm must be > 0",
                    sig.incident_id
                ));
            }
            if sig.max_variance_pct <= 0.0 {
                errors.push(format!(
                    "incidents.{}: max_variance_pct must be > 0",
                    sig.incident_id
                ));
            }
            if sig.trigger_gradient_bar_per_s <= 0.0 {
                errors.push(format!(
                    "incidents.{}: trigger_gradient_bar_per_s must be > 0",
                    sig.incident_id
                ));
            }
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any config value (sweep all f64 fields via serialization)
        if let Ok(value) = toml::Value::try_from(self) {
            for key in super::validation::non_finite_keys(&value, "") {
                errors.push(format!("{key} must be a finite number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
            return;
        }
        if value <= 0.0 {
            errors.push(format!("{name} ({value}) must be > 0"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({0:?}): {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({0:?}): {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Config parse error: {0}")]
    Syntax(toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Plant Info
// ============================================================================

/// Identification metadata, not used for logic but appears in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantInfo {
    #[serde(default = "default_plant_name")]
    pub name: String,

    /// Unit / machine tag
    #[serde(default)]
    pub unit: String,
}

fn default_plant_name() -> String {
    "DEFAULT".to_string()
}

impl Default for PlantInfo {
    fn default() -> Self {
        Self {
            name: default_plant_name(),
            unit: String::new(),
        }
    }
}

// ============================================================================
// Physics
// ============================================================================

/// Physics assumptions behind the hydraulic and thermal calculators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Water kinematic viscosity (m²/s), ~10 °C
    pub kinematic_viscosity_m2_s: f64,
    pub gravity_m_s2: f64,
    pub water_density_kg_m3: f64,
    /// Local (bends/valves) loss as a fraction of velocity head
    pub local_loss_fraction: f64,
    /// Roughness used when a profile leaves it absent or zero (mm)
    pub default_roughness_ks_mm: f64,
    pub min_relative_roughness: f64,
    /// Laminar friction factor applies for Re <= this value
    pub laminar_reynolds_limit: f64,
    /// Carbon-steel expansion coefficient (1/°C)
    pub steel_expansion_coefficient: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            kinematic_viscosity_m2_s: defaults::KINEMATIC_VISCOSITY_M2_S,
            gravity_m_s2: defaults::GRAVITY_M_S2,
            water_density_kg_m3: defaults::WATER_DENSITY_KG_M3,
            local_loss_fraction: defaults::LOCAL_LOSS_FRACTION,
            default_roughness_ks_mm: defaults::DEFAULT_ROUGHNESS_KS_MM,
            min_relative_roughness: defaults::MIN_RELATIVE_ROUGHNESS,
            laminar_reynolds_limit: defaults::LAMINAR_REYNOLDS_LIMIT,
            steel_expansion_coefficient: defaults::STEEL_EXPANSION_COEFFICIENT,
        }
    }
}

// ============================================================================
// Bid Plausibility
// ============================================================================

/// Efficiency ceilings, application limits and scoring for offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BidConfig {
    pub kaplan_ceiling_pct: f64,
    pub francis_ceiling_pct: f64,
    pub pelton_ceiling_pct: f64,
    /// Ceiling for unrecognized families
    pub default_ceiling_pct: f64,
    pub proximity_band_pct: f64,
    pub exceeds_ceiling_penalty: f64,
    pub near_ceiling_penalty: f64,
    pub kaplan_max_head_m: f64,
    pub kaplan_high_head_penalty: f64,
    pub francis_min_head_m: f64,
    pub francis_low_head_penalty: f64,
    pub shortlist_above_score: f64,
    pub reject_at_or_below_score: f64,
    pub market_price_per_mw: f64,
    pub price_floor_ratio: f64,
    pub low_price_penalty: f64,
}

impl BidConfig {
    /// Theoretical efficiency ceiling for a family (%)
    pub fn ceiling_for(&self, family: &TurbineFamily) -> f64 {
        match family {
            TurbineFamily::Kaplan => self.kaplan_ceiling_pct,
            TurbineFamily::Francis => self.francis_ceiling_pct,
            TurbineFamily::Pelton => self.pelton_ceiling_pct,
            TurbineFamily::Unrecognized(_) => self.default_ceiling_pct,
        }
    }
}

impl Default for BidConfig {
    fn default() -> Self {
        Self {
            kaplan_ceiling_pct: defaults::KAPLAN_CEILING_PCT,
            francis_ceiling_pct: defaults::FRANCIS_CEILING_PCT,
            pelton_ceiling_pct: defaults::PELTON_CEILING_PCT,
            default_ceiling_pct: defaults::DEFAULT_CEILING_PCT,
            proximity_band_pct: defaults::PROXIMITY_BAND_PCT,
            exceeds_ceiling_penalty: defaults::EXCEEDS_CEILING_PENALTY,
            near_ceiling_penalty: defaults::NEAR_CEILING_PENALTY,
            kaplan_max_head_m: defaults::KAPLAN_MAX_HEAD_M,
            kaplan_high_head_penalty: defaults::KAPLAN_HIGH_HEAD_PENALTY,
            francis_min_head_m: defaults::FRANCIS_MIN_HEAD_M,
            francis_low_head_penalty: defaults::FRANCIS_LOW_HEAD_PENALTY,
            shortlist_above_score: defaults::SHORTLIST_ABOVE_SCORE,
            reject_at_or_below_score: defaults::REJECT_AT_OR_BELOW_SCORE,
            market_price_per_mw: defaults::MARKET_PRICE_PER_MW,
            price_floor_ratio: defaults::PRICE_FLOOR_RATIO,
            low_price_penalty: defaults::LOW_PRICE_PENALTY,
        }
    }
}

// ============================================================================
// Anomaly Guard
// ============================================================================

/// Which thermal-inertia formulation the guard runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThermalInertiaMode {
    /// Rate of rise between the last two samples, any status
    #[default]
    RateOfRise,
    /// Jump between the last two of the last three samples, only while
    /// shutting down
    ShutdownJump,
}

impl std::fmt::Display for ThermalInertiaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThermalInertiaMode::RateOfRise => write!(f, "rate_of_rise"),
            ThermalInertiaMode::ShutdownJump => write!(f, "shutdown_jump"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Grease cycles tolerated while stopped/standby
    pub standby_grease_cycle_limit: u32,
    /// Informational avoided-loss figure attached to grease findings (EUR)
    pub grease_avoided_loss_eur: f64,
    pub thermal_inertia_mode: ThermalInertiaMode,
    pub max_temp_rise_c_per_min: f64,
    pub shutdown_jump_c: f64,
    pub shutdown_window_samples: usize,
    pub erosion_smoothness_min: f64,
    pub cavitation_smoothness_max: f64,
    pub cavitation_sharpness_min: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            standby_grease_cycle_limit: defaults::STANDBY_GREASE_CYCLE_LIMIT,
            grease_avoided_loss_eur: defaults::GREASE_AVOIDED_LOSS_EUR,
            thermal_inertia_mode: ThermalInertiaMode::default(),
            max_temp_rise_c_per_min: defaults::MAX_TEMP_RISE_C_PER_MIN,
            shutdown_jump_c: defaults::SHUTDOWN_JUMP_C,
            shutdown_window_samples: defaults::SHUTDOWN_WINDOW_SAMPLES,
            erosion_smoothness_min: defaults::EROSION_SMOOTHNESS_MIN,
            cavitation_smoothness_max: defaults::CAVITATION_SMOOTHNESS_MAX,
            cavitation_sharpness_min: defaults::CAVITATION_SHARPNESS_MIN,
        }
    }
}

// ============================================================================
// Incidents
// ============================================================================

/// Built-in incident table used when the config file has no `[[incidents]]`.
pub fn default_incidents() -> Vec<IncidentSignature> {
    vec![IncidentSignature {
        incident_id: defaults::PILOT_LINE_INCIDENT_ID.to_string(),
        designed_diameter_mm: defaults::PILOT_LINE_DESIGNED_DIAMETER_MM,
        max_variance_pct: defaults::MAX_VARIANCE_PCT,
        trigger_gradient_bar_per_s: defaults::PILOT_LINE_TRIGGER_GRADIENT_BAR_PER_S,
        description: "Governor pilot line rebored in the field; pressure spike on load \
                      rejection ruptured the servo supply"
            .to_string(),
    }]
}
