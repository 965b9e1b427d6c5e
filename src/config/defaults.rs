//! System-wide default constants.
//!
//! Every physics assumption and rule threshold lives here under a name so it
//! can be audited and overridden through `EngineConfig`.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable pointing at a TOML config file.
pub const CONFIG_ENV_VAR: &str = "HYDRO_DIAG_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "diagnostics.toml";

// ============================================================================
// Hydraulics
// ============================================================================

/// Kinematic viscosity of water at ~10 °C (m²/s).
///
/// Fixed assumption: the engine does not correct viscosity for water
/// temperature.
pub const KINEMATIC_VISCOSITY_M2_S: f64 = 1.307e-6;

/// Standard gravity (m/s²).
pub const GRAVITY_M_S2: f64 = 9.81;

/// Water density for power estimates (kg/m³).
pub const WATER_DENSITY_KG_M3: f64 = 1000.0;

/// Bends/valves allowance as a fraction of the velocity head.
pub const LOCAL_LOSS_FRACTION: f64 = 0.10;

/// Roughness substituted when a profile omits it (mm, commercial steel).
pub const DEFAULT_ROUGHNESS_KS_MM: f64 = 0.045;

/// Floor for relative roughness so the Swamee-Jain log never sees zero.
pub const MIN_RELATIVE_ROUGHNESS: f64 = 1e-5;

/// Reynolds number at or below which the laminar friction factor applies.
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2000.0;

/// Decimal places kept on net head (m).
pub const NET_HEAD_DECIMALS: i32 = 3;

/// Net head below which a Kaplan is the natural choice (m).
pub const KAPLAN_HEAD_UPPER_M: f64 = 30.0;

/// Net head below which a Francis is the natural choice (m).
pub const FRANCIS_HEAD_UPPER_M: f64 = 400.0;

// ============================================================================
// Thermal
// ============================================================================

/// Linear expansion coefficient of carbon steel (1/°C).
pub const STEEL_EXPANSION_COEFFICIENT: f64 = 12e-6;

/// Decimal places kept on thermal growth and offset (mm).
pub const OFFSET_DECIMALS: i32 = 4;

// ============================================================================
// Bid Plausibility
// ============================================================================

/// Theoretical efficiency ceilings per turbine family (%).
pub const KAPLAN_CEILING_PCT: f64 = 95.0;
pub const FRANCIS_CEILING_PCT: f64 = 96.5;
pub const PELTON_CEILING_PCT: f64 = 92.5;
/// Ceiling for families the engine does not recognise (%).
pub const DEFAULT_CEILING_PCT: f64 = 90.0;

/// Width of the "close to the limit" band below a ceiling (percentage points).
pub const PROXIMITY_BAND_PCT: f64 = 1.0;

pub const EXCEEDS_CEILING_PENALTY: f64 = 50.0;
pub const NEAR_CEILING_PENALTY: f64 = 20.0;
pub const KAPLAN_HIGH_HEAD_PENALTY: f64 = 30.0;
pub const FRANCIS_LOW_HEAD_PENALTY: f64 = 15.0;
pub const LOW_PRICE_PENALTY: f64 = 10.0;

/// Kaplan offers above this net head carry cavitation risk (m).
pub const KAPLAN_MAX_HEAD_M: f64 = 80.0;

/// Francis offers below this net head are uneconomic (m).
pub const FRANCIS_MIN_HEAD_M: f64 = 20.0;

/// Score strictly above this shortlists an offer.
pub const SHORTLIST_ABOVE_SCORE: f64 = 80.0;

/// Score at or below this rejects an offer.
pub const REJECT_AT_OR_BELOW_SCORE: f64 = 50.0;

/// Rough market price per installed MW, used by the commercial check.
pub const MARKET_PRICE_PER_MW: f64 = 1_000_000.0;

/// Offers below this fraction of the market estimate are suspicious.
pub const PRICE_FLOOR_RATIO: f64 = 0.6;

// ============================================================================
// Anomaly Guard
// ============================================================================

/// Grease cycles tolerated while stopped/standby before seal blowout risk.
pub const STANDBY_GREASE_CYCLE_LIMIT: u32 = 20;

/// Informational loss avoided by catching a seal blowout (EUR).
pub const GREASE_AVOIDED_LOSS_EUR: f64 = 25_000.0;

/// Maximum tolerated bearing temperature rise (°C/min).
pub const MAX_TEMP_RISE_C_PER_MIN: f64 = 2.0;

/// Jump between the last two samples that flags a surge during shutdown (°C).
pub const SHUTDOWN_JUMP_C: f64 = 2.0;

/// Samples inspected by the shutdown-jump formulation.
pub const SHUTDOWN_WINDOW_SAMPLES: usize = 3;

/// Smoothness above which wear is classified as erosion.
pub const EROSION_SMOOTHNESS_MIN: f64 = 0.8;

/// Smoothness below which (with sharp edges) wear is cavitation.
pub const CAVITATION_SMOOTHNESS_MAX: f64 = 0.4;

/// Edge sharpness above which (with rough surface) wear is cavitation.
pub const CAVITATION_SHARPNESS_MIN: f64 = 0.7;

// ============================================================================
// Incident Library
// ============================================================================

/// Default tolerated diameter deviation (%).
pub const MAX_VARIANCE_PCT: f64 = 15.0;

/// Built-in signature: governor pilot line water hammer.
pub const PILOT_LINE_INCIDENT_ID: &str = "PILOT_LINE_WATER_HAMMER";
pub const PILOT_LINE_DESIGNED_DIAMETER_MM: f64 = 12.0;
pub const PILOT_LINE_TRIGGER_GRADIENT_BAR_PER_S: f64 = 50.0;
