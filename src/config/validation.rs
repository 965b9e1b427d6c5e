//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for EngineConfig.
///
/// Maintained by hand to match the struct hierarchy in engine_config.rs.
/// Entries of the `[[incidents]]` array share the `incidents.` prefix.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [plant]
        "plant",
        "plant.name",
        "plant.unit",
        // [physics]
        "physics",
        "physics.kinematic_viscosity_m2_s",
        "physics.gravity_m_s2",
        "physics.water_density_kg_m3",
        "physics.local_loss_fraction",
        "physics.default_roughness_ks_mm",
        "physics.min_relative_roughness",
        "physics.laminar_reynolds_limit",
        "physics.steel_expansion_coefficient",
        // [bid]
        "bid",
        "bid.kaplan_ceiling_pct",
        "bid.francis_ceiling_pct",
        "bid.pelton_ceiling_pct",
        "bid.default_ceiling_pct",
        "bid.proximity_band_pct",
        "bid.exceeds_ceiling_penalty",
        "bid.near_ceiling_penalty",
        "bid.kaplan_max_head_m",
        "bid.kaplan_high_head_penalty",
        "bid.francis_min_head_m",
        "bid.francis_low_head_penalty",
        "bid.shortlist_above_score",
        "bid.reject_at_or_below_score",
        "bid.market_price_per_mw",
        "bid.price_floor_ratio",
        "bid.low_price_penalty",
        // [anomaly]
        "anomaly",
        "anomaly.standby_grease_cycle_limit",
        "anomaly.grease_avoided_loss_eur",
        "anomaly.thermal_inertia_mode",
        "anomaly.max_temp_rise_c_per_min",
        "anomaly.shutdown_jump_c",
        "anomaly.shutdown_window_samples",
        "anomaly.erosion_smoothness_min",
        "anomaly.cavitation_smoothness_max",
        "anomaly.cavitation_sharpness_min",
        // [[incidents]]
        "incidents",
        "incidents.incident_id",
        "incidents.designed_diameter_mm",
        "incidents.max_variance_pct",
        "incidents.trigger_gradient_bar_per_s",
        "incidents.description",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields
/// `["a", "a.b", "a.c"]`. Tables inside arrays are walked under the array's
/// own key, so `[[incidents]]` entries yield `incidents.<field>`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for nested in walk_toml_keys(item, &path) {
                            if !keys.contains(&nested) {
                                keys.push(nested);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

/// Dotted paths of every float in the tree that is NaN or infinite.
pub fn non_finite_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    match value {
        toml::Value::Float(f) if !f.is_finite() => keys.push(prefix.to_string()),
        toml::Value::Table(table) => {
            for (k, v) in table {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                keys.extend(non_finite_keys(v, &path));
            }
        }
        toml::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                keys.extend(non_finite_keys(item, &format!("{prefix}[{i}]")));
            }
        }
        _ => {}
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so suggestions are stable across runs
        match best {
            Some((best_key, best_dist)) if dist > best_dist || (dist == best_dist && k >= best_key) => {}
            _ => best = Some((k, dist)),
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed EngineConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent loading; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::EngineConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Efficiency ceilings: a turbine cannot convert more than it receives
    let b = &config.bid;
    for (name, ceiling) in [
        ("kaplan_ceiling_pct", b.kaplan_ceiling_pct),
        ("francis_ceiling_pct", b.francis_ceiling_pct),
        ("pelton_ceiling_pct", b.pelton_ceiling_pct),
        ("default_ceiling_pct", b.default_ceiling_pct),
    ] {
        if ceiling <= 0.0 || ceiling > 100.0 {
            errors.push(format!(
                "bid.{name} = {ceiling:.1} is outside physical range (0-100 %)"
            ));
        } else if ceiling < 80.0 {
            warnings.push(ValidationWarning {
                field: format!("bid.{name}"),
                message: format!("{name} = {ceiling:.1} is below typical turbine ceilings (80-97 %)"),
                suggestion: None,
            });
        }
    }

    // Water kinematic viscosity: ~1.79e-6 at 0 °C down to ~0.47e-6 at 60 °C
    let nu = config.physics.kinematic_viscosity_m2_s;
    if nu > 0.0 && !(0.4e-6..=1.8e-6).contains(&nu) {
        warnings.push(ValidationWarning {
            field: "physics.kinematic_viscosity_m2_s".to_string(),
            message: format!(
                "kinematic_viscosity_m2_s = {nu:.3e} is outside the range for liquid water (0.4e-6 to 1.8e-6)"
            ),
            suggestion: None,
        });
    }

    // Steel expansion: 10-18 µm/m/°C covers carbon to austenitic grades
    let alpha = config.physics.steel_expansion_coefficient;
    if alpha > 0.0 && !(10e-6..=18e-6).contains(&alpha) {
        warnings.push(ValidationWarning {
            field: "physics.steel_expansion_coefficient".to_string(),
            message: format!(
                "steel_expansion_coefficient = {alpha:.2e} is outside typical steel range (10e-6 to 18e-6)"
            ),
            suggestion: None,
        });
    }

    // Wear scores are unit-interval values
    let a = &config.anomaly;
    for (name, value) in [
        ("erosion_smoothness_min", a.erosion_smoothness_min),
        ("cavitation_smoothness_max", a.cavitation_smoothness_max),
        ("cavitation_sharpness_min", a.cavitation_sharpness_min),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!("anomaly.{name} = {value:.2} must lie in [0, 1]"));
        }
    }

    // Gradient triggers far above what a hydraulic line sees are likely unit mistakes
    for sig in &config.incidents {
        if sig.trigger_gradient_bar_per_s > 1_000.0 {
            warnings.push(ValidationWarning {
                field: format!("incidents.{}.trigger_gradient_bar_per_s", sig.incident_id),
                message: format!(
                    "trigger_gradient_bar_per_s = {:.0} for '{}' looks like mbar/s or Pa/s",
                    sig.trigger_gradient_bar_per_s, sig.incident_id
                ),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
