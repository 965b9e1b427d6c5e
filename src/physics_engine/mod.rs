//! Physics Engine Module
//!
//! Deterministic engineering calculations. Every function is pure: same
//! inputs and config, same bit-identical output.
//!
//! - `hydraulics::analyze()` / `compute_net_head()` - penstock losses
//! - `hydraulics::estimate_power_kw()` - hydraulic power at the shaft
//! - `thermal::compute_offset()` - shaft growth and cold alignment offset

pub mod hydraulics;
pub mod thermal;

pub use hydraulics::{
    analyze, compute_net_head, darcy_friction_factor, estimate_power_kw, flow_regime,
    suggest_turbine_family,
};
pub use thermal::compute_offset;

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
