//! Engine Configuration Module
//!
//! Per-plant configuration loaded from TOML, holding every physics constant
//! and rule threshold the evaluators use.
//!
//! ## Loading Order
//!
//! 1. `HYDRO_DIAG_CONFIG` environment variable (path to TOML file)
//! 2. `diagnostics.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Load once at startup and pass the value by reference. There is no global
//! config; the loaded value is immutable and can be shared across threads.
//!
//! ```ignore
//! let config = EngineConfig::load();
//! let engine = DiagnosticEngine::new(config);
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;
