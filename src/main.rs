//! hydro-diag - command-line adapter for the diagnostic engine
//!
//! Reads JSON inputs, runs the engine and prints JSON results on stdout.
//! Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Full evaluation of one unit
//! hydro-diag evaluate request.json
//!
//! # Screen an offer against site figures
//! hydro-diag bid offer.json --net-head 95.4 --flow 5
//!
//! # Net head for a penstock
//! hydro-diag net-head --gross-head 100 --flow 5 --length 500 --diameter 1200
//!
//! # Cold alignment offset
//! hydro-diag thermal-offset --length 5 --ambient 12 --operating 55
//!
//! # Validate the resolved config and print it
//! hydro-diag check-config
//! ```
//!
//! # Environment Variables
//!
//! - `HYDRO_DIAG_CONFIG`: Path to the engine config TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use hydro_diagnostics::{
    BidOffer, BidSite, DiagnosticEngine, EngineConfig, EvaluationRequest, HydraulicProfile,
    PipeMaterial, ShaftMaterial, ThermalContext,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "hydro-diag")]
#[command(about = "Hydraulic and thermal diagnostic rule engine")]
#[command(version)]
struct CliArgs {
    /// Engine config TOML (default: $HYDRO_DIAG_CONFIG, then ./diagnostics.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Evaluate a JSON request and print the aggregated verdict
    Evaluate {
        /// Path to the request JSON
        request: PathBuf,
    },

    /// Screen a JSON offer against site head and flow
    Bid {
        /// Path to the offer JSON
        offer: PathBuf,
        /// Site net head (m)
        #[arg(long)]
        net_head: f64,
        /// Site design flow (m³/s)
        #[arg(long)]
        flow: f64,
    },

    /// Penstock losses and net head
    NetHead {
        #[arg(long)]
        gross_head: f64,
        /// Design flow (m³/s)
        #[arg(long)]
        flow: f64,
        /// Penstock length (m)
        #[arg(long)]
        length: f64,
        /// Inner diameter (mm)
        #[arg(long)]
        diameter: f64,
        /// Absolute roughness ks (mm); overrides --material
        #[arg(long)]
        roughness: Option<f64>,
        #[arg(long, value_enum, default_value = "steel")]
        material: PipeMaterialArg,
    },

    /// Shaft thermal growth and required cold offset
    ThermalOffset {
        /// Shaft length (m)
        #[arg(long)]
        length: f64,
        /// Ambient temperature (°C)
        #[arg(long)]
        ambient: f64,
        /// Operating temperature (°C)
        #[arg(long)]
        operating: f64,
        #[arg(long, value_enum, default_value = "steel")]
        material: ShaftMaterialArg,
    },

    /// Validate the resolved configuration and print it as TOML
    CheckConfig,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PipeMaterialArg {
    Steel,
    Grp,
    Pehd,
    Concrete,
}

impl From<PipeMaterialArg> for PipeMaterial {
    fn from(arg: PipeMaterialArg) -> Self {
        match arg {
            PipeMaterialArg::Steel => PipeMaterial::Steel,
            PipeMaterialArg::Grp => PipeMaterial::Grp,
            PipeMaterialArg::Pehd => PipeMaterial::Pehd,
            PipeMaterialArg::Concrete => PipeMaterial::Concrete,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ShaftMaterialArg {
    Steel,
    Stainless,
    Titanium,
}

impl From<ShaftMaterialArg> for ShaftMaterial {
    fn from(arg: ShaftMaterialArg) -> Self {
        match arg {
            ShaftMaterialArg::Steel => ShaftMaterial::Steel,
            ShaftMaterialArg::Stainless => ShaftMaterial::Stainless,
            ShaftMaterialArg::Titanium => ShaftMaterial::Titanium,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn load_config(path: Option<&Path>, strict: bool) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None if strict => EngineConfig::load_strict().context("Failed to load engine config"),
        None => Ok(EngineConfig::load()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    // check-config must surface a broken file rather than fall back to defaults
    let strict = matches!(args.command, SubCommand::CheckConfig);
    let config = load_config(args.config.as_deref(), strict)?;

    if let SubCommand::CheckConfig = args.command {
        config.validate().context("Configuration is invalid")?;
        info!(plant = %config.plant.name, incidents = config.incidents.len(), "Configuration OK");
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let engine = DiagnosticEngine::new(config);

    match args.command {
        SubCommand::Evaluate { request } => {
            let request: EvaluationRequest = read_json(&request)?;
            let report = engine.evaluate(&request).context("Evaluation failed")?;
            print_json(&report)
        }
        SubCommand::Bid {
            offer,
            net_head,
            flow,
        } => {
            let offer: BidOffer = read_json(&offer)?;
            let site = BidSite {
                net_head_m: net_head,
                design_flow_cms: flow,
            };
            let evaluation = engine
                .evaluate_bid(&site, &offer)
                .context("Bid evaluation failed")?;
            print_json(&evaluation)
        }
        SubCommand::NetHead {
            gross_head,
            flow,
            length,
            diameter,
            roughness,
            material,
        } => {
            let profile = match roughness {
                Some(ks) => HydraulicProfile::new(gross_head, flow, length, diameter, Some(ks)),
                None => HydraulicProfile::for_material(
                    gross_head,
                    flow,
                    length,
                    diameter,
                    material.into(),
                ),
            };
            let report = engine.hydraulics(&profile).context("Hydraulic analysis failed")?;
            print_json(&report)
        }
        SubCommand::ThermalOffset {
            length,
            ambient,
            operating,
            material,
        } => {
            let ctx = ThermalContext::new(length, ambient, operating).with_material(material.into());
            let offset = engine
                .thermal_offset(&ctx)
                .context("Thermal offset failed")?;
            print_json(&offset)
        }
        SubCommand::CheckConfig => Ok(()),
    }
}
