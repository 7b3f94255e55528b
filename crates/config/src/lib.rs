//! Configuration models and loaders for the Thruster Lab.
//!
//! Files are plain data: validation into typed engine configurations happens
//! once, in the sweep plan, so that the physics crates never see raw maps.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use thruster_core::constants::{AMU, ELEMENTARY_CHARGE, G0};

/// Environment variable consulted when no explicit configuration path is given.
pub const CONFIG_ENV_VAR: &str = "THRUSTER_LAB_CONFIG";
/// Repository-relative fallback configuration.
pub const DEFAULT_CONFIG_PATH: &str = "configs/lab.toml";

/// Complete lab configuration: constants, gases and per-thruster settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LabConfig {
    pub constants: ConstantsConfig,
    /// Gases swept, in output order.
    pub gases: Vec<String>,
    /// Relative atomic mass per gas name.
    pub gas_masses: BTreeMap<String, f64>,
    pub ion_engine: IonEngineSection,
    pub hall_thruster: HallThrusterSection,
}

/// Physical constants (SI).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ConstantsConfig {
    pub q: f64,
    pub amu: f64,
    pub g0: f64,
}

/// Ion engine sweep ranges and fixed engine parameters.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IonEngineSection {
    pub voltage_range_v: [f64; 2],
    pub voltage_steps: usize,
    pub current_range_a: [f64; 2],
    pub current_steps: usize,
    pub geometry: GridGeometryConfig,
    pub losses: IonLossConfig,
    pub divergence: DivergenceConfig,
}

/// Grid geometry of a gridded ion engine.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GridGeometryConfig {
    pub grid_area_m2: f64,
    pub grid_gap_m: f64,
    pub tau_geom: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct IonLossConfig {
    pub tau_trans: f64,
}

/// Hall thruster sweep ranges and fixed efficiencies.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HallThrusterSection {
    pub voltage_range_v: [f64; 2],
    pub voltage_steps: usize,
    pub mass_flow_range_kg_s: [f64; 2],
    pub mass_flow_steps: usize,
    pub eta_acc: f64,
    pub tau_prop: f64,
    pub divergence: DivergenceConfig,
}

/// Divergence model selector as written in configuration files.
///
/// Either key may be omitted; the owning section supplies its own default
/// through `divergence_model()` / `divergence_angle_deg()`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DivergenceConfig {
    pub model: Option<String>,
    pub angle_deg: Option<f64>,
}

impl DivergenceConfig {
    fn with(model: &str, angle_deg: f64) -> Self {
        Self {
            model: Some(model.to_string()),
            angle_deg: Some(angle_deg),
        }
    }
}

impl IonEngineSection {
    pub const DEFAULT_DIVERGENCE_MODEL: &'static str = "cos";
    pub const DEFAULT_DIVERGENCE_ANGLE_DEG: f64 = 5.0;

    pub fn divergence_model(&self) -> &str {
        self.divergence
            .model
            .as_deref()
            .unwrap_or(Self::DEFAULT_DIVERGENCE_MODEL)
    }

    pub fn divergence_angle_deg(&self) -> f64 {
        self.divergence
            .angle_deg
            .unwrap_or(Self::DEFAULT_DIVERGENCE_ANGLE_DEG)
    }
}

impl HallThrusterSection {
    pub const DEFAULT_DIVERGENCE_MODEL: &'static str = "cos";
    pub const DEFAULT_DIVERGENCE_ANGLE_DEG: f64 = 30.0;

    pub fn divergence_model(&self) -> &str {
        self.divergence
            .model
            .as_deref()
            .unwrap_or(Self::DEFAULT_DIVERGENCE_MODEL)
    }

    pub fn divergence_angle_deg(&self) -> f64 {
        self.divergence
            .angle_deg
            .unwrap_or(Self::DEFAULT_DIVERGENCE_ANGLE_DEG)
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        let gas_masses: BTreeMap<String, f64> = [
            ("Xenon", 131.293),
            ("Krypton", 83.798),
            ("Argon", 39.948),
        ]
        .into_iter()
        .map(|(name, mass)| (name.to_string(), mass))
        .collect();
        Self {
            constants: ConstantsConfig::default(),
            gases: vec![
                "Xenon".to_string(),
                "Krypton".to_string(),
                "Argon".to_string(),
            ],
            gas_masses,
            ion_engine: IonEngineSection::default(),
            hall_thruster: HallThrusterSection::default(),
        }
    }
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            q: ELEMENTARY_CHARGE,
            amu: AMU,
            g0: G0,
        }
    }
}

impl Default for IonEngineSection {
    fn default() -> Self {
        Self {
            voltage_range_v: [500.0, 4_000.0],
            voltage_steps: 20,
            current_range_a: [0.1, 5.0],
            current_steps: 15,
            geometry: GridGeometryConfig::default(),
            losses: IonLossConfig::default(),
            divergence: DivergenceConfig::with(
                Self::DEFAULT_DIVERGENCE_MODEL,
                Self::DEFAULT_DIVERGENCE_ANGLE_DEG,
            ),
        }
    }
}

impl Default for GridGeometryConfig {
    fn default() -> Self {
        Self {
            grid_area_m2: 0.01,
            grid_gap_m: 0.002,
            tau_geom: 0.7,
        }
    }
}

impl Default for IonLossConfig {
    fn default() -> Self {
        Self { tau_trans: 0.95 }
    }
}

impl Default for HallThrusterSection {
    fn default() -> Self {
        Self {
            voltage_range_v: [200.0, 800.0],
            voltage_steps: 20,
            mass_flow_range_kg_s: [1.0e-6, 10.0e-6],
            mass_flow_steps: 15,
            eta_acc: 0.6,
            tau_prop: 0.85,
            divergence: DivergenceConfig::with(
                Self::DEFAULT_DIVERGENCE_MODEL,
                Self::DEFAULT_DIVERGENCE_ANGLE_DEG,
            ),
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a lab configuration, choosing the format from the file extension
/// (`.toml`, `.json`, anything else is read as YAML).
pub fn load_lab_config<P: AsRef<Path>>(path: P) -> Result<LabConfig, ConfigError> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        }
        Some("json") => {
            let reader = File::open(path)?;
            Ok(serde_json::from_reader(reader)?)
        }
        _ => {
            let reader = File::open(path)?;
            Ok(serde_yaml::from_reader(reader)?)
        }
    }
}

/// Resolve which configuration file to read.
///
/// An explicit path always wins, then `THRUSTER_LAB_CONFIG`, then
/// [`DEFAULT_CONFIG_PATH`] if it exists on disk.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(from_env) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(from_env));
    }
    let fallback = Path::new(DEFAULT_CONFIG_PATH);
    fallback.exists().then(|| fallback.to_path_buf())
}

/// Load the resolved configuration, or the built-in defaults when no file resolves.
pub fn load_or_default(explicit: Option<&Path>) -> Result<LabConfig, ConfigError> {
    match resolve_config_path(explicit) {
        Some(path) => load_lab_config(path),
        None => Ok(LabConfig::default()),
    }
}
