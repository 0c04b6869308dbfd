use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level recal configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RecalConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Calendar conversion settings.
    #[serde(default)]
    pub convert: ConvertToml,

    /// Batch selection settings.
    #[serde(default)]
    pub batch: BatchToml,
}

impl RecalConfig {
    /// Reads a TOML file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            variable: default_variable(),
            time_var: default_time_var(),
            input_dir: None,
            output_dir: None,
            extension: default_extension(),
            overwrite: false,
        }
    }
}

fn default_variable() -> String {
    "tasmax".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_extension() -> String {
    "nc".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertToml {
    #[serde(default = "default_target_calendar")]
    pub target_calendar: String,
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
    #[serde(default = "default_edge_fill")]
    pub edge_fill: String,
}

impl Default for ConvertToml {
    fn default() -> Self {
        Self {
            target_calendar: default_target_calendar(),
            interpolation: default_interpolation(),
            edge_fill: default_edge_fill(),
        }
    }
}

fn default_target_calendar() -> String {
    "standard".to_string()
}
fn default_interpolation() -> String {
    "linear".to_string()
}
fn default_edge_fill() -> String {
    "extrapolate".to_string()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BatchToml {
    #[serde(default)]
    pub start_index: usize,
    #[serde(default)]
    pub stop_index: Option<usize>,
}
