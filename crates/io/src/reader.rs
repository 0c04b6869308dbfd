//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use tracing::info;

use crate::dataset::Dataset;
use crate::error::IoError;
use crate::netcdf_read;
use crate::validate::{ValidationCollector, validate_time_dependent};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a model output file.
///
/// The [`Default`] implementation uses the names found in UKCP convection
/// permitting model files: `tasmax` on a `time` axis.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Data variable that must be present and time dependent.
    variable: String,
    /// Time coordinate variable.
    time_var: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            variable: "tasmax".into(),
            time_var: "time".into(),
        }
    }
}

impl ReaderConfig {
    /// Set the data variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the time coordinate name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Returns the data variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the time coordinate name.
    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if a name is empty or the data
    /// variable is the time coordinate itself.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if self.variable.trim().is_empty() {
            c.push("variable name must not be empty");
        }
        if self.time_var.trim().is_empty() {
            c.push("time variable name must not be empty");
        }
        if self.variable == self.time_var {
            c.push(format!("variable and time_var are both '{}'", self.variable));
        }
        c.finish()
    }
}

// ---------------------------------------------------------------------------
// read_dataset
// ---------------------------------------------------------------------------

/// Read a NetCDF file into a [`Dataset`].
///
/// All dimensions, global attributes and variables are loaded. Numeric
/// variables become `f64` with NaN for fill values, and character or string
/// variables become text variables.
///
/// # Errors
///
/// Returns [`IoError`] when the file is missing or unreadable, when the
/// data or time variable is absent, when the data variable has no time
/// dimension, or when a variable's shape disagrees with its dimensions.
pub fn read_dataset(path: &Path, config: &ReaderConfig) -> Result<Dataset, IoError> {
    config.validate()?;

    let file = netcdf_read::open_file(path)?;
    let dataset = netcdf_read::load_dataset(&file, path)?;
    dataset.validate()?;

    let time = dataset.require_variable(&config.time_var)?;
    let time_dim = match time.dims() {
        [dim] => dim.clone(),
        dims => {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", config.time_var),
                expected: 1,
                got: dims.len(),
            });
        }
    };
    let data = dataset.require_variable(&config.variable)?;
    validate_time_dependent(data.name(), data.dims(), &time_dim).finish()?;

    info!(
        path = %path.display(),
        variable = %config.variable,
        shape = ?data.data().shape(),
        variables = dataset.variables().len(),
        "read dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.variable(), "tasmax");
        assert_eq!(cfg.time_var(), "time");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_equal_names() {
        let cfg = ReaderConfig::default().with_variable("").with_time_var("");
        assert!(matches!(cfg.validate(), Err(IoError::Validation { count: 3, .. })));
        let cfg = ReaderConfig::default().with_variable("time");
        assert!(matches!(cfg.validate(), Err(IoError::Validation { count: 1, .. })));
    }

    #[test]
    fn missing_file() {
        let err = read_dataset(Path::new("/nonexistent/cpm.nc"), &ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
