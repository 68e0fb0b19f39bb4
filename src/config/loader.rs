//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading parameter
//! defaults and the chore catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeRatios, EmployeeRatiosOverride, EntrepreneurDefaults, EntrepreneurDefaultsOverride,
};

use super::types::{ChoreCatalog, DefaultsConfig};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` either carries the built-in Swedish values or reads
/// them from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// config/sweden/
/// ├── defaults.yaml   # Employee ratios and sole-trader parameters
/// └── chores.yaml     # Chore tiers and default rates per mode
/// ```
///
/// # Example
///
/// ```no_run
/// use fickpengar::config::ConfigLoader;
/// use fickpengar::models::ChoreTier;
///
/// let loader = ConfigLoader::load("./config/sweden").unwrap();
///
/// println!("Tax ratio: {}", loader.employee_defaults().tax_pct);
/// println!("Tier A chores: {:?}", loader.chores().chores_in(ChoreTier::A));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    defaults: DefaultsConfig,
    chores: ChoreCatalog,
}

impl ConfigLoader {
    /// Returns the built-in Swedish configuration.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/sweden")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fickpengar::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/sweden")?;
    /// # Ok::<(), fickpengar::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let defaults = Self::load_yaml::<DefaultsConfig>(&path.join("defaults.yaml"))?;
        let chores = Self::load_yaml::<ChoreCatalog>(&path.join("chores.yaml"))?;

        debug!(path = %path.display(), "Configuration loaded");

        Ok(Self { defaults, chores })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the configured employee ratios.
    pub fn employee_defaults(&self) -> &EmployeeRatios {
        &self.defaults.employee
    }

    /// Returns the configured sole-trader parameters.
    pub fn entrepreneur_defaults(&self) -> &EntrepreneurDefaults {
        &self.defaults.entrepreneur
    }

    /// Returns the chore catalog.
    pub fn chores(&self) -> &ChoreCatalog {
        &self.chores
    }

    /// Merges a partial override over the configured employee ratios.
    pub fn employee_ratios(&self, overrides: Option<&EmployeeRatiosOverride>) -> EmployeeRatios {
        overrides.map_or(self.defaults.employee, |partial| {
            partial.merged_over(&self.defaults.employee)
        })
    }

    /// Merges a partial override over the configured sole-trader parameters.
    pub fn entrepreneur_params(
        &self,
        overrides: Option<&EntrepreneurDefaultsOverride>,
    ) -> EntrepreneurDefaults {
        overrides.map_or(self.defaults.entrepreneur, |partial| {
            partial.merged_over(&self.defaults.entrepreneur)
        })
    }
}
