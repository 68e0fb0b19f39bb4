//! Settings persistence.
//!
//! Stores the household's last used parameter overrides and task as a small
//! JSON file so the next session starts where the previous one ended. The
//! calculators never read this file themselves; callers merge the stored
//! partial records over their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeRatios, EmployeeRatiosOverride, EntrepreneurDefaults, EntrepreneurDefaultsOverride,
    TaskDetails, TaskDetailsOverride,
};

/// Fixed key the settings are stored under.
pub const STORAGE_KEY: &str = "fickpengar-settings";

/// Stored partial settings. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Employee ratio overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeRatiosOverride>,
    /// Sole-trader parameter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrepreneur: Option<EntrepreneurDefaultsOverride>,
    /// The last task entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_task: Option<TaskDetailsOverride>,
}

impl StoredSettings {
    /// Shallow merge: every section present in `update` replaces the stored
    /// one, absent sections are kept.
    pub fn merged_with(self, update: StoredSettings) -> StoredSettings {
        StoredSettings {
            employee: update.employee.or(self.employee),
            entrepreneur: update.entrepreneur.or(self.entrepreneur),
            last_task: update.last_task.or(self.last_task),
        }
    }

    /// Returns the stored employee ratios merged over `defaults`.
    pub fn employee_ratios(&self, defaults: &EmployeeRatios) -> EmployeeRatios {
        self.employee
            .as_ref()
            .map_or(*defaults, |stored| stored.merged_over(defaults))
    }

    /// Returns the stored sole-trader parameters merged over `defaults`.
    pub fn entrepreneur_defaults(&self, defaults: &EntrepreneurDefaults) -> EntrepreneurDefaults {
        self.entrepreneur
            .as_ref()
            .map_or(*defaults, |stored| stored.merged_over(defaults))
    }

    /// Returns the stored last task merged over `default_task`.
    pub fn task(&self, default_task: &TaskDetails) -> TaskDetails {
        self.last_task
            .as_ref()
            .map_or_else(|| default_task.clone(), |stored| stored.merged_over(default_task))
    }
}

/// Reads and writes [`StoredSettings`] in a directory.
///
/// # Example
///
/// ```no_run
/// use fickpengar::persistence::{SettingsStore, StoredSettings};
///
/// let store = SettingsStore::new("./data");
/// let settings = store.load();
/// store.save(StoredSettings::default())?;
/// # Ok::<(), fickpengar::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store keeping its file in `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored settings.
    ///
    /// A missing file yields empty settings. An unreadable or corrupt file
    /// is logged and also yields empty settings.
    pub fn load(&self) -> StoredSettings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return StoredSettings::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stored settings unreadable");
                return StoredSettings::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Stored settings corrupt, ignoring");
            StoredSettings::default()
        })
    }

    /// Merges `update` over the stored settings and writes the result.
    ///
    /// Returns the settings as written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persistence`] when the file cannot be written.
    pub fn save(&self, update: StoredSettings) -> EngineResult<StoredSettings> {
        let merged = self.load().merged_with(update);

        let json = serde_json::to_string_pretty(&merged).map_err(|e| self.error(e))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        fs::write(&self.path, json).map_err(|e| self.error(e))?;

        debug!(path = %self.path.display(), "Settings stored");
        Ok(merged)
    }

    fn error(&self, cause: impl std::fmt::Display) -> EngineError {
        EngineError::Persistence {
            path: self.path.display().to_string(),
            message: cause.to_string(),
        }
    }
}
