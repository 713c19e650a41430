//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading tenant
//! compliance settings from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::ComplianceSettings;

/// Loads tenant compliance settings from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// config/compliance/
/// ├── default.yaml      # Settings applied to tenants without an override
/// └── <tenant>.yaml     # Per-tenant overrides, keyed by file stem
/// ```
///
/// Override files may be partial; omitted fields fall back to the statutory
/// defaults. Every loaded file is validated against the statutory bounds, so
/// a file relaxing an ArbZG limit fails the load.
///
/// # Example
///
/// ```no_run
/// use timeclock_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/compliance").unwrap();
/// let settings = loader.for_tenant("hotel-adler");
/// println!("weekly ceiling: {}h", settings.max_weekly_hours);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    defaults: ComplianceSettings,
    tenants: HashMap<String, ComplianceSettings>,
}

impl SettingsLoader {
    /// Loads settings from the specified directory.
    ///
    /// Returns an error if `default.yaml` is missing, any file contains
    /// invalid YAML, or any file violates the statutory bounds.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let default_path = path.join("default.yaml");
        let defaults = Self::load_yaml(&default_path)?;

        let mut tenants = HashMap::new();
        let dir = fs::read_dir(path).map_err(|_| EngineError::SettingsNotFound {
            path: path.display().to_string(),
        })?;
        for dir_entry in dir {
            let file = dir_entry.map_err(|e| EngineError::StoreError {
                message: format!("failed to read settings directory: {}", e),
            })?;
            let file_path = file.path();
            if file_path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "default" {
                continue;
            }
            let settings = Self::load_yaml(&file_path)?;
            tenants.insert(stem.to_string(), settings);
        }

        Ok(Self { defaults, tenants })
    }

    /// Builds a loader from already-validated settings, bypassing the
    /// filesystem. Intended for tests and embedded setups.
    pub fn from_settings(
        defaults: ComplianceSettings,
        tenants: HashMap<String, ComplianceSettings>,
    ) -> Self {
        Self { defaults, tenants }
    }

    /// Returns the settings for a tenant, falling back to the defaults.
    pub fn for_tenant(&self, tenant: &str) -> ComplianceSettings {
        self.tenants
            .get(tenant)
            .cloned()
            .unwrap_or_else(|| self.defaults.clone())
    }

    /// Returns the default settings.
    pub fn defaults(&self) -> &ComplianceSettings {
        &self.defaults
    }

    /// Returns the tenant overrides keyed by tenant id.
    pub fn tenants(&self) -> &HashMap<String, ComplianceSettings> {
        &self.tenants
    }

    /// Loads, parses, and validates one YAML settings file.
    fn load_yaml(path: &Path) -> EngineResult<ComplianceSettings> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::SettingsNotFound {
            path: path_str.clone(),
        })?;

        let settings: ComplianceSettings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::SettingsParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        settings
            .validate()
            .map_err(|e| EngineError::SettingsParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(settings)
    }
}
