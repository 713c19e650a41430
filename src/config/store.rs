//! Settings store collaborator interface.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};

use super::loader::SettingsLoader;
use super::types::ComplianceSettings;

/// Per-tenant access to compliance settings.
///
/// `get` always yields usable settings (statutory defaults when a tenant has
/// none). `update` enforces the statutory bounds before writing; an update
/// that would relax a limit below the law is rejected with `InvalidInput`.
pub trait SettingsStore: Send + Sync {
    /// Returns the settings for a tenant, defaults if unset.
    fn get(&self, tenant: &str) -> EngineResult<ComplianceSettings>;

    /// Validates and persists new settings for a tenant, returning the
    /// stored value.
    fn update(&self, tenant: &str, settings: ComplianceSettings)
    -> EngineResult<ComplianceSettings>;
}

/// In-memory settings store backing the API and tests.
pub struct InMemorySettingsStore {
    defaults: ComplianceSettings,
    tenants: RwLock<HashMap<String, ComplianceSettings>>,
}

impl InMemorySettingsStore {
    /// Creates a store with the given defaults and no tenant overrides.
    pub fn new(defaults: ComplianceSettings) -> Self {
        Self {
            defaults,
            tenants: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store seeded from a [`SettingsLoader`].
    pub fn from_loader(loader: &SettingsLoader) -> Self {
        Self {
            defaults: loader.defaults().clone(),
            tenants: RwLock::new(loader.tenants().clone()),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new(ComplianceSettings::default())
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, tenant: &str) -> EngineResult<ComplianceSettings> {
        let tenants = self.tenants.read().map_err(|_| EngineError::StoreError {
            message: "settings store lock poisoned".to_string(),
        })?;
        Ok(tenants
            .get(tenant)
            .cloned()
            .unwrap_or_else(|| self.defaults.clone()))
    }

    fn update(
        &self,
        tenant: &str,
        settings: ComplianceSettings,
    ) -> EngineResult<ComplianceSettings> {
        settings.validate()?;
        let mut tenants = self.tenants.write().map_err(|_| EngineError::StoreError {
            message: "settings store lock poisoned".to_string(),
        })?;
        tenants.insert(tenant.to_string(), settings.clone());
        Ok(settings)
    }
}
