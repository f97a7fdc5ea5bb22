//! Module registry for tracking hub participants.
//!
//! The registry is a plain map keyed by module name. Registration is
//! idempotent: a second registration under the same name replaces the
//! record and logs a warning.

use resonance_core::error::{validate_module_name, Result};
use resonance_core::types::{epoch_seconds, ModuleInfo};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Registry of modules known to the hub.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, ModuleInfo>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a module. Last write wins.
    pub fn register(
        &mut self,
        name: &str,
        path: &str,
        capabilities: &[String],
        description: &str,
    ) -> Result<ModuleInfo> {
        validate_module_name(name)?;

        let info = ModuleInfo::new(name, path, capabilities.iter().cloned(), description);
        if self.modules.insert(name.to_string(), info.clone()).is_some() {
            warn!(module = name, "module re-registered, previous record overwritten");
        } else {
            info!(module = name, capabilities = ?info.capabilities, "module registered");
        }
        Ok(info)
    }

    /// Insert a record loaded from persisted state without logging a conflict.
    pub fn restore(&mut self, info: ModuleInfo) {
        self.modules.insert(info.name.clone(), info);
    }

    pub fn get(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Snapshot of every record, ordered by name.
    pub fn all(&self) -> BTreeMap<String, ModuleInfo> {
        self.modules.clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Names of modules advertising `tag`, in name order.
    pub fn find_by_capability(&self, tag: &str) -> Vec<String> {
        self.modules
            .values()
            .filter(|m| m.has_capability(tag))
            .map(|m| m.name.clone())
            .collect()
    }

    /// Count one publish by `name`. Returns false for unknown modules.
    pub fn record_fire(&mut self, name: &str, at: f64) -> bool {
        match self.modules.get_mut(name) {
            Some(module) => {
                module.total_fires += 1;
                module.last_active = Some(at);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Convenience used by restore paths that rebuild a record from parts.
pub(crate) fn restored_module(
    name: &str,
    path: String,
    capabilities: Vec<String>,
    description: String,
    total_fires: u64,
) -> ModuleInfo {
    ModuleInfo {
        name: name.to_string(),
        path,
        capabilities: capabilities.into_iter().collect(),
        description,
        registered_at: epoch_seconds(),
        last_active: None,
        total_fires,
    }
}
