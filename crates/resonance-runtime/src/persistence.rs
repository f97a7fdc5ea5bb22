//! State persistence: save/load modules and learned bonds.
//!
//! Serializes the module registry and the relational density graph to a
//! JSON document so a hub can pick up where a previous process left off.
//! Subscriptions and event history are process-local and not persisted.

use crate::hub::Hub;
use crate::registry::restored_module;
use resonance_core::error::Result;
use resonance_core::types::{bond_key, epoch_seconds, parse_bond_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// The persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    pub modules: BTreeMap<String, PersistedModule>,
    /// `"A:B"` → weight of the directed bond A→B.
    pub relational_density: BTreeMap<String, f64>,
    /// Epoch seconds at save time.
    pub saved_at: f64,
}

/// Serializable module record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedModule {
    pub path: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_fires: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<f64>,
}

impl StateDocument {
    /// Directed bonds as `(from, to, weight)`, skipping malformed keys.
    pub fn bonds(&self) -> Vec<(String, String, f64)> {
        self.relational_density
            .iter()
            .filter_map(|(key, &weight)| {
                let (from, to) = parse_bond_key(key)?;
                Some((from.to_string(), to.to_string(), weight))
            })
            .collect()
    }
}

/// Read a state document from disk.
pub fn read_state(path: &Path) -> Result<StateDocument> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write a state document, creating parent directories as needed.
pub fn write_state(document: &StateDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, json)?;
    Ok(())
}

impl Hub {
    /// Snapshot modules and bonds into a document.
    pub fn export_state(&self) -> StateDocument {
        let state = self.lock();

        let modules = state
            .registry
            .all()
            .into_iter()
            .map(|(name, m)| {
                let module = PersistedModule {
                    path: m.path,
                    capabilities: m.capabilities.into_iter().collect(),
                    description: m.description,
                    total_fires: m.total_fires,
                    last_active: m.last_active,
                };
                (name, module)
            })
            .collect();

        let relational_density = state
            .graph
            .bonds()
            .into_iter()
            .map(|b| (bond_key(&b.from, &b.to), b.weight))
            .collect();

        StateDocument {
            modules,
            relational_density,
            saved_at: epoch_seconds(),
        }
    }

    /// Save modules and bonds to `path` as JSON.
    ///
    /// Write failures are returned to the caller.
    pub fn save_state(&self, path: &Path) -> Result<()> {
        let document = self.export_state();
        write_state(&document, path)?;
        info!(
            path = %path.display(),
            modules = document.modules.len(),
            bonds = document.relational_density.len(),
            "hub state saved"
        );
        Ok(())
    }

    /// Load modules and bonds from `path`.
    ///
    /// Returns false if the file is missing or cannot be read or parsed;
    /// never fails. Loaded records overwrite same-named modules already
    /// registered, and loaded weights overwrite existing bonds.
    pub fn load_state(&self, path: &Path) -> bool {
        if !path.exists() {
            return false;
        }
        match read_state(path) {
            Ok(document) => {
                self.restore_state(&document);
                info!(
                    path = %path.display(),
                    modules = document.modules.len(),
                    bonds = document.relational_density.len(),
                    "hub state loaded"
                );
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load hub state");
                false
            }
        }
    }

    /// Apply a document to this hub.
    pub fn restore_state(&self, document: &StateDocument) {
        let initial = self.config().initial_bond;
        let mut state = self.lock();

        for (name, m) in &document.modules {
            if let Err(e) = resonance_core::error::validate_module_name(name) {
                warn!(error = %e, "skipping persisted module");
                continue;
            }
            let mut info = restored_module(
                name,
                m.path.clone(),
                m.capabilities.clone(),
                m.description.clone(),
                m.total_fires,
            );
            info.last_active = m.last_active;
            state.registry.restore(info);
        }

        for (key, &weight) in &document.relational_density {
            match parse_bond_key(key) {
                Some((from, to))
                    if state.registry.contains(from) && state.registry.contains(to) =>
                {
                    state.graph.set(from, to, weight)
                }
                Some(_) => warn!(key = %key, "skipping bond for unregistered module"),
                None => warn!(key = %key, "skipping malformed bond key"),
            }
        }

        let names = state.registry.names();
        for (i, a) in names.iter().enumerate() {
            for b in &names[..i] {
                state.graph.init_pair(a, b, initial);
            }
        }
    }
}
