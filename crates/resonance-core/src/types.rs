//! Shared types used across the hub and its clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Seconds since the Unix epoch as a float, the timestamp unit used
/// throughout the hub and in persisted state.
pub fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Unique identifier for a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// A participant registered with the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    /// Free-form locator (source path, crate path, service URL...).
    pub path: String,
    pub capabilities: BTreeSet<String>,
    pub description: String,
    pub registered_at: f64,
    /// Last time this module published a wave.
    pub last_active: Option<f64>,
    /// Number of waves this module has published.
    pub total_fires: u64,
}

impl ModuleInfo {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        capabilities: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            description: description.into(),
            registered_at: epoch_seconds(),
            last_active: None,
            total_fires: 0,
        }
    }

    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.contains(tag)
    }
}

/// The broadcast payload. The hub never looks inside it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wave {
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
    /// Domain-specific fields carried alongside the three core values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl Wave {
    pub fn new(frequency: f64, amplitude: f64, phase: f64) -> Self {
        Self {
            frequency,
            amplitude,
            phase,
            extensions: BTreeMap::new(),
        }
    }

    /// Attach an extension field.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

/// An immutable record of one `publish_wave` call.
///
/// Handlers receive a shared reference; the same value is kept in the
/// hub's bounded event history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEvent {
    pub id: EventId,
    pub source: String,
    pub event_type: String,
    pub wave: Wave,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub timestamp: f64,
}

impl WaveEvent {
    pub fn new(
        source: impl Into<String>,
        event_type: impl Into<String>,
        wave: Wave,
        payload: Option<Value>,
    ) -> Self {
        Self {
            id: EventId::new(),
            source: source.into(),
            event_type: event_type.into(),
            wave,
            payload,
            timestamp: epoch_seconds(),
        }
    }
}

/// A directed connection weight between two modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl Bond {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// The `"A:B"` key used by persisted state.
    pub fn key(&self) -> String {
        bond_key(&self.from, &self.to)
    }
}

/// Separator between the two module names of a persisted bond key.
pub const BOND_KEY_SEPARATOR: char = ':';

pub fn bond_key(from: &str, to: &str) -> String {
    format!("{from}{BOND_KEY_SEPARATOR}{to}")
}

/// Split an `"A:B"` key. Returns `None` if either side is empty.
pub fn parse_bond_key(key: &str) -> Option<(&str, &str)> {
    let (from, to) = key.split_once(BOND_KEY_SEPARATOR)?;
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

/// Aggregate hub statistics returned by status queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubStatus {
    pub module_count: usize,
    pub subscription_count: usize,
    pub relation_count: usize,
    pub history_size: usize,
    /// Waves published since the hub was constructed.
    pub total_events: u64,
    pub event_types: Vec<String>,
    pub top_bonds: Vec<Bond>,
}
