//! Subscription table: which modules listen to which event types.
//!
//! Entries are appended, never deduplicated: subscribing the same module
//! to the same event type twice yields two deliveries per event.

use resonance_core::handler::WaveHandler;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One subscriber entry for an event type.
#[derive(Clone)]
pub struct Subscription {
    pub module: String,
    pub event_type: String,
    pub handler: Arc<dyn WaveHandler>,
    /// Static weight in [0, 1], multiplied by the bond weight at dispatch.
    pub weight: f64,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("module", &self.module)
            .field("event_type", &self.event_type)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

/// Event type → subscriber list.
#[derive(Debug, Default)]
pub struct SubscriptionTable {
    by_type: BTreeMap<String, Vec<Subscription>>,
}

impl SubscriptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber. The weight is clamped into [0, 1].
    pub fn subscribe(
        &mut self,
        module: &str,
        event_type: &str,
        handler: Arc<dyn WaveHandler>,
        weight: f64,
    ) {
        self.by_type
            .entry(event_type.to_string())
            .or_default()
            .push(Subscription {
                module: module.to_string(),
                event_type: event_type.to_string(),
                handler,
                weight: weight.clamp(0.0, 1.0),
            });
    }

    /// Remove every entry for `(module, event_type)`. Returns how many went.
    pub fn unsubscribe(&mut self, module: &str, event_type: &str) -> usize {
        let Some(subs) = self.by_type.get_mut(event_type) else {
            return 0;
        };
        let before = subs.len();
        subs.retain(|s| s.module != module);
        let removed = before - subs.len();
        if subs.is_empty() {
            self.by_type.remove(event_type);
        }
        removed
    }

    /// Cloned snapshot of the subscribers for `event_type`, in subscription order.
    pub fn get(&self, event_type: &str) -> Vec<Subscription> {
        self.by_type.get(event_type).cloned().unwrap_or_default()
    }

    /// Event types with at least one subscriber, sorted.
    pub fn event_types(&self) -> Vec<String> {
        self.by_type.keys().cloned().collect()
    }

    /// Event types `module` is subscribed to, sorted.
    pub fn subscriptions_of(&self, module: &str) -> Vec<String> {
        self.by_type
            .iter()
            .filter(|(_, subs)| subs.iter().any(|s| s.module == module))
            .map(|(event_type, _)| event_type.clone())
            .collect()
    }

    /// Total number of entries across all event types.
    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
