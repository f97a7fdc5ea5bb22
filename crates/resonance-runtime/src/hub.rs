//! Hub: registration, weighted fan-out and the learning loop.
//!
//! One mutex guards all hub state. `publish_wave` works in three phases:
//!
//! 1. Under the lock: record the event, count the source's fire, and
//!    snapshot the subscribers of the event type with their current bond
//!    weights.
//! 2. Lock released: invoke every subscriber whose effective weight
//!    (`static weight * bond`) clears the firing threshold. Handler errors
//!    and panics are captured per subscriber.
//! 3. Under the lock again: reinforce source→subscriber bonds, run the
//!    co-firing pass, and apply entropy decay on the interval.
//!
//! Because handlers never run while the lock is held, a handler may call
//! back into the hub without deadlocking.

use crate::density_graph::PetDensityGraph;
use crate::history::EventHistory;
use crate::learner::HebbianLearner;
use crate::registry::ModuleRegistry;
use crate::subscriptions::{Subscription, SubscriptionTable};
use resonance_core::config::HubConfig;
use resonance_core::density::RelationalDensity;
use resonance_core::error::{validate_module_name, HubError, Result};
use resonance_core::handler::{DispatchOutcome, HandlerResult, WaveHandler};
use resonance_core::types::{ModuleInfo, Wave, WaveEvent};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Everything the hub lock protects.
pub(crate) struct HubState {
    pub(crate) registry: ModuleRegistry,
    pub(crate) subscriptions: SubscriptionTable,
    pub(crate) graph: Box<dyn RelationalDensity>,
    pub(crate) history: EventHistory,
    pub(crate) learner: HebbianLearner,
    /// Waves published since construction.
    pub(crate) event_count: u64,
}

/// The event hub.
///
/// Construct one per composition root (or per test) and share it as
/// `Arc<Hub>`.
pub struct Hub {
    config: HubConfig,
    state: Mutex<HubState>,
}

impl Hub {
    /// Create a hub backed by the petgraph bond graph.
    pub fn new(config: HubConfig) -> Result<Self> {
        let graph = PetDensityGraph::new(config.initial_bond, config.bond_floor);
        Self::with_graph(config, Box::new(graph))
    }

    /// Create a hub over a caller-supplied bond graph.
    pub fn with_graph(config: HubConfig, graph: Box<dyn RelationalDensity>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, graph))
    }

    fn build(config: HubConfig, graph: Box<dyn RelationalDensity>) -> Self {
        let state = HubState {
            registry: ModuleRegistry::new(),
            subscriptions: SubscriptionTable::new(),
            graph,
            history: EventHistory::new(config.history_capacity),
            learner: HebbianLearner::new(&config),
            event_count: 0,
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Every mutation completes before anything that can panic runs, so a
    /// poisoned lock still guards consistent state.
    pub(crate) fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Registration ---

    /// Register a module and seed bonds with every module already known.
    ///
    /// Re-registering a name overwrites the record (with a warning);
    /// existing bonds are kept.
    pub fn register_module(
        &self,
        name: &str,
        path: &str,
        capabilities: &[&str],
        description: &str,
    ) -> Result<ModuleInfo> {
        let capabilities: Vec<String> = capabilities.iter().map(|c| c.to_string()).collect();

        let mut state = self.lock();
        let info = state.registry.register(name, path, &capabilities, description)?;
        let initial = self.config.initial_bond;
        for other in state.registry.names() {
            if other != name {
                state.graph.init_pair(name, &other, initial);
            }
        }
        Ok(info)
    }

    pub fn module(&self, name: &str) -> Option<ModuleInfo> {
        self.lock().registry.get(name).cloned()
    }

    /// Snapshot of all module records, ordered by name.
    pub fn modules(&self) -> BTreeMap<String, ModuleInfo> {
        self.lock().registry.all()
    }

    pub fn find_by_capability(&self, tag: &str) -> Vec<String> {
        self.lock().registry.find_by_capability(tag)
    }

    // --- Subscriptions ---

    /// Subscribe `module` to `event_type` with a static weight in [0, 1].
    ///
    /// Duplicate subscriptions are kept; each one delivers separately.
    pub fn subscribe(
        &self,
        module: &str,
        event_type: &str,
        handler: Arc<dyn WaveHandler>,
        weight: f64,
    ) -> Result<()> {
        validate_module_name(module)?;
        if weight.is_nan() {
            return Err(HubError::InvalidWeight(weight));
        }

        let mut state = self.lock();
        if !state.registry.contains(module) {
            warn!(
                module,
                event_type, "subscribing unregistered module; it has no bonds until registered"
            );
        }
        state.subscriptions.subscribe(module, event_type, handler, weight);
        debug!(module, event_type, weight, "subscribed");
        Ok(())
    }

    /// Closure form of [`Hub::subscribe`].
    pub fn subscribe_fn<F>(&self, module: &str, event_type: &str, weight: f64, handler: F) -> Result<()>
    where
        F: Fn(&WaveEvent) -> HandlerResult + Send + Sync + 'static,
    {
        self.subscribe(module, event_type, Arc::new(handler), weight)
    }

    /// Remove every subscription of `module` to `event_type`.
    /// Returns how many entries were removed.
    pub fn unsubscribe(&self, module: &str, event_type: &str) -> usize {
        let removed = self.lock().subscriptions.unsubscribe(module, event_type);
        debug!(module, event_type, removed, "unsubscribed");
        removed
    }

    pub fn event_types(&self) -> Vec<String> {
        self.lock().subscriptions.event_types()
    }

    /// Event types `module` currently listens to.
    pub fn subscriptions_of(&self, module: &str) -> Vec<String> {
        self.lock().subscriptions.subscriptions_of(module)
    }

    // --- Dispatch ---

    /// Broadcast a wave from `source` to every subscriber of `event_type`.
    ///
    /// Returns one outcome per invoked subscriber, keyed by module name.
    /// An event type without subscribers yields an empty map.
    pub fn publish_wave(
        &self,
        source: &str,
        event_type: &str,
        wave: Wave,
        payload: Option<Value>,
    ) -> Result<BTreeMap<String, DispatchOutcome>> {
        validate_module_name(source)?;
        let event = WaveEvent::new(source, event_type, wave, payload);

        let (sequence, targets) = {
            let mut state = self.lock();
            state.history.push(event.clone());
            state.event_count += 1;
            let sequence = state.event_count;
            if state.registry.record_fire(source, event.timestamp) {
                state.learner.record_fire(source, Instant::now());
            } else {
                debug!(source, "wave published by unregistered module");
            }

            let targets: Vec<(Subscription, f64)> = state
                .subscriptions
                .get(event_type)
                .into_iter()
                .map(|sub| {
                    let bond = state.graph.get(source, &sub.module);
                    (sub, bond)
                })
                .collect();
            (sequence, targets)
        };

        let mut results = BTreeMap::new();
        let mut invoked: Vec<(String, bool)> = Vec::new();
        for (sub, bond) in &targets {
            let effective = sub.weight * bond;
            if effective <= self.config.firing_threshold {
                trace!(module = %sub.module, effective, "below firing threshold");
                continue;
            }

            let outcome = invoke(sub.handler.as_ref(), &event);
            if let Some(error) = outcome.error() {
                warn!(module = %sub.module, event_type, error, "subscriber failed");
            } else {
                trace!(module = %sub.module, effective, "subscriber invoked");
            }
            invoked.push((sub.module.clone(), outcome.is_delivered()));
            results.insert(sub.module.clone(), outcome);
        }

        {
            let mut state = self.lock();
            let now = Instant::now();
            let HubState {
                graph,
                learner,
                registry,
                ..
            } = &mut *state;
            for (module, delivered) in &invoked {
                if !registry.contains(module) {
                    continue;
                }
                learner.record_fire(module, now);
                if *delivered {
                    learner.direct_reinforce(&mut **graph, source, module);
                }
            }
            learner.check_co_firing(&mut **graph, now);
            learner.periodic_decay(&mut **graph, sequence);
        }

        debug!(
            source,
            event_type,
            subscribers = targets.len(),
            invoked = invoked.len(),
            "wave dispatched"
        );
        Ok(results)
    }

    // --- Bonds ---

    /// Current weight of `(a, b)`, 0.0 if never seen.
    pub fn bond(&self, a: &str, b: &str) -> f64 {
        self.lock().graph.get(a, b)
    }

    pub fn strengthen_bond(&self, a: &str, b: &str, amount: f64) {
        self.lock().graph.strengthen(a, b, amount);
    }

    pub fn weaken_bond(&self, a: &str, b: &str, amount: f64) {
        self.lock().graph.weaken(a, b, amount);
    }

    pub fn decay_bonds(&self, rate: f64) {
        self.lock().graph.decay_all(rate);
    }

    /// Modules `module` is bonded to at or above `threshold`, strongest first.
    pub fn get_related_modules(&self, module: &str, threshold: f64) -> Vec<(String, f64)> {
        self.lock().graph.related(module, threshold)
    }

    /// The `n` most recent events, oldest first.
    pub fn recent_events(&self, n: usize) -> Vec<WaveEvent> {
        self.lock().history.recent(n)
    }

    pub fn total_events(&self) -> u64 {
        self.lock().event_count
    }
}

impl Default for Hub {
    fn default() -> Self {
        let config = HubConfig::default();
        let graph = PetDensityGraph::new(config.initial_bond, config.bond_floor);
        Self::build(config, Box::new(graph))
    }
}

/// Run a handler, turning both `Err` returns and panics into outcomes.
fn invoke(handler: &dyn WaveHandler, event: &WaveEvent) -> DispatchOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.on_wave(event))) {
        Ok(result) => DispatchOutcome::from(result),
        Err(payload) => DispatchOutcome::failed(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("handler panicked: {msg}")
    } else {
        "handler panicked".to_string()
    }
}
