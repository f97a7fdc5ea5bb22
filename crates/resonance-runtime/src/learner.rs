//! Hebbian learner: "modules that fire together, wire together."
//!
//! Three forces act on the bond graph:
//!
//! 1. **Direct reinforcement**: a source and each subscriber it reached
//!    are strengthened by `direct_reinforcement`.
//! 2. **Co-firing**: every pair of modules that fired inside the
//!    co-fire window is strengthened by `co_fire_reinforcement`, even if
//!    no subscription links them.
//! 3. **Entropy**: every `entropy_interval` events, all bonds lose
//!    `decay_rate`, clamped at the floor.
//!
//! The learner holds no bonds itself. It operates on whatever
//! [`RelationalDensity`] the hub passes in.

use resonance_core::config::HubConfig;
use resonance_core::density::RelationalDensity;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct HebbianLearner {
    recently_fired: HashMap<String, Instant>,
    window: Duration,
    direct_reinforcement: f64,
    co_fire_reinforcement: f64,
    decay_rate: f64,
    entropy_interval: u64,
}

impl HebbianLearner {
    pub fn new(config: &HubConfig) -> Self {
        Self {
            recently_fired: HashMap::new(),
            window: config.co_fire_window(),
            direct_reinforcement: config.direct_reinforcement,
            co_fire_reinforcement: config.co_fire_reinforcement,
            decay_rate: config.decay_rate,
            entropy_interval: config.entropy_interval.max(1),
        }
    }

    /// Note that `module` fired at `at`. A later fire replaces the earlier one.
    pub fn record_fire(&mut self, module: &str, at: Instant) {
        self.recently_fired.insert(module.to_string(), at);
    }

    /// Strengthen the bond between a source and a subscriber it reached.
    pub fn direct_reinforce(&self, graph: &mut dyn RelationalDensity, source: &str, target: &str) {
        graph.strengthen(source, target, self.direct_reinforcement);
    }

    /// Strengthen every pair of modules that fired within the window
    /// ending at `now`. Entries older than the window are forgotten.
    ///
    /// Returns the number of pairs strengthened.
    pub fn check_co_firing(&mut self, graph: &mut dyn RelationalDensity, now: Instant) -> usize {
        let window = self.window;
        self.recently_fired
            .retain(|_, fired_at| now.saturating_duration_since(*fired_at) <= window);

        let mut active: Vec<&String> = self.recently_fired.keys().collect();
        active.sort();

        let mut pairs = 0;
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                graph.strengthen(active[i], active[j], self.co_fire_reinforcement);
                pairs += 1;
            }
        }
        pairs
    }

    /// Run the entropy pass if `event_count` lands on the interval.
    /// Returns whether decay ran.
    pub fn periodic_decay(&self, graph: &mut dyn RelationalDensity, event_count: u64) -> bool {
        if event_count == 0 || event_count % self.entropy_interval != 0 {
            return false;
        }
        graph.decay_all(self.decay_rate);
        debug!(event_count, rate = self.decay_rate, "entropy decay applied");
        true
    }

    /// Modules currently inside the co-fire window, sorted.
    pub fn recently_fired(&self) -> Vec<String> {
        let mut names: Vec<String> = self.recently_fired.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density_graph::PetDensityGraph;
    use resonance_core::density::INITIAL_BOND;

    fn graph_with(names: &[&str]) -> PetDensityGraph {
        let mut graph = PetDensityGraph::default();
        for (i, a) in names.iter().enumerate() {
            for b in &names[..i] {
                graph.init_pair(a, b, INITIAL_BOND);
            }
        }
        graph
    }

    #[test]
    fn co_firing_strengthens_pairs_inside_window() {
        let mut learner = HebbianLearner::new(&HubConfig::default());
        let mut graph = graph_with(&["a", "b", "c"]);
        let now = Instant::now();

        learner.record_fire("a", now);
        learner.record_fire("b", now);
        let pairs = learner.check_co_firing(&mut graph, now);

        assert_eq!(pairs, 1);
        assert!(graph.get("a", "b") > INITIAL_BOND);
        assert!(graph.get("b", "a") > INITIAL_BOND);
        assert_eq!(graph.get("a", "c"), INITIAL_BOND);
    }

    #[test]
    fn stale_fires_are_forgotten() {
        let mut learner = HebbianLearner::new(&HubConfig::default());
        let mut graph = graph_with(&["a", "b"]);
        let start = Instant::now();

        learner.record_fire("a", start);
        let later = start + Duration::from_millis(500);
        learner.record_fire("b", later);

        assert_eq!(learner.check_co_firing(&mut graph, later), 0);
        assert_eq!(learner.recently_fired(), vec!["b"]);
        assert_eq!(graph.get("a", "b"), INITIAL_BOND);
    }

    #[test]
    fn decay_runs_on_interval_only() {
        let learner = HebbianLearner::new(&HubConfig::default().with_entropy_interval(5));
        let mut graph = graph_with(&["a", "b"]);

        assert!(!learner.periodic_decay(&mut graph, 4));
        assert_eq!(graph.get("a", "b"), INITIAL_BOND);
        assert!(learner.periodic_decay(&mut graph, 5));
        assert!(graph.get("a", "b") < INITIAL_BOND);
        assert!(!learner.periodic_decay(&mut graph, 0));
    }

    #[test]
    fn direct_reinforcement_outpaces_co_firing() {
        let learner = HebbianLearner::new(&HubConfig::default());
        let mut direct = graph_with(&["a", "b"]);
        learner.direct_reinforce(&mut direct, "a", "b");

        let mut co = graph_with(&["a", "b"]);
        let mut co_learner = HebbianLearner::new(&HubConfig::default());
        let now = Instant::now();
        co_learner.record_fire("a", now);
        co_learner.record_fire("b", now);
        co_learner.check_co_firing(&mut co, now);

        assert!(direct.get("a", "b") > co.get("a", "b"));
    }
}
