//! Read-only introspection: status, strongest bonds, text rendering.
//!
//! Every query copies what it needs while holding the hub lock and does
//! its sorting and formatting afterwards.

use crate::hub::Hub;
use resonance_core::types::{Bond, HubStatus, ModuleInfo};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

/// Default number of bonds included in [`Hub::get_hub_status`].
pub const STATUS_TOP_BONDS: usize = 5;

/// Default threshold for [`Hub::get_related_modules`] callers.
pub const RELATED_THRESHOLD: f64 = 0.3;

/// Default threshold for [`Hub::visualize`] callers.
pub const VISUALIZE_THRESHOLD: f64 = 0.2;

/// Sort bonds strongest first, breaking ties by endpoint names.
pub fn rank_bonds(bonds: &mut [Bond]) {
    bonds.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.from.cmp(&b.from))
            .then_with(|| a.to.cmp(&b.to))
    });
}

/// Render modules and bonds as a line-based graph listing.
///
/// Nodes are listed by name. Each unordered pair appears once, as
/// `a <-> b`, when either direction reaches `threshold`. Output is
/// deterministic for a given input.
pub fn render_graph(
    modules: &BTreeMap<String, ModuleInfo>,
    bonds: &[Bond],
    threshold: f64,
) -> String {
    let weights: HashMap<(&str, &str), f64> = bonds
        .iter()
        .map(|b| ((b.from.as_str(), b.to.as_str()), b.weight))
        .collect();

    let mut pairs: BTreeMap<(&str, &str), (f64, f64)> = BTreeMap::new();
    for bond in bonds {
        let (a, b) = if bond.from <= bond.to {
            (bond.from.as_str(), bond.to.as_str())
        } else {
            (bond.to.as_str(), bond.from.as_str())
        };
        if a == b || pairs.contains_key(&(a, b)) {
            continue;
        }
        let forward = weights.get(&(a, b)).copied().unwrap_or(0.0);
        let backward = weights.get(&(b, a)).copied().unwrap_or(0.0);
        if forward.max(backward) >= threshold {
            pairs.insert((a, b), (forward, backward));
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "resonance graph: {} nodes, {} edges (threshold {:.2})",
        modules.len(),
        pairs.len(),
        threshold
    );
    for (name, module) in modules {
        let _ = writeln!(out, "node {} fires={}", name, module.total_fires);
    }
    for ((a, b), (forward, backward)) in &pairs {
        let _ = writeln!(out, "{a} <-> {b} {a}->{b}={forward:.4} {b}->{a}={backward:.4}");
    }
    out
}

impl Hub {
    /// The `n` strongest directed bonds.
    pub fn top_bonds(&self, n: usize) -> Vec<Bond> {
        let mut bonds = self.lock().graph.bonds();
        rank_bonds(&mut bonds);
        bonds.truncate(n);
        bonds
    }

    /// Aggregate counts plus the `top_n` strongest bonds.
    pub fn status(&self, top_n: usize) -> HubStatus {
        let (mut status, mut bonds) = {
            let state = self.lock();
            let status = HubStatus {
                module_count: state.registry.len(),
                subscription_count: state.subscriptions.len(),
                relation_count: state.graph.edge_count(),
                history_size: state.history.len(),
                total_events: state.event_count,
                event_types: state.subscriptions.event_types(),
                top_bonds: Vec::new(),
            };
            (status, state.graph.bonds())
        };
        rank_bonds(&mut bonds);
        bonds.truncate(top_n);
        status.top_bonds = bonds;
        status
    }

    pub fn get_hub_status(&self) -> HubStatus {
        self.status(STATUS_TOP_BONDS)
    }

    /// Text listing of modules and every pair bonded at or above `threshold`.
    pub fn visualize(&self, threshold: f64) -> String {
        let (modules, bonds) = {
            let state = self.lock();
            (state.registry.all(), state.graph.bonds())
        };
        render_graph(&modules, &bonds, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub_with(names: &[&str]) -> Hub {
        let hub = Hub::default();
        for name in names {
            hub.register_module(name, "", &[], "").unwrap();
        }
        hub
    }

    #[test]
    fn top_bonds_are_ranked() {
        let hub = hub_with(&["a", "b", "c"]);
        hub.strengthen_bond("a", "c", 0.5);
        hub.strengthen_bond("a", "b", 0.2);

        let top = hub.top_bonds(3);
        assert_eq!(top.len(), 3);
        assert_eq!((top[0].from.as_str(), top[0].to.as_str()), ("a", "c"));
        assert_eq!((top[1].from.as_str(), top[1].to.as_str()), ("c", "a"));
        assert_eq!((top[2].from.as_str(), top[2].to.as_str()), ("a", "b"));
    }

    #[test]
    fn status_counts() {
        let hub = hub_with(&["a", "b"]);
        hub.subscribe_fn("b", "ping", 1.0, |_| Ok(serde_json::Value::Null))
            .unwrap();
        hub.publish_wave("a", "ping", Default::default(), None).unwrap();

        let status = hub.get_hub_status();
        assert_eq!(status.module_count, 2);
        assert_eq!(status.subscription_count, 1);
        assert_eq!(status.relation_count, 2);
        assert_eq!(status.history_size, 1);
        assert_eq!(status.total_events, 1);
        assert_eq!(status.event_types, vec!["ping"]);
        assert_eq!(status.top_bonds.len(), 2);
    }

    #[test]
    fn visualize_deduplicates_pairs() {
        let hub = hub_with(&["b", "a", "c"]);
        hub.strengthen_bond("a", "b", 0.5);

        let text = hub.visualize(0.2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "node a fires=0");
        assert_eq!(lines[2], "node b fires=0");
        assert_eq!(lines[3], "node c fires=0");
        let edges: Vec<&&str> = lines.iter().filter(|l| l.contains("<->")).collect();
        assert_eq!(edges.len(), 1);
        assert!(edges[0].starts_with("a <-> b "));
        assert_eq!(text, hub.visualize(0.2));
    }

    #[test]
    fn visualize_keeps_pair_when_one_direction_clears_threshold() {
        let mut modules = BTreeMap::new();
        modules.insert("a".to_string(), ModuleInfo::new("a", "", Vec::<String>::new(), ""));
        let bonds = vec![Bond::new("a", "b", 0.5), Bond::new("b", "a", 0.05)];

        let text = render_graph(&modules, &bonds, 0.3);
        assert!(text.contains("a <-> b a->b=0.5000 b->a=0.0500"));
        assert!(!render_graph(&modules, &bonds, 0.6).contains("<->"));
    }
}
