//! Concrete implementation of the RelationalDensity trait using petgraph.
//!
//! Bonds live in a directed `DiGraph` so the two directions of a pair can
//! drift apart. A `HashMap` index gives O(1) lookup from module name to
//! petgraph's internal node index.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use resonance_core::density::{attenuate, saturate, RelationalDensity, BOND_CEILING};
use resonance_core::types::Bond;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Petgraph-backed bond graph.
pub struct PetDensityGraph {
    graph: DiGraph<String, f64>,
    node_index: HashMap<String, NodeIndex>,
    initial: f64,
    floor: f64,
}

impl PetDensityGraph {
    pub fn new(initial: f64, floor: f64) -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            initial,
            floor,
        }
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.node_index.insert(name.to_string(), idx);
            idx
        }
    }

    /// Apply `update` to the `(a, b)` edge, creating it at the initial
    /// weight first if it does not exist.
    fn update_edge(&mut self, a: &str, b: &str, update: impl Fn(f64) -> f64) {
        let from = self.ensure_node(a);
        let to = self.ensure_node(b);
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                let w = self.graph[edge];
                self.graph[edge] = update(w);
            }
            None => {
                let w = update(self.initial);
                self.graph.add_edge(from, to, w);
            }
        }
    }

    fn clamp(&self, weight: f64) -> f64 {
        weight.clamp(self.floor, BOND_CEILING)
    }
}

impl Default for PetDensityGraph {
    fn default() -> Self {
        Self::new(resonance_core::density::INITIAL_BOND, resonance_core::density::BOND_FLOOR)
    }
}

impl RelationalDensity for PetDensityGraph {
    fn init_pair(&mut self, a: &str, b: &str, initial: f64) {
        if a == b {
            return;
        }
        let initial = self.clamp(initial);
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        if self.graph.find_edge(ia, ib).is_none() {
            self.graph.add_edge(ia, ib, initial);
        }
        if self.graph.find_edge(ib, ia).is_none() {
            self.graph.add_edge(ib, ia, initial);
        }
    }

    fn strengthen(&mut self, a: &str, b: &str, amount: f64) {
        if a == b {
            return;
        }
        self.update_edge(a, b, |w| saturate(w, amount));
        self.update_edge(b, a, |w| saturate(w, amount));
    }

    fn weaken(&mut self, a: &str, b: &str, amount: f64) {
        if a == b {
            return;
        }
        let floor = self.floor;
        self.update_edge(a, b, |w| attenuate(w, amount, floor));
        self.update_edge(b, a, |w| attenuate(w, amount, floor));
    }

    fn decay_all(&mut self, rate: f64) {
        let floor = self.floor;
        for w in self.graph.edge_weights_mut() {
            *w = attenuate(*w, rate, floor);
        }
    }

    fn get(&self, a: &str, b: &str) -> f64 {
        let (Some(&from), Some(&to)) = (self.node_index.get(a), self.node_index.get(b)) else {
            return 0.0;
        };
        self.graph
            .find_edge(from, to)
            .map(|edge| self.graph[edge])
            .unwrap_or(0.0)
    }

    fn set(&mut self, a: &str, b: &str, weight: f64) {
        if a == b {
            return;
        }
        let weight = self.clamp(weight);
        let from = self.ensure_node(a);
        let to = self.ensure_node(b);
        self.graph.update_edge(from, to, weight);
    }

    fn related(&self, module: &str, threshold: f64) -> Vec<(String, f64)> {
        let Some(&idx) = self.node_index.get(module) else {
            return vec![];
        };

        let mut results: Vec<(String, f64)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|edge| *edge.weight() >= threshold)
            .map(|edge| (self.graph[edge.target()].clone(), *edge.weight()))
            .collect();

        results.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        results
    }

    fn bonds(&self) -> Vec<Bond> {
        self.graph
            .edge_references()
            .map(|edge| {
                Bond::new(
                    self.graph[edge.source()].clone(),
                    self.graph[edge.target()].clone(),
                    *edge.weight(),
                )
            })
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
