//! Relational density: the learned bond graph.
//!
//! Every ordered pair of registered modules carries a weight in
//! `[BOND_FLOOR, BOND_CEILING]`. Reinforcement saturates toward the
//! ceiling, decay is clamped at the floor, so a bond can fade but never
//! disappear.

use crate::types::Bond;

/// Weight given to both directions of a freshly seeded pair.
pub const INITIAL_BOND: f64 = 0.1;

/// Lowest weight a bond can decay to.
pub const BOND_FLOOR: f64 = 0.01;

pub const BOND_CEILING: f64 = 1.0;

/// Saturating increase: `w + amount * (1 - w)`, capped at the ceiling.
pub fn saturate(weight: f64, amount: f64) -> f64 {
    (weight + amount * (BOND_CEILING - weight)).min(BOND_CEILING)
}

/// Floor-clamped decrease: `max(floor, w - amount)`.
pub fn attenuate(weight: f64, amount: f64, floor: f64) -> f64 {
    (weight - amount).max(floor)
}

/// A handle to the bond graph.
///
/// A trait rather than a concrete type so the learner and hub can be
/// exercised against any backing store. Implementations own every bond
/// mutation; nothing else writes weights.
pub trait RelationalDensity: Send {
    /// Seed both directions of a pair at `initial` if they are absent.
    /// Existing directions are left untouched.
    fn init_pair(&mut self, a: &str, b: &str, initial: f64);

    /// Saturating increase applied to both `(a, b)` and `(b, a)`.
    fn strengthen(&mut self, a: &str, b: &str, amount: f64);

    /// Floor-clamped decrease applied to both `(a, b)` and `(b, a)`.
    fn weaken(&mut self, a: &str, b: &str, amount: f64);

    /// Floor-clamped decrease applied to every edge.
    fn decay_all(&mut self, rate: f64);

    /// Weight of `(a, b)`, or 0.0 if the pair has never been seen.
    fn get(&self, a: &str, b: &str) -> f64;

    /// Overwrite a single direction. Used when restoring persisted state.
    fn set(&mut self, a: &str, b: &str, weight: f64);

    /// Outgoing bonds of `module` with weight >= `threshold`,
    /// strongest first.
    fn related(&self, module: &str, threshold: f64) -> Vec<(String, f64)>;

    /// Every directed edge.
    fn bonds(&self) -> Vec<Bond>;

    fn edge_count(&self) -> usize;

    fn node_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_approaches_but_never_exceeds_ceiling() {
        let mut w = INITIAL_BOND;
        for _ in 0..10_000 {
            let next = saturate(w, 0.3);
            assert!(next >= w);
            assert!(next <= BOND_CEILING);
            w = next;
        }
        assert!((w - BOND_CEILING).abs() < 1e-9);
    }

    #[test]
    fn attenuate_stops_at_floor() {
        assert!((attenuate(0.5, 0.1, BOND_FLOOR) - 0.4).abs() < 1e-12);
        assert_eq!(attenuate(0.02, 0.5, BOND_FLOOR), BOND_FLOOR);
    }
}
