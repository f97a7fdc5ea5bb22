//! Tunable hub parameters.

use crate::density::{BOND_FLOOR, INITIAL_BOND};
use crate::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for dispatch and Hebbian learning.
///
/// The three learning amounts must keep the order
/// `direct_reinforcement > co_fire_reinforcement > decay_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Effective weight a subscriber must exceed to be invoked (default: 0.05).
    pub firing_threshold: f64,
    /// Run a decay pass every this many published events (default: 50).
    pub entropy_interval: u64,
    /// Number of events kept in history (default: 1000).
    pub history_capacity: usize,
    /// Weight given to newly seeded bonds (default: 0.1).
    pub initial_bond: f64,
    /// Lowest weight a bond decays to (default: 0.01).
    pub bond_floor: f64,
    /// Reinforcement between a source and each subscriber it reached (default: 0.01).
    pub direct_reinforcement: f64,
    /// Reinforcement between modules that fired inside the co-fire window (default: 0.005).
    pub co_fire_reinforcement: f64,
    /// Amount removed from every bond on each decay pass (default: 0.001).
    pub decay_rate: f64,
    /// Width of the co-firing window in milliseconds (default: 100).
    pub co_fire_window_ms: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            firing_threshold: 0.05,
            entropy_interval: 50,
            history_capacity: 1000,
            initial_bond: INITIAL_BOND,
            bond_floor: BOND_FLOOR,
            direct_reinforcement: 0.01,
            co_fire_reinforcement: 0.005,
            decay_rate: 0.001,
            co_fire_window_ms: 100,
        }
    }
}

impl HubConfig {
    pub fn with_firing_threshold(mut self, threshold: f64) -> Self {
        self.firing_threshold = threshold;
        self
    }

    pub fn with_entropy_interval(mut self, interval: u64) -> Self {
        self.entropy_interval = interval;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_co_fire_window(mut self, window: Duration) -> Self {
        self.co_fire_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn co_fire_window(&self) -> Duration {
        Duration::from_millis(self.co_fire_window_ms)
    }

    /// Reject configurations the hub cannot run with.
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("firing_threshold", self.firing_threshold),
            ("initial_bond", self.initial_bond),
            ("bond_floor", self.bond_floor),
            ("direct_reinforcement", self.direct_reinforcement),
            ("co_fire_reinforcement", self.co_fire_reinforcement),
            ("decay_rate", self.decay_rate),
        ];
        for (name, value) in unit_fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(HubError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.entropy_interval == 0 {
            return Err(HubError::InvalidConfig("entropy_interval must be at least 1".into()));
        }
        if self.history_capacity == 0 {
            return Err(HubError::InvalidConfig("history_capacity must be at least 1".into()));
        }
        if self.initial_bond < self.bond_floor {
            return Err(HubError::InvalidConfig(format!(
                "initial_bond ({}) is below bond_floor ({})",
                self.initial_bond, self.bond_floor
            )));
        }
        if !(self.direct_reinforcement > self.co_fire_reinforcement
            && self.co_fire_reinforcement > self.decay_rate)
        {
            return Err(HubError::InvalidConfig(
                "expected direct_reinforcement > co_fire_reinforcement > decay_rate".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = HubConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.co_fire_window(), Duration::from_millis(100));
    }

    #[test]
    fn learning_order_is_enforced() {
        let mut config = HubConfig::default();
        config.decay_rate = 0.02;
        assert!(matches!(config.validate(), Err(HubError::InvalidConfig(_))));
    }

    #[test]
    fn huge_co_fire_window_saturates() {
        let config = HubConfig::default().with_co_fire_window(Duration::MAX);
        assert_eq!(config.co_fire_window_ms, u64::MAX);

        let config = HubConfig::default().with_co_fire_window(Duration::from_millis(250));
        assert_eq!(config.co_fire_window(), Duration::from_millis(250));
    }

    #[test]
    fn zero_interval_rejected() {
        let config = HubConfig::default().with_entropy_interval(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_threshold_rejected() {
        let config = HubConfig::default().with_firing_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: HubConfig = serde_json::from_str(r#"{"entropy_interval": 10}"#).unwrap();
        assert_eq!(config.entropy_interval, 10);
        assert_eq!(config.firing_threshold, 0.05);
    }
}
