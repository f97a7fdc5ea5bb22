//! Bounded event history.

use resonance_core::types::WaveEvent;
use std::collections::VecDeque;

/// Ring buffer of the most recent events. The oldest entry is evicted
/// once `capacity` is reached.
#[derive(Debug)]
pub struct EventHistory {
    events: VecDeque<WaveEvent>,
    capacity: usize,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn push(&mut self, event: WaveEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// The `n` most recent events, oldest first.
    pub fn recent(&self, n: usize) -> Vec<WaveEvent> {
        let skip = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
