//! # Resonance Runtime
//!
//! The hub and everything it owns.
//!
//! The runtime is the "nervous system": modules register with the
//! [`hub::Hub`], subscribe to event types, and publish waves. Each
//! delivery is scaled by a learned bond between publisher and subscriber,
//! and the bonds themselves are shaped by Hebbian reinforcement and
//! periodic entropy decay.

pub mod density_graph;
pub mod history;
pub mod hub;
pub mod learner;
pub mod persistence;
pub mod prelude;
pub mod query;
pub mod registry;
pub mod subscriptions;
