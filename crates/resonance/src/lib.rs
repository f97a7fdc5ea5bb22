//! # Resonance
//!
//! A publish/subscribe hub whose connections learn.
//!
//! Modules register with a [`Hub`](runtime::hub::Hub), subscribe to event
//! types, and publish waves. Every delivery is gated by the product of the
//! subscription's static weight and a learned bond between publisher and
//! subscriber. Bonds that carry traffic grow, bonds between modules that
//! fire together grow, and everything slowly decays.
//!
//! ## Quick Start
//!
//! ```rust
//! use resonance::prelude::*;
//! use serde_json::json;
//!
//! let hub = Hub::default();
//! hub.register_module("Sensor", "devices/sensor", &["input"], "reads the world").unwrap();
//! hub.register_module("Actuator", "devices/actuator", &["output"], "moves things").unwrap();
//!
//! hub.subscribe_fn("Actuator", "signal", 1.0, |event| {
//!     Ok(json!({ "amplitude": event.wave.amplitude }))
//! }).unwrap();
//!
//! for _ in 0..20 {
//!     let results = hub.publish_wave("Sensor", "signal", Wave::new(1.0, 0.8, 0.0), None).unwrap();
//!     assert!(results["Actuator"].is_delivered());
//! }
//!
//! assert!(hub.bond("Sensor", "Actuator") > INITIAL_BOND);
//! println!("{}", hub.visualize(VISUALIZE_THRESHOLD));
//! ```
//!
//! ## Architecture
//!
//! - [`resonance_core`] - Shared types, the bond-graph trait, configuration and errors
//! - [`resonance_runtime`] - The hub, its petgraph bond graph, the Hebbian learner and persistence
//!
//! ## Hebbian Learning
//!
//! "Modules that fire together, wire together."
//!
//! - Every pair of registered modules starts at 0.1 in both directions
//! - Each successful delivery strengthens source and subscriber by 0.01
//! - Modules firing within 100 ms of each other are strengthened by 0.005
//! - Every 50 events all bonds lose 0.001, never dropping below 0.01
//!
//! ## State Persistence
//!
//! ```rust,no_run
//! use resonance::prelude::*;
//! use std::path::Path;
//!
//! let hub = Hub::default();
//! hub.save_state(Path::new(".resonance/state.json")).unwrap();
//!
//! let restored = Hub::default();
//! assert!(restored.load_state(Path::new(".resonance/state.json")));
//! ```

// Re-export all subcrates
pub use resonance_core as core;
pub use resonance_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use resonance::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use resonance_core::types::{
        bond_key, parse_bond_key, Bond, EventId, HubStatus, ModuleInfo, Wave, WaveEvent,
    };

    // Handlers and dispatch results
    pub use resonance_core::handler::{DispatchOutcome, HandlerError, HandlerResult, WaveHandler};

    // Bond graph
    pub use resonance_core::density::{RelationalDensity, BOND_CEILING, BOND_FLOOR, INITIAL_BOND};

    // Configuration and errors
    pub use resonance_core::config::HubConfig;
    pub use resonance_core::error::{HubError, Result};

    // Runtime
    pub use resonance_runtime::density_graph::PetDensityGraph;
    pub use resonance_runtime::hub::Hub;
    pub use resonance_runtime::persistence::{read_state, write_state, PersistedModule, StateDocument};
    pub use resonance_runtime::query::{RELATED_THRESHOLD, STATUS_TOP_BONDS, VISUALIZE_THRESHOLD};
}
