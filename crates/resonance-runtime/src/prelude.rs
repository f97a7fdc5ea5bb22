//! Resonance Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use resonance_runtime::prelude::*;
//! ```

// Re-export the hub
pub use crate::hub::Hub;

// Re-export components
pub use crate::density_graph::PetDensityGraph;
pub use crate::history::EventHistory;
pub use crate::learner::HebbianLearner;
pub use crate::registry::ModuleRegistry;
pub use crate::subscriptions::{Subscription, SubscriptionTable};

// Re-export persistence
pub use crate::persistence::{read_state, write_state, PersistedModule, StateDocument};

// Re-export query helpers
pub use crate::query::{render_graph, RELATED_THRESHOLD, STATUS_TOP_BONDS, VISUALIZE_THRESHOLD};

// Re-export from core
pub use resonance_core::prelude::*;
