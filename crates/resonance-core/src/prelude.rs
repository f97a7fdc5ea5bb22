//! Resonance Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use resonance_core::prelude::*;
//! ```

pub use crate::types::{
    Bond, EventId, HubStatus, ModuleInfo, Wave, WaveEvent,
};

pub use crate::config::HubConfig;

pub use crate::density::{RelationalDensity, BOND_CEILING, BOND_FLOOR, INITIAL_BOND};

pub use crate::handler::{DispatchOutcome, HandlerError, HandlerResult, WaveHandler};

pub use crate::error::{HubError, Result};
