//! # Resonance Core
//!
//! Core traits and types for the Resonance event hub.
//!
//! Resonance is a publish/subscribe broker where every delivery is scaled
//! by a learned connection weight between publisher and subscriber. This
//! crate holds the vocabulary shared by the runtime and its clients:
//!
//! - **Modules** - registered participants ([`types::ModuleInfo`])
//! - **Waves** - opaque broadcast payloads ([`types::Wave`], [`types::WaveEvent`])
//! - **Bonds** - directed connection weights ([`types::Bond`])
//! - **Handlers** - the callback seam subscribers implement ([`handler::WaveHandler`])
//! - **Relational density** - the bond graph abstraction ([`density::RelationalDensity`])
//!
//! ## Quick Start
//!
//! ```rust
//! use resonance_core::prelude::*;
//!
//! let wave = Wave::new(440.0, 0.8, 0.0).with_extension("channel", "left");
//! assert_eq!(wave.frequency, 440.0);
//!
//! let config = HubConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod density;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod types;
