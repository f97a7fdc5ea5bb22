//! The subscriber seam.
//!
//! Anything that wants to react to waves implements [`WaveHandler`].
//! Plain closures qualify through the blanket impl, so most callers
//! never name the trait.

use crate::types::WaveEvent;
use serde::Serialize;
use serde_json::Value;

/// Error type a handler may return. Any `std::error::Error` converts via `?`.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// What a handler produces for one delivery.
pub type HandlerResult = std::result::Result<Value, HandlerError>;

/// A subscriber callback.
///
/// Handlers run on the publisher's thread with the hub lock released,
/// so they may publish, subscribe or register on the same hub.
pub trait WaveHandler: Send + Sync {
    fn on_wave(&self, event: &WaveEvent) -> HandlerResult;
}

impl<F> WaveHandler for F
where
    F: Fn(&WaveEvent) -> HandlerResult + Send + Sync,
{
    fn on_wave(&self, event: &WaveEvent) -> HandlerResult {
        self(event)
    }
}

/// Per-subscriber result of a `publish_wave` call.
///
/// Serializes as the handler's raw value, or as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DispatchOutcome {
    Delivered(Value),
    Failed { error: String },
}

impl DispatchOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        DispatchOutcome::Failed { error: error.into() }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            DispatchOutcome::Delivered(v) => Some(v),
            DispatchOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Delivered(_) => None,
            DispatchOutcome::Failed { error } => Some(error),
        }
    }
}

impl From<HandlerResult> for DispatchOutcome {
    fn from(result: HandlerResult) -> Self {
        match result {
            Ok(value) => DispatchOutcome::Delivered(value),
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }
}
