//! Error types for hub operations.
//!
//! Only argument validation and persistence writes surface errors to
//! callers. Dispatch-time faults stay inside the hub and are reported
//! per subscriber as a [`crate::handler::DispatchOutcome`].

use thiserror::Error;

/// Result type for hub operations.
pub type Result<T> = std::result::Result<T, HubError>;

/// Errors that can occur during hub operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HubError {
    /// Module names must be non-empty and must not contain the bond-key separator.
    #[error("Invalid module name: {0:?}")]
    InvalidModuleName(String),

    /// Subscription weights must be real numbers.
    #[error("Invalid weight: {0} (must be a finite number)")]
    InvalidWeight(f64),

    #[error("Invalid hub configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for HubError {
    fn from(e: std::io::Error) -> Self {
        HubError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for HubError {
    fn from(e: serde_json::Error) -> Self {
        HubError::Serialization(e.to_string())
    }
}

/// Check a module name against the hub's naming rules.
pub fn validate_module_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains(crate::types::BOND_KEY_SEPARATOR) {
        return Err(HubError::InvalidModuleName(name.to_string()));
    }
    Ok(())
}
