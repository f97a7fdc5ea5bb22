//! Configuration management for Resonance CLI.

use anyhow::{bail, Context, Result};
use resonance::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project config file.
pub const CONFIG_FILE: &str = "resonance.toml";

/// Resonance project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_publishes")]
    pub publishes: u64,
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

// Default value functions
fn default_publishes() -> u64 { 50 }
fn default_state_path() -> PathBuf { data_dir().join("state.json") }

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            publishes: default_publishes(),
            state_path: default_state_path(),
        }
    }
}

impl Config {
    /// Load config from resonance.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load and validate config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .hub
            .validate()
            .with_context(|| format!("Invalid [hub] settings in {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Build a hub from the `[hub]` table.
    pub fn hub(&self) -> Result<Hub> {
        Hub::new(self.hub.clone()).context("Failed to build hub from config")
    }
}

/// Find resonance.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// The Resonance data directory (.resonance/), relative to the working directory.
pub fn data_dir() -> PathBuf {
    PathBuf::from(".resonance")
}

/// Pick the state file: explicit flag first, then the config.
pub fn state_path(explicit: Option<PathBuf>, config: &Config) -> PathBuf {
    explicit.unwrap_or_else(|| config.demo.state_path.clone())
}

/// Build a hub from config and load the saved state into it.
pub fn load_hub(explicit: Option<PathBuf>) -> Result<(Hub, PathBuf)> {
    let config = Config::load()?;
    let path = state_path(explicit, &config);
    let hub = config.hub()?;
    if !hub.load_state(&path) {
        bail!(
            "No readable state at {}. Run `resonance demo` first.",
            path.display()
        );
    }
    Ok((hub, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[hub]"));
        assert!(text.contains("[demo]"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.hub, HubConfig::default());
        assert_eq!(parsed.demo.publishes, 50);
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[hub]\nentropy_interval = 10\n").unwrap();
        assert_eq!(parsed.hub.entropy_interval, 10);
        assert_eq!(parsed.hub.firing_threshold, 0.05);
        assert_eq!(parsed.demo.state_path, PathBuf::from(".resonance/state.json"));
    }

    #[test]
    fn invalid_hub_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[hub]\nhistory_capacity = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn explicit_state_path_wins() {
        let config = Config::default();
        let explicit = PathBuf::from("elsewhere.json");
        assert_eq!(state_path(Some(explicit.clone()), &config), explicit);
        assert_eq!(state_path(None, &config), config.demo.state_path);
    }
}
