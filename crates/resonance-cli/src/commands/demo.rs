//! Run a small hub end to end and save the learned state.

use anyhow::{Context, Result};
use colored::Colorize;
use resonance::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{state_path, Config};

/// Register the demo modules and wire their subscriptions.
pub fn build_demo_hub(config: &Config) -> Result<Hub> {
    let hub = config.hub()?;

    hub.register_module("Sensor", "demo/sensor", &["input", "analog"], "Samples a periodic signal")?;
    hub.register_module("Actuator", "demo/actuator", &["output"], "Acts on strong signals")?;
    hub.register_module("Logger", "demo/logger", &["sink"], "Records everything it hears")?;

    hub.subscribe_fn("Actuator", "signal", 1.0, |event| {
        let engaged = event.wave.amplitude > 0.5;
        Ok(json!({ "engaged": engaged }))
    })?;
    hub.subscribe_fn("Logger", "signal", 0.6, |event| {
        Ok(json!({ "logged": event.id.0.to_string() }))
    })?;
    hub.subscribe_fn("Logger", "actuated", 0.6, |_| Ok(json!({ "logged": true })))?;

    Ok(hub)
}

/// Publish `publishes` waves from the sensor. Returns how many deliveries failed.
pub fn drive(hub: &Hub, publishes: u64, verbose: bool) -> Result<usize> {
    let mut failures = 0;
    for i in 0..publishes {
        let phase = i as f64 * 0.1;
        let wave = Wave::new(2.0, phase.sin().abs(), phase).with_extension("step", i);
        let results = hub.publish_wave("Sensor", "signal", wave, Some(json!({ "step": i })))?;

        let engaged = results
            .get("Actuator")
            .and_then(|outcome| outcome.value())
            .and_then(|value| value["engaged"].as_bool())
            .unwrap_or(false);
        if engaged {
            hub.publish_wave("Actuator", "actuated", Wave::new(2.0, 1.0, phase), None)?;
        }

        failures += results.values().filter(|o| !o.is_delivered()).count();
        if verbose {
            println!("  step {:>3}: {} subscribers reached", i, results.len());
        }
    }
    Ok(failures)
}

pub fn run(publishes: Option<u64>, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let publishes = publishes.unwrap_or(config.demo.publishes);
    let path = state_path(output, &config);

    println!("{} Building demo hub...", "→".blue());
    let hub = build_demo_hub(&config)?;

    println!(
        "{} Publishing {} waves...",
        "→".blue(),
        publishes.to_string().cyan()
    );
    let failures = drive(&hub, publishes, verbose)?;
    if failures > 0 {
        println!("  {} {} deliveries failed", "•".yellow(), failures);
    }

    save(&hub, &path)?;
    info!(publishes, failures, path = %path.display(), "demo finished");

    let status = hub.get_hub_status();
    println!();
    println!("{} Demo complete", "✓".green().bold());
    println!("  Events:  {}", status.total_events.to_string().cyan());
    println!("  Bonds:   {}", status.relation_count.to_string().cyan());
    println!(
        "  Sensor → Actuator: {}",
        format!("{:.4}", hub.bond("Sensor", "Actuator")).green()
    );
    println!("  Saved:   {}", path.display());

    Ok(())
}

fn save(hub: &Hub, path: &Path) -> Result<()> {
    hub.save_state(path)
        .with_context(|| format!("Failed to save state: {}", path.display()))
}
