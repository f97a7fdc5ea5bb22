//! List modules bonded to a given module.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::load_hub;

pub fn run(module: &str, state: Option<PathBuf>, threshold: f64) -> Result<()> {
    let (hub, _) = load_hub(state)?;

    if hub.module(module).is_none() {
        bail!("Unknown module: {}", module);
    }

    let related = hub.get_related_modules(module, threshold);
    if related.is_empty() {
        println!(
            "{} No modules bonded to {} at ≥ {:.2}",
            "•".yellow(),
            module.cyan(),
            threshold
        );
        return Ok(());
    }

    println!(
        "{} Modules bonded to {} (≥ {:.2}):",
        "→".blue(),
        module.cyan(),
        threshold
    );
    println!();
    for (i, (name, weight)) in related.iter().enumerate() {
        println!(
            "  {}. {} {}",
            (i + 1).to_string().blue(),
            format!("{:<16}", name).white().bold(),
            format!("{:.4}", weight).green()
        );
    }

    Ok(())
}
