//! List the strongest directed bonds.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::load_hub;

pub fn run(state: Option<PathBuf>, top: usize) -> Result<()> {
    let (hub, _) = load_hub(state)?;
    let bonds = hub.top_bonds(top);

    if bonds.is_empty() {
        println!("{} No bonds recorded.", "•".yellow());
        return Ok(());
    }

    println!("{} Top {} bonds:", "→".blue(), bonds.len());
    println!();
    for bond in &bonds {
        let weight = format!("{:.4}", bond.weight);
        let weight = if bond.weight >= 0.5 {
            weight.green()
        } else if bond.weight > 0.1 {
            weight.cyan()
        } else {
            weight.dimmed()
        };
        println!("  {:<16} → {:<16} {}", bond.from, bond.to, weight);
    }

    Ok(())
}
