//! Show hub statistics.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::load_hub;

pub fn run(state: Option<PathBuf>, top: usize) -> Result<()> {
    let (hub, path) = load_hub(state)?;
    let status = hub.status(top);

    println!("{}", "Resonance Hub Status".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!("  State file:        {}", path.display());
    println!();

    println!("{}", "Modules".blue().bold());
    println!("  Registered:        {}", status.module_count.to_string().cyan());
    for (name, module) in hub.modules() {
        let caps: Vec<&str> = module.capabilities.iter().map(String::as_str).collect();
        println!(
            "  {} {} fires={:<6} [{}]",
            "•".blue(),
            format!("{:<16}", name).white().bold(),
            module.total_fires,
            caps.join(", ")
        );
    }
    println!();

    println!("{}", "Bonds".blue().bold());
    println!("  Directed bonds:    {}", status.relation_count.to_string().cyan());
    let fires: u64 = hub.modules().values().map(|m| m.total_fires).sum();
    println!("  Total fires:       {}", fires.to_string().cyan());
    println!();

    if !status.top_bonds.is_empty() {
        println!("{}", "Strongest Bonds".blue().bold());
        for bond in &status.top_bonds {
            println!(
                "  {} → {}  {}",
                bond.from,
                bond.to,
                format!("{:.4}", bond.weight).green()
            );
        }
        println!();
    }

    println!("{}", "═".repeat(40).dimmed());
    Ok(())
}

