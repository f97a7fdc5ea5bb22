//! Scaffold a Resonance project: config file plus state directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{data_dir, Config, CONFIG_FILE};

/// What `init` did with one path.
#[derive(Debug, PartialEq)]
pub enum Scaffolded {
    Created(PathBuf),
    Kept(PathBuf),
}

/// Write the default layout under `base`. Existing files are never touched.
pub fn scaffold(base: &Path) -> Result<Vec<Scaffolded>> {
    let mut done = Vec::new();

    let data = base.join(data_dir());
    if data.is_dir() {
        done.push(Scaffolded::Kept(data.clone()));
    } else {
        std::fs::create_dir_all(&data)
            .with_context(|| format!("Failed to create {}", data.display()))?;
        done.push(Scaffolded::Created(data.clone()));
    }

    let config_path = base.join(CONFIG_FILE);
    if config_path.exists() {
        done.push(Scaffolded::Kept(config_path));
    } else {
        Config::default().save(&config_path)?;
        done.push(Scaffolded::Created(config_path));
    }

    let ignore = data.join(".gitignore");
    if !ignore.exists() {
        let state_file = Config::default().demo.state_path;
        let name = state_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state.json".to_string());
        std::fs::write(&ignore, format!("{name}\n"))
            .with_context(|| format!("Failed to write {}", ignore.display()))?;
        done.push(Scaffolded::Created(ignore));
    }

    Ok(done)
}

pub fn run(path: Option<String>) -> Result<()> {
    let base = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    for entry in scaffold(&base)? {
        match entry {
            Scaffolded::Created(p) => println!("  {} {}", "✓".green(), p.display()),
            Scaffolded::Kept(p) => println!("  {} {} (kept)", "•".yellow(), p.display()),
        }
    }
    println!(
        "{} Ready. Try {} then {}.",
        "✓".green().bold(),
        "resonance demo".cyan(),
        "resonance visualize".cyan()
    );
    Ok(())
}
