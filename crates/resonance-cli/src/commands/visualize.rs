//! Render the bond graph as text.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::load_hub;

pub fn run(state: Option<PathBuf>, threshold: f64) -> Result<()> {
    let (hub, _) = load_hub(state)?;
    print!("{}", hub.visualize(threshold));
    Ok(())
}
