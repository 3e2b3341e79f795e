//! `inspect` subcommand: show a saved model artifact

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::load_model;
use crate::report::display_artifact;

/// Load the artifact at `model` and print it.
pub fn run_inspect(model: &Path) -> Result<()> {
    let artifact = load_model(model)
        .with_context(|| format!("Failed to inspect model: {}", model.display()))?;
    display_artifact(&artifact);
    println!();
    Ok(())
}
