//! Models command implementation.

use colored::Colorize;
use kiln_training::{discover_versions, project_dir, versioned_model_name};
use std::path::Path;

/// Execute the models command: list trained versions of a model.
pub fn execute(project: &str, model: &str, output: &Path) -> anyhow::Result<()> {
    let dir = project_dir(output, project);
    let versions = discover_versions(&dir, model)?;

    if versions.is_empty() {
        println!("{}", format!("No trained versions of '{}' in {}", model, dir.display()).yellow());
        return Ok(());
    }

    println!("{}", format!("Versions of '{}' in project '{}':", model, project).bold().cyan());
    for version in versions {
        let name = versioned_model_name(model, version);
        let weights = dir.join(&name).join("MODEL_WEIGHTS").join(format!("{name}.pt"));
        let marker = if weights.is_file() { "✓".green() } else { "✗".red() };
        println!("  {} {}", marker, name);
    }
    Ok(())
}
