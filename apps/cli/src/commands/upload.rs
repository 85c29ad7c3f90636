//! Upload command implementation.

use crate::backends::DagshubCli;
use colored::Colorize;
use kiln_data::UploadStager;
use std::path::PathBuf;

/// Execute the upload command: stage source directories into one folder
/// and push it to the remote data registry.
pub fn execute(
    dirs: &[PathBuf],
    repo: &str,
    datasource: &str,
    staging: PathBuf,
) -> anyhow::Result<()> {
    let stager = UploadStager::new(staging);

    println!("{}", format!("Staging {} directories...", dirs.len()).bold().cyan());
    stager.stage(dirs)?;

    let registry = DagshubCli::new();
    stager.upload(&registry, repo, datasource)?;

    println!(
        "{}",
        format!("✓ Upload to {} complete from {}", repo, stager.staging_dir().display())
            .green()
            .bold()
    );
    Ok(())
}
