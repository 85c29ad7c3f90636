//! Merge command implementation.

use colored::Colorize;
use kiln_data::merge_dataset_dirs;
use std::path::Path;

/// Execute the merge command: copy one dataset tree into another.
pub fn execute(src: &Path, dest: &Path) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Merging {} into {}...", src.display(), dest.display()).bold().cyan()
    );
    merge_dataset_dirs(src, dest)?;
    println!("{}", "✓ Dataset folders merged".green().bold());
    Ok(())
}
