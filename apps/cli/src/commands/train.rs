//! Train command implementation.

use crate::backends::YoloCli;
use colored::Colorize;
use kiln_training::{TrainJobSpec, TrainingOutcome, run_versioned_training};
use std::path::PathBuf;

/// Execute the train command.
///
/// Runs one versioned training attempt and reports where the artifacts
/// (or the preserved failed run) ended up.
pub fn execute(
    data: PathBuf,
    project: &str,
    model: &str,
    output: PathBuf,
    opts: &[String],
) -> anyhow::Result<()> {
    let mut spec = TrainJobSpec::new(data, project, model, output);
    spec.args = super::parse_tool_args(opts)?;

    println!("{}", format!("Training {} in project {}...", model, project).bold().cyan());

    let trainer = YoloCli::new();
    match run_versioned_training(&trainer, &spec)? {
        TrainingOutcome::Done(done) => {
            println!();
            println!(
                "{}",
                format!("✓ {} trained (run '{}')", done.versioned_name, done.run_name)
                    .green()
                    .bold()
            );
            println!("  artifacts: {}", done.model_dir.display());
            for artifact in &done.manifest.artifacts {
                println!("  - {}", artifact.path.display());
            }
            Ok(())
        }
        TrainingOutcome::FailedPreserved { versioned_name, preserved_run, error } => {
            println!();
            println!("{}", format!("✗ {} training failed: {}", versioned_name, error).red().bold());
            println!(
                "  run folder preserved for manual resumption: {}",
                preserved_run.display()
            );
            anyhow::bail!("training failed; run folder preserved")
        }
    }
}
