//! Predict command implementation.

use crate::backends::YoloCli;
use colored::Colorize;
use kiln_inference::{InferenceOutcome, InferenceRequest, InferenceRunner, StdoutViewer};
use std::path::PathBuf;

/// Execute the predict command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    source: PathBuf,
    project: &str,
    model: &str,
    version: u32,
    save_dir: &str,
    output: PathBuf,
    no_save: bool,
    opts: &[String],
) -> anyhow::Result<()> {
    let request = InferenceRequest {
        source,
        project: project.to_string(),
        model: model.to_string(),
        version,
        data_saving_dir: save_dir.to_string(),
        base_output: output,
        save: if no_save { Some(false) } else { None },
        args: super::parse_tool_args(opts)?,
    };

    let predictor = YoloCli::new();
    let viewer = StdoutViewer;
    let runner = InferenceRunner::new(&predictor, &viewer);

    match runner.run(&request)? {
        InferenceOutcome::Displayed(path) => {
            println!("{}", format!("✓ Result displayed: {}", path.display()).green().bold());
        }
        InferenceOutcome::Saved(dir) => {
            println!("{}", format!("✓ Results saved to {}", dir.display()).green().bold());
        }
        InferenceOutcome::MissingOutput => {
            println!("{}", "Predicted output not found.".yellow());
        }
    }
    Ok(())
}
