use crate::error::TrainingResult;
use crate::job::ToolArgs;
use std::path::Path;

/// External training backend.
///
/// A successful run must leave `output_dir/run_name/weights/best.pt` on
/// disk, optionally alongside `*.png`/`*.csv` metric files directly under
/// the run folder. The call blocks for the full duration of training.
pub trait Trainer: Send + Sync {
    fn id(&self) -> &'static str;

    fn train(
        &self,
        data: &Path,
        output_dir: &Path,
        run_name: &str,
        args: &ToolArgs,
    ) -> TrainingResult<()>;
}
