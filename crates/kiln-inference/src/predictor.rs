use crate::error::InferenceResult;
use kiln_training::ToolArgs;
use std::path::{Path, PathBuf};

/// Routing options handed to the external predictor.
#[derive(Debug, Clone)]
pub struct PredictOptions {
    /// Resolved weights of the versioned model.
    pub weights: PathBuf,
    /// Whether the predictor should persist annotated outputs.
    pub save: bool,
    /// Output root override; `None` leaves the predictor's default.
    pub project: Option<PathBuf>,
    /// Run name relative to `project`.
    pub name: Option<String>,
    /// Reuse an existing output directory instead of suffixing a new one.
    pub exist_ok: bool,
    /// Extra pass-through options, forwarded verbatim.
    pub args: ToolArgs,
}

/// External prediction backend.
///
/// When no output routing is given, persisted results land under the
/// backend's task-specific scratch root in a `predict*` subdirectory.
pub trait Predictor: Send + Sync {
    fn id(&self) -> &'static str;

    fn predict(&self, source: &Path, options: &PredictOptions) -> InferenceResult<()>;

    /// Default output root for unrouted predictions.
    fn scratch_root(&self) -> PathBuf {
        PathBuf::from("runs").join("detect")
    }
}
