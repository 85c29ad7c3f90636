use crate::error::{TrainingError, TrainingResult};
use crate::naming::DEFAULT_RUN_BASE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Pass-through options for the external toolchain, forwarded verbatim as
/// `key=value` pairs. Ordered so command lines are reproducible.
pub type ToolArgs = BTreeMap<String, String>;

/// One request for a versioned training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainJobSpec {
    /// Dataset descriptor handed to the trainer (e.g. a data.yaml path).
    pub data: PathBuf,
    /// Project grouping the model versions.
    pub project: String,
    /// Base model name; versions are derived as `{model}_v{N}`.
    pub model: String,
    /// Root under which the project tree lives.
    pub base_output: PathBuf,
    /// Base name for run folders (`train`, `train1`, ...).
    pub run_base: String,
    #[serde(default)]
    pub args: ToolArgs,
}

impl TrainJobSpec {
    #[must_use]
    pub fn new(data: PathBuf, project: &str, model: &str, base_output: PathBuf) -> Self {
        Self {
            data,
            project: project.to_string(),
            model: model.to_string(),
            base_output,
            run_base: DEFAULT_RUN_BASE.to_string(),
            args: ToolArgs::new(),
        }
    }

    pub fn validate(&self) -> TrainingResult<()> {
        if self.project.trim().is_empty() {
            return Err(TrainingError::InvalidSpec("project is required".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(TrainingError::InvalidSpec("model is required".to_string()));
        }
        if self.model.contains(['/', '\\']) {
            return Err(TrainingError::InvalidSpec(format!(
                "model must be a plain name, not a path: {}",
                self.model
            )));
        }
        if self.run_base.trim().is_empty() {
            return Err(TrainingError::InvalidSpec("run_base must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_validate_requires_names() {
        let spec = TrainJobSpec::new(PathBuf::from("data.yaml"), "", "", PathBuf::from("out"));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_spec_validate_rejects_path_like_model() {
        let mut spec =
            TrainJobSpec::new(PathBuf::from("data.yaml"), "proj", "a/b", PathBuf::from("out"));
        assert!(spec.validate().is_err());
        spec.model = "yolo".to_string();
        assert!(spec.validate().is_ok());
    }
}
