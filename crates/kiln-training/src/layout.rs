use crate::error::TrainingResult;
use std::path::{Path, PathBuf};

/// Canonical name of a `(model, version)` pair, e.g. `yolo_v3`.
#[must_use]
pub fn versioned_model_name(model: &str, version: u32) -> String {
    format!("{model}_v{version}")
}

/// Directory holding every version of a project's models.
#[must_use]
pub fn project_dir(base_output: &Path, project: &str) -> PathBuf {
    base_output.join(project)
}

/// Filesystem layout for one model version.
///
/// The directory contract is fixed and must stay bit-exact for downstream
/// consumers:
///
/// `{base}/{project}/{model}_v{N}/{runs|MODEL_UTILS|MODEL_WEIGHTS|METRICS|INFERENCE}`
///
/// `runs/` is a transient staging area; the other directories are permanent
/// once created.
#[derive(Debug, Clone)]
pub struct VersionLayout {
    model_dir: PathBuf,
    versioned_name: String,
}

impl VersionLayout {
    #[must_use]
    pub fn new(base_output: &Path, project: &str, model: &str, version: u32) -> Self {
        let versioned_name = versioned_model_name(model, version);
        let model_dir = project_dir(base_output, project).join(&versioned_name);
        Self { model_dir, versioned_name }
    }

    #[must_use]
    pub fn versioned_name(&self) -> &str {
        &self.versioned_name
    }

    #[must_use]
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Transient staging area for training runs.
    #[must_use]
    pub fn runs_dir(&self) -> PathBuf {
        self.model_dir.join("runs")
    }

    #[must_use]
    pub fn model_utils_dir(&self) -> PathBuf {
        self.model_dir.join("MODEL_UTILS")
    }

    #[must_use]
    pub fn model_weights_dir(&self) -> PathBuf {
        self.model_dir.join("MODEL_WEIGHTS")
    }

    #[must_use]
    pub fn metrics_dir(&self) -> PathBuf {
        self.model_dir.join("METRICS")
    }

    /// Final weights file, `MODEL_WEIGHTS/{model}_v{N}.pt`.
    #[must_use]
    pub fn weights_file(&self) -> PathBuf {
        self.model_weights_dir().join(format!("{}.pt", self.versioned_name))
    }

    /// Full-run archive, `MODEL_UTILS/{model}_v{N}.zip`.
    #[must_use]
    pub fn archive_file(&self) -> PathBuf {
        self.model_utils_dir().join(format!("{}.zip", self.versioned_name))
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.model_dir.join("training_manifest.json")
    }

    /// Routed output directory for batch inference, `INFERENCE/{sub}`.
    #[must_use]
    pub fn inference_dir(&self, sub: &str) -> PathBuf {
        self.model_dir.join("INFERENCE").join(sub)
    }

    /// Create the three permanent artifact directories. Idempotent.
    pub fn ensure_artifact_dirs(&self) -> TrainingResult<()> {
        std::fs::create_dir_all(self.model_utils_dir())?;
        std::fs::create_dir_all(self.model_weights_dir())?;
        std::fs::create_dir_all(self.metrics_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let temp = TempDir::new().unwrap();
        let layout = VersionLayout::new(temp.path(), "proj", "yolo", 2);

        assert_eq!(layout.versioned_name(), "yolo_v2");
        assert_eq!(layout.model_dir(), temp.path().join("proj").join("yolo_v2"));
        assert!(layout.weights_file().ends_with("MODEL_WEIGHTS/yolo_v2.pt"));
        assert!(layout.archive_file().ends_with("MODEL_UTILS/yolo_v2.zip"));
        assert!(layout.inference_dir("batch-1").ends_with("INFERENCE/batch-1"));
    }

    #[test]
    fn test_ensure_artifact_dirs_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let layout = VersionLayout::new(temp.path(), "proj", "yolo", 1);

        layout.ensure_artifact_dirs().unwrap();
        layout.ensure_artifact_dirs().unwrap();

        assert!(layout.model_utils_dir().is_dir());
        assert!(layout.model_weights_dir().is_dir());
        assert!(layout.metrics_dir().is_dir());
    }
}
