//! Subprocess adapters for the external toolchain.
//!
//! The detector backend shells out to the ultralytics `yolo` CLI and the
//! upload backend to the `dagshub` CLI. Both block until the child exits
//! and map a non-zero status to the corresponding error variant.

use kiln_data::{DataError, DataResult, DatasetRegistry};
use kiln_inference::{InferenceError, InferenceResult, PredictOptions, Predictor};
use kiln_training::{ToolArgs, Trainer, TrainingError, TrainingResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Detector backend invoking the `yolo` command-line tool.
#[derive(Debug, Clone)]
pub struct YoloCli {
    program: String,
    task: String,
}

impl YoloCli {
    #[must_use]
    pub fn new() -> Self {
        Self { program: "yolo".to_string(), task: "detect".to_string() }
    }

    fn command(&self, mode: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.task).arg(mode);
        cmd
    }

    fn run(&self, mut cmd: Command) -> std::io::Result<std::process::ExitStatus> {
        tracing::debug!(command = ?cmd, "invoking external toolchain");
        cmd.status()
    }
}

impl Default for YoloCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Trainer for YoloCli {
    fn id(&self) -> &'static str {
        "yolo-cli"
    }

    fn train(
        &self,
        data: &Path,
        output_dir: &Path,
        run_name: &str,
        args: &ToolArgs,
    ) -> TrainingResult<()> {
        let mut cmd = self.command("train");
        cmd.arg(format!("data={}", data.display()))
            .arg(format!("project={}", output_dir.display()))
            .arg(format!("name={run_name}"));
        for (key, value) in args {
            cmd.arg(format!("{key}={value}"));
        }

        let status = self
            .run(cmd)
            .map_err(|e| TrainingError::Trainer(format!("failed to launch {}: {e}", self.program)))?;
        if !status.success() {
            return Err(TrainingError::Trainer(format!("{} exited with {status}", self.program)));
        }
        Ok(())
    }
}

impl Predictor for YoloCli {
    fn id(&self) -> &'static str {
        "yolo-cli"
    }

    fn predict(&self, source: &Path, options: &PredictOptions) -> InferenceResult<()> {
        let mut cmd = self.command("predict");
        cmd.arg(format!("model={}", options.weights.display()))
            .arg(format!("source={}", source.display()))
            .arg(format!("save={}", options.save));
        if let Some(project) = &options.project {
            cmd.arg(format!("project={}", project.display()));
        }
        if let Some(name) = &options.name {
            cmd.arg(format!("name={name}"));
        }
        if options.exist_ok {
            cmd.arg("exist_ok=True");
        }
        for (key, value) in &options.args {
            cmd.arg(format!("{key}={value}"));
        }

        let status = self
            .run(cmd)
            .map_err(|e| InferenceError::Predictor(format!("failed to launch {}: {e}", self.program)))?;
        if !status.success() {
            return Err(InferenceError::Predictor(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }

    fn scratch_root(&self) -> PathBuf {
        PathBuf::from("runs").join(&self.task)
    }
}

/// Upload backend invoking the `dagshub` command-line tool.
#[derive(Debug, Clone)]
pub struct DagshubCli {
    program: String,
}

impl DagshubCli {
    #[must_use]
    pub fn new() -> Self {
        Self { program: "dagshub".to_string() }
    }

    fn run(&self, args: &[&str]) -> DataResult<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        tracing::debug!(command = ?cmd, "invoking upload service");
        let status = cmd
            .status()
            .map_err(|e| DataError::Registry(format!("failed to launch {}: {e}", self.program)))?;
        if !status.success() {
            return Err(DataError::Registry(format!("{} exited with {status}", self.program)));
        }
        Ok(())
    }
}

impl Default for DagshubCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetRegistry for DagshubCli {
    fn create_datasource(&self, repo: &str, name: &str, local_path: &Path) -> DataResult<()> {
        self.run(&["datasource", "create", "path", repo, name, &local_path.to_string_lossy()])
    }

    fn upload_files(&self, repo: &str, local_path: &Path) -> DataResult<()> {
        let path = local_path.to_string_lossy();
        self.run(&["upload", repo, &path, &path])
    }
}
