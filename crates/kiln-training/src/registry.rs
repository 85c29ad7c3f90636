use crate::error::{TrainingError, TrainingResult};
use crate::layout::VersionLayout;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const VERSION_INDEX_FILE: &str = "versions.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    #[serde(default)]
    models: BTreeMap<String, u32>,
}

/// Explicit per-project version counter, persisted as `versions.json`
/// inside the project directory.
///
/// Allocation reconciles the recorded counter against a directory scan, so
/// trees created before the index existed (or edited by hand) keep their
/// numbering and the externally observable `{model}_v{N}` scheme is
/// unchanged. Single-writer: concurrent allocations against the same
/// project race on both the scan and the index file.
#[derive(Debug)]
pub struct VersionIndex {
    project_dir: PathBuf,
    path: PathBuf,
    index: IndexFile,
}

impl VersionIndex {
    pub fn load(project_dir: &Path) -> TrainingResult<Self> {
        let path = project_dir.join(VERSION_INDEX_FILE);
        let index = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<IndexFile>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => IndexFile::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { project_dir: project_dir.to_path_buf(), path, index })
    }

    /// Last version this index handed out for `model`, if any.
    #[must_use]
    pub fn recorded(&self, model: &str) -> Option<u32> {
        self.index.models.get(model).copied()
    }

    /// Allocate the next version for `model` and persist the record.
    pub fn allocate(&mut self, model: &str) -> TrainingResult<u32> {
        let scanned = naming::next_version(&self.project_dir, model)?;
        let recorded = self.recorded(model).map_or(1, |v| v + 1);
        let next = scanned.max(recorded);

        self.index.models.insert(model.to_string(), next);
        self.save()?;
        Ok(next)
    }

    fn save(&self) -> TrainingResult<()> {
        std::fs::create_dir_all(&self.project_dir)?;
        std::fs::write(&self.path, serde_json::to_vec_pretty(&self.index)?)?;
        Ok(())
    }
}

/// Deterministic path of a trained model's weights.
///
/// Hard precondition check: returns `WeightsNotFound` when the file is
/// absent, with no retry or fallback.
pub fn resolve_weights(
    base_output: &Path,
    project: &str,
    model: &str,
    version: u32,
) -> TrainingResult<PathBuf> {
    let layout = VersionLayout::new(base_output, project, model, version);
    let path = layout.weights_file();
    if !path.exists() {
        return Err(TrainingError::WeightsNotFound(path));
    }
    Ok(path)
}

/// Existing versions of `model` under `project_dir`, from directory names,
/// ascending.
pub fn discover_versions(project_dir: &Path, model: &str) -> TrainingResult<Vec<u32>> {
    let prefix = format!("{model}_v");
    let mut versions = Vec::new();

    let read = match std::fs::read_dir(project_dir) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(versions),
        Err(e) => return Err(e.into()),
    };

    for entry in read {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(rest) = name.strip_prefix(&prefix) {
            if let Ok(n) = rest.parse::<u32>() {
                versions.push(n);
            }
        }
    }

    versions.sort_unstable();
    Ok(versions)
}
