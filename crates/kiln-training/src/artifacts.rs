use crate::error::{TrainingError, TrainingResult};
use crate::layout::VersionLayout;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Weights,
    Archive,
    Metric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub sha256: String,
}

/// Record of one finalized model version, written next to its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingManifest {
    pub versioned_name: String,
    pub created_at: DateTime<Utc>,
    pub trainer_id: String,
    pub run_name: String,
    pub artifacts: Vec<TrainingArtifact>,
}

pub fn sha256_file(path: &Path) -> TrainingResult<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

pub fn make_artifact(kind: ArtifactKind, path: PathBuf) -> TrainingResult<TrainingArtifact> {
    if !path.exists() {
        return Err(TrainingError::Artifact(format!(
            "artifact path does not exist: {}",
            path.display()
        )));
    }

    let hash = sha256_file(&path)?;
    Ok(TrainingArtifact { kind, path, sha256: hash })
}

/// Relocate a finished run's output into the permanent artifact layout.
///
/// Archives the whole run folder into `MODEL_UTILS/{name}.zip`, copies
/// `weights/best.pt` to `MODEL_WEIGHTS/{name}.pt` when present (absence is
/// not an error), copies `*.png`/`*.csv` files directly under the run
/// folder into `METRICS`, and writes the training manifest. The `runs/`
/// staging tree is removed last, only once everything else succeeded, so a
/// partial failure leaves the run on disk. Re-running over an existing
/// layout overwrites the archive and weights destinations.
pub fn finalize_run(
    layout: &VersionLayout,
    run_name: &str,
    trainer_id: &str,
) -> TrainingResult<TrainingManifest> {
    let run_dir = layout.runs_dir().join(run_name);
    if !run_dir.is_dir() {
        return Err(TrainingError::Artifact(format!(
            "run folder does not exist: {}",
            run_dir.display()
        )));
    }

    layout.ensure_artifact_dirs()?;

    let mut artifacts = Vec::new();

    archive_dir(&run_dir, &layout.archive_file())?;
    artifacts.push(make_artifact(ArtifactKind::Archive, layout.archive_file())?);

    let best = run_dir.join("weights").join("best.pt");
    if best.exists() {
        std::fs::copy(&best, layout.weights_file())?;
        artifacts.push(make_artifact(ArtifactKind::Weights, layout.weights_file())?);
    } else {
        tracing::warn!(run = %run_dir.display(), "run produced no weights/best.pt");
    }

    for entry in std::fs::read_dir(&run_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_metric_file(&path) {
            continue;
        }
        let dest = layout.metrics_dir().join(entry.file_name());
        std::fs::copy(&path, &dest)?;
        artifacts.push(make_artifact(ArtifactKind::Metric, dest)?);
    }

    let manifest = TrainingManifest {
        versioned_name: layout.versioned_name().to_string(),
        created_at: Utc::now(),
        trainer_id: trainer_id.to_string(),
        run_name: run_name.to_string(),
        artifacts,
    };
    std::fs::write(layout.manifest_path(), serde_json::to_vec_pretty(&manifest)?)?;

    // Staging cleanup happens last; everything above must already be safe.
    std::fs::remove_dir_all(layout.runs_dir())?;

    Ok(manifest)
}

fn is_metric_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("png" | "csv")
    )
}

/// Zip the whole `src` tree into `dest`, entry paths relative to `src`.
fn archive_dir(src: &Path, dest: &Path) -> TrainingResult<()> {
    let file = std::fs::File::create(dest)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = match entry.path().strip_prefix(src) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let name = rel.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut reader = std::fs::File::open(entry.path())?;
            std::io::copy(&mut reader, &mut zip)?;
        }
    }

    zip.finish()?.flush()?;
    Ok(())
}
