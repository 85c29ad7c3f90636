use crate::error::{DataError, DataResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// External upload service seam: registers a named datasource and pushes
/// the staged files to the remote repository.
pub trait DatasetRegistry: Send + Sync {
    fn create_datasource(&self, repo: &str, name: &str, local_path: &Path) -> DataResult<()>;

    fn upload_files(&self, repo: &str, local_path: &Path) -> DataResult<()>;
}

/// Flattens several source directories into one staging folder and hands
/// it to a `DatasetRegistry`.
#[derive(Debug)]
pub struct UploadStager {
    staging_dir: PathBuf,
}

impl UploadStager {
    #[must_use]
    pub fn new(staging_dir: PathBuf) -> Self {
        Self { staging_dir }
    }

    #[must_use]
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Copy the top-level contents of every source directory into the
    /// staging folder. Subdirectories are merged recursively and files
    /// overwrite silently. Every input must be a directory.
    pub fn stage(&self, dirs: &[PathBuf]) -> DataResult<()> {
        std::fs::create_dir_all(&self.staging_dir)?;

        for dir in dirs {
            if !dir.is_dir() {
                return Err(DataError::NotADirectory(dir.clone()));
            }
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                let src = entry.path();
                let dest = self.staging_dir.join(entry.file_name());
                if src.is_dir() {
                    copy_tree(&src, &dest)?;
                } else {
                    std::fs::copy(&src, &dest)?;
                }
            }
            tracing::debug!(dir = %dir.display(), "staged directory contents");
        }
        Ok(())
    }

    /// Register the staged folder as a datasource and upload it.
    pub fn upload(
        &self,
        registry: &dyn DatasetRegistry,
        repo: &str,
        datasource_name: &str,
    ) -> DataResult<()> {
        registry.create_datasource(repo, datasource_name, &self.staging_dir)?;
        registry.upload_files(repo, &self.staging_dir)?;
        tracing::info!(repo, datasource = datasource_name, "upload complete");
        Ok(())
    }
}

/// Recursive copy with merge semantics: existing destination directories
/// are reused, existing files overwritten.
fn copy_tree(src: &Path, dest: &Path) -> DataResult<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = match entry.path().strip_prefix(src) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
