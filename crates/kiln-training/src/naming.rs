use crate::error::TrainingResult;
use std::path::Path;

/// Base name for training run folders when the caller does not pick one.
pub const DEFAULT_RUN_BASE: &str = "train";

/// Next free version number for `model_name` under `project_dir`.
///
/// Scans directory entries named `{model_name}_v{N}` and returns `max(N) + 1`,
/// or `1` when the directory is absent or nothing matches. Entries whose
/// suffix is not an integer are ignored. Not safe for concurrent callers;
/// version allocation is single-writer (see `registry::VersionIndex`).
pub fn next_version(project_dir: &Path, model_name: &str) -> TrainingResult<u32> {
    let prefix = format!("{model_name}_v");
    let mut max = 0u32;
    for name in list_entry_names(project_dir)? {
        if let Some(rest) = name.strip_prefix(&prefix) {
            if let Ok(n) = rest.parse::<u32>() {
                max = max.max(n);
            }
        }
    }
    Ok(max + 1)
}

/// Next free run folder name under `runs_dir`.
///
/// Entries starting with `base_name` are considered; a fully numeric suffix
/// counts as its value and anything else (including the bare name) counts
/// as index 0. With no matching entries the bare `base_name` is returned;
/// otherwise `{base_name}{max + 1}`. Once any matching entry exists the
/// bare name is never handed out again.
pub fn next_run_name(runs_dir: &Path, base_name: &str) -> TrainingResult<String> {
    let mut max: Option<u64> = None;
    for name in list_entry_names(runs_dir)? {
        if let Some(rest) = name.strip_prefix(base_name) {
            let idx = rest.parse::<u64>().unwrap_or(0);
            max = Some(max.map_or(idx, |m| m.max(idx)));
        }
    }
    Ok(match max {
        None => base_name.to_string(),
        Some(m) => format!("{base_name}{}", m + 1),
    })
}

/// Entry names of `dir`; a missing directory reads as empty.
fn list_entry_names(dir: &Path) -> TrainingResult<Vec<String>> {
    let read = match std::fs::read_dir(dir) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in read {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
