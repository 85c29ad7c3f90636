use crate::error::DataResult;
use std::path::Path;

/// Dataset split names in the fixed detection layout.
pub const DATASET_SPLITS: [&str; 3] = ["train", "valid", "test"];
/// Per-split content kinds.
pub const DATASET_KINDS: [&str; 2] = ["images", "labels"];

/// Merge a per-split dataset tree into another.
///
/// For each of `{train,valid,test} x {images,labels}` the destination
/// directory is created and every file from the source is copied over.
/// Same-named destination files are overwritten silently; a missing source
/// split propagates as an I/O error.
pub fn merge_dataset_dirs(src_dir: &Path, dest_dir: &Path) -> DataResult<()> {
    for split in DATASET_SPLITS {
        for kind in DATASET_KINDS {
            let src = src_dir.join(split).join(kind);
            let dest = dest_dir.join(split).join(kind);
            std::fs::create_dir_all(&dest)?;

            for entry in std::fs::read_dir(&src)? {
                let entry = entry?;
                std::fs::copy(entry.path(), dest.join(entry.file_name()))?;
            }
            tracing::debug!(split, kind, "merged dataset folder");
        }
    }
    Ok(())
}
