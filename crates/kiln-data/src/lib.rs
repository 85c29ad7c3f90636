//! Kiln Data
//!
//! Dataset folder utilities feeding the external data-versioning service:
//! merging per-split detection dataset trees and staging arbitrary
//! directories into one upload folder.

pub mod error;
pub mod merge;
pub mod stage;

pub use error::{DataError, DataResult};
pub use merge::{DATASET_KINDS, DATASET_SPLITS, merge_dataset_dirs};
pub use stage::{DatasetRegistry, UploadStager};
