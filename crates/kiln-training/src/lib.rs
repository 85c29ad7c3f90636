//! Kiln Training
//!
//! Versioned training lifecycle for an external detector toolchain:
//! - Naming conventions for model versions and runs (`naming`)
//! - The on-disk artifact layout (`VersionLayout`)
//! - Finalizing a finished run into archived artifacts (`artifacts`)
//! - The versioned training orchestrator (`run_versioned_training`)
//! - Resolving trained weights and the per-project version index (`registry`)

pub mod artifacts;
pub mod error;
pub mod job;
pub mod layout;
pub mod naming;
pub mod orchestrator;
pub mod registry;
pub mod trainer;

pub use artifacts::{ArtifactKind, TrainingArtifact, TrainingManifest, finalize_run, sha256_file};
pub use error::{TrainingError, TrainingResult};
pub use job::{ToolArgs, TrainJobSpec};
pub use layout::{VersionLayout, project_dir, versioned_model_name};
pub use naming::{DEFAULT_RUN_BASE, next_run_name, next_version};
pub use orchestrator::{CompletedTraining, TrainingOutcome, run_versioned_training};
pub use registry::{VersionIndex, discover_versions, resolve_weights};
pub use trainer::Trainer;
