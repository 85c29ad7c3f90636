use crate::artifacts::{self, TrainingManifest};
use crate::error::{TrainingError, TrainingResult};
use crate::job::TrainJobSpec;
use crate::layout::{self, VersionLayout};
use crate::naming;
use crate::registry::VersionIndex;
use crate::trainer::Trainer;
use std::path::PathBuf;

/// A training run that finished and was organized into the version layout.
#[derive(Debug)]
pub struct CompletedTraining {
    pub version: u32,
    pub versioned_name: String,
    pub model_dir: PathBuf,
    pub run_name: String,
    pub manifest: TrainingManifest,
}

/// Terminal state of one orchestrated training attempt.
///
/// Trainer failure is a value, not a propagated error: the caller can
/// branch on `FailedPreserved` without unwinding, and the preserved run
/// folder stays on disk for operator-driven resumption.
#[derive(Debug)]
pub enum TrainingOutcome {
    Done(CompletedTraining),
    FailedPreserved {
        versioned_name: String,
        preserved_run: PathBuf,
        error: TrainingError,
    },
}

/// Run one versioned training attempt.
///
/// Allocates the next model version, picks a fresh run folder name under
/// the version's `runs/` staging area, and hands off to the external
/// trainer. On success the run is finalized into the permanent artifact
/// layout and the staging area is removed. On trainer failure nothing is
/// cleaned up; the run folder is left untouched so the external trainer's
/// own checkpointing can resume from it. A preserved run is never reused
/// automatically: the next invocation allocates a new version and run name.
pub fn run_versioned_training(
    trainer: &dyn Trainer,
    spec: &TrainJobSpec,
) -> TrainingResult<TrainingOutcome> {
    spec.validate()?;

    let project_dir = layout::project_dir(&spec.base_output, &spec.project);
    let mut index = VersionIndex::load(&project_dir)?;
    let version = index.allocate(&spec.model)?;
    let layout = VersionLayout::new(&spec.base_output, &spec.project, &spec.model, version);

    let runs_dir = layout.runs_dir();
    std::fs::create_dir_all(&runs_dir)?;
    let run_name = naming::next_run_name(&runs_dir, &spec.run_base)?;

    tracing::info!(
        model = %layout.versioned_name(),
        run = %run_name,
        trainer = trainer.id(),
        "starting training run"
    );

    match trainer.train(&spec.data, &runs_dir, &run_name, &spec.args) {
        Ok(()) => {
            let manifest = artifacts::finalize_run(&layout, &run_name, trainer.id())?;
            tracing::info!(model = %layout.versioned_name(), "training artifacts finalized");
            Ok(TrainingOutcome::Done(CompletedTraining {
                version,
                versioned_name: layout.versioned_name().to_string(),
                model_dir: layout.model_dir().to_path_buf(),
                run_name,
                manifest,
            }))
        }
        Err(error) => {
            let preserved_run = runs_dir.join(&run_name);
            tracing::warn!(
                model = %layout.versioned_name(),
                run = %preserved_run.display(),
                %error,
                "trainer failed; run folder preserved for manual resumption"
            );
            Ok(TrainingOutcome::FailedPreserved {
                versioned_name: layout.versioned_name().to_string(),
                preserved_run,
                error,
            })
        }
    }
}
