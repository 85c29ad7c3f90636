//! End-to-end training lifecycle against a stub detector backend.

use kiln_training::{
    ToolArgs, TrainJobSpec, Trainer, TrainingOutcome, TrainingResult, run_versioned_training,
};
use std::path::Path;
use tempfile::TempDir;

struct FakeYolo;

impl Trainer for FakeYolo {
    fn id(&self) -> &'static str {
        "fake-yolo"
    }

    fn train(
        &self,
        _data: &Path,
        output_dir: &Path,
        run_name: &str,
        _args: &ToolArgs,
    ) -> TrainingResult<()> {
        let run_dir = output_dir.join(run_name);
        std::fs::create_dir_all(run_dir.join("weights"))?;
        std::fs::write(run_dir.join("weights").join("best.pt"), b"trained weights")?;
        std::fs::write(run_dir.join("weights").join("last.pt"), b"last epoch")?;
        std::fs::write(run_dir.join("results.csv"), b"epoch,mAP\n1,0.42\n")?;
        std::fs::write(run_dir.join("results.png"), b"plot")?;
        Ok(())
    }
}

#[test]
fn empty_project_trains_into_v1_tree() {
    let temp = TempDir::new().unwrap();
    let spec = TrainJobSpec::new(
        temp.path().join("data.yaml"),
        "wildlife",
        "model",
        temp.path().to_path_buf(),
    );

    let outcome = run_versioned_training(&FakeYolo, &spec).unwrap();
    let TrainingOutcome::Done(done) = outcome else {
        panic!("training should succeed");
    };

    let model_dir = temp.path().join("wildlife").join("model_v1");
    assert_eq!(done.model_dir, model_dir);
    assert!(model_dir.join("MODEL_WEIGHTS").join("model_v1.pt").is_file());
    assert!(model_dir.join("MODEL_UTILS").join("model_v1.zip").is_file());
    assert!(model_dir.join("METRICS").join("results.csv").is_file());
    assert!(model_dir.join("METRICS").join("results.png").is_file());
    assert!(!model_dir.join("runs").exists());

    // The archive holds the whole run tree, relative to the run folder.
    let file = std::fs::File::open(model_dir.join("MODEL_UTILS").join("model_v1.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("weights/best.pt").is_ok());

    // Weights are resolvable for inference afterwards.
    let weights =
        kiln_training::resolve_weights(temp.path(), "wildlife", "model", 1).unwrap();
    assert_eq!(weights, model_dir.join("MODEL_WEIGHTS").join("model_v1.pt"));
}

#[test]
fn versions_and_run_names_advance_independently() {
    let temp = TempDir::new().unwrap();
    let spec = TrainJobSpec::new(
        temp.path().join("data.yaml"),
        "wildlife",
        "model",
        temp.path().to_path_buf(),
    );

    for expected in ["model_v1", "model_v2", "model_v3"] {
        let outcome = run_versioned_training(&FakeYolo, &spec).unwrap();
        let TrainingOutcome::Done(done) = outcome else {
            panic!("training should succeed");
        };
        assert_eq!(done.versioned_name, expected);
        // Staging is fresh per version, so the bare run name is reused.
        assert_eq!(done.run_name, "train");
    }

    let versions =
        kiln_training::discover_versions(&temp.path().join("wildlife"), "model").unwrap();
    assert_eq!(versions, vec![1, 2, 3]);
}
