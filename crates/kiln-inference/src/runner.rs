use crate::error::InferenceResult;
use crate::predictor::{PredictOptions, Predictor};
use crate::viewer::ResultViewer;
use kiln_training::{ToolArgs, VersionLayout, registry};
use std::path::{Path, PathBuf};

/// One inference invocation against a versioned model.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    /// Input image, video, or directory.
    pub source: PathBuf,
    pub project: String,
    pub model: String,
    pub version: u32,
    /// Subdirectory name under `INFERENCE/` for batch outputs.
    pub data_saving_dir: String,
    pub base_output: PathBuf,
    /// Persistence override for batch inputs; single files always persist.
    pub save: Option<bool>,
    pub args: ToolArgs,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// Single input: the annotated result was shown, scratch cleaned up.
    Displayed(PathBuf),
    /// Batch input: results persisted under the versioned `INFERENCE/` tree.
    Saved(PathBuf),
    /// Single input: the predictor left no output to show. Not an error.
    MissingOutput,
}

pub struct InferenceRunner<'a> {
    predictor: &'a dyn Predictor,
    viewer: &'a dyn ResultViewer,
}

impl<'a> InferenceRunner<'a> {
    #[must_use]
    pub fn new(predictor: &'a dyn Predictor, viewer: &'a dyn ResultViewer) -> Self {
        Self { predictor, viewer }
    }

    /// Resolve the versioned weights and run prediction.
    ///
    /// Missing weights are a hard precondition failure. Single-file inputs
    /// force persistence on, show the annotated output through the viewer,
    /// and delete the predictor's scratch directory afterwards; a missing
    /// output only warns. Directory inputs persist (unless explicitly
    /// disabled) into `{model_dir}/INFERENCE/{data_saving_dir}` with no
    /// display and no cleanup.
    pub fn run(&self, request: &InferenceRequest) -> InferenceResult<InferenceOutcome> {
        let weights = registry::resolve_weights(
            &request.base_output,
            &request.project,
            &request.model,
            request.version,
        )?;

        if request.source.is_file() {
            self.run_single(request, weights)
        } else {
            self.run_batch(request, weights)
        }
    }

    fn run_single(
        &self,
        request: &InferenceRequest,
        weights: PathBuf,
    ) -> InferenceResult<InferenceOutcome> {
        let options = PredictOptions {
            weights,
            save: true,
            project: None,
            name: None,
            exist_ok: false,
            args: request.args.clone(),
        };
        self.predictor.predict(&request.source, &options)?;

        let scratch = self.predictor.scratch_root();
        let Some(latest) = latest_predict_dir(&scratch)? else {
            tracing::warn!(root = %scratch.display(), "no prediction output found");
            return Ok(InferenceOutcome::MissingOutput);
        };

        let Some(file_name) = request.source.file_name() else {
            tracing::warn!(source = %request.source.display(), "source has no file name");
            return Ok(InferenceOutcome::MissingOutput);
        };
        let predicted = latest.join(file_name);
        if !predicted.exists() {
            tracing::warn!(path = %predicted.display(), "predicted image not found");
            return Ok(InferenceOutcome::MissingOutput);
        }

        self.viewer.show(&predicted);
        // Scratch output is throwaway once shown.
        std::fs::remove_dir_all(&latest)?;
        Ok(InferenceOutcome::Displayed(predicted))
    }

    fn run_batch(
        &self,
        request: &InferenceRequest,
        weights: PathBuf,
    ) -> InferenceResult<InferenceOutcome> {
        let layout = VersionLayout::new(
            &request.base_output,
            &request.project,
            &request.model,
            request.version,
        );
        let output_dir = layout.inference_dir(&request.data_saving_dir);
        std::fs::create_dir_all(&output_dir)?;

        let options = PredictOptions {
            weights,
            save: request.save.unwrap_or(true),
            project: Some(layout.model_dir().to_path_buf()),
            name: Some(format!("INFERENCE/{}", request.data_saving_dir)),
            exist_ok: true,
            args: request.args.clone(),
        };
        self.predictor.predict(&request.source, &options)?;

        Ok(InferenceOutcome::Saved(output_dir))
    }
}

/// Most-recently-modified `predict*` directory under `root`, if any.
fn latest_predict_dir(root: &Path) -> InferenceResult<Option<PathBuf>> {
    let read = match std::fs::read_dir(root) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in read {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with("predict") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if latest.as_ref().is_none_or(|(t, _)| modified >= *t) {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::ResultViewer;
    use kiln_training::TrainingError;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Predictor that mimics the external tool's output layout.
    struct FakePredictor {
        scratch: PathBuf,
        calls: Mutex<Vec<PredictOptions>>,
    }

    impl FakePredictor {
        fn new(scratch: PathBuf) -> Self {
            Self { scratch, calls: Mutex::new(Vec::new()) }
        }
    }

    impl Predictor for FakePredictor {
        fn id(&self) -> &'static str {
            "fake"
        }

        fn predict(&self, source: &Path, options: &PredictOptions) -> InferenceResult<()> {
            self.calls.lock().unwrap().push(options.clone());
            if options.project.is_none() && options.save {
                // Unrouted single prediction lands in scratch/predict.
                let out = self.scratch.join("predict");
                std::fs::create_dir_all(&out)?;
                if let Some(name) = source.file_name() {
                    std::fs::write(out.join(name), b"annotated")?;
                }
            }
            Ok(())
        }

        fn scratch_root(&self) -> PathBuf {
            self.scratch.clone()
        }
    }

    #[derive(Default)]
    struct RecordingViewer {
        shown: Mutex<Vec<PathBuf>>,
    }

    impl ResultViewer for RecordingViewer {
        fn show(&self, image: &Path) {
            self.shown.lock().unwrap().push(image.to_path_buf());
        }
    }

    fn seed_weights(base: &Path) {
        let layout = VersionLayout::new(base, "proj", "model", 1);
        std::fs::create_dir_all(layout.model_weights_dir()).unwrap();
        std::fs::write(layout.weights_file(), b"weights").unwrap();
    }

    fn request(base: &Path, source: PathBuf) -> InferenceRequest {
        InferenceRequest {
            source,
            project: "proj".to_string(),
            model: "model".to_string(),
            version: 1,
            data_saving_dir: "batch-1".to_string(),
            base_output: base.to_path_buf(),
            save: None,
            args: ToolArgs::new(),
        }
    }

    #[test]
    fn test_missing_weights_is_fatal() {
        let temp = TempDir::new().unwrap();
        let predictor = FakePredictor::new(temp.path().join("scratch"));
        let viewer = RecordingViewer::default();
        let runner = InferenceRunner::new(&predictor, &viewer);

        let err = runner.run(&request(temp.path(), temp.path().join("img.jpg"))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::InferenceError::Training(TrainingError::WeightsNotFound(_))
        ));
        assert!(predictor.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_file_displays_and_cleans_scratch() {
        let temp = TempDir::new().unwrap();
        seed_weights(temp.path());
        let source = temp.path().join("img.jpg");
        std::fs::write(&source, b"jpg").unwrap();

        let predictor = FakePredictor::new(temp.path().join("scratch"));
        let viewer = RecordingViewer::default();
        let runner = InferenceRunner::new(&predictor, &viewer);

        let outcome = runner.run(&request(temp.path(), source)).unwrap();
        let InferenceOutcome::Displayed(shown) = outcome else {
            panic!("expected display outcome");
        };
        assert!(shown.ends_with("predict/img.jpg"));
        assert_eq!(viewer.shown.lock().unwrap().len(), 1);
        // Scratch directory removed after display.
        assert!(!temp.path().join("scratch").join("predict").exists());
        // Persistence is forced on for single inputs.
        assert!(predictor.calls.lock().unwrap()[0].save);
    }

    #[test]
    fn test_single_file_missing_output_warns_only() {
        let temp = TempDir::new().unwrap();
        seed_weights(temp.path());
        let source = temp.path().join("img.jpg");
        std::fs::write(&source, b"jpg").unwrap();

        // Predictor whose scratch stays empty.
        struct SilentPredictor {
            scratch: PathBuf,
        }
        impl Predictor for SilentPredictor {
            fn id(&self) -> &'static str {
                "silent"
            }
            fn predict(&self, _source: &Path, _options: &PredictOptions) -> InferenceResult<()> {
                Ok(())
            }
            fn scratch_root(&self) -> PathBuf {
                self.scratch.clone()
            }
        }

        let predictor = SilentPredictor { scratch: temp.path().join("scratch") };
        let viewer = RecordingViewer::default();
        let runner = InferenceRunner::new(&predictor, &viewer);

        let outcome = runner.run(&request(temp.path(), source)).unwrap();
        assert_eq!(outcome, InferenceOutcome::MissingOutput);
        assert!(viewer.shown.lock().unwrap().is_empty());
    }

    #[test]
    fn test_batch_routes_into_versioned_inference_dir() {
        let temp = TempDir::new().unwrap();
        seed_weights(temp.path());
        let source_dir = temp.path().join("images");
        std::fs::create_dir_all(&source_dir).unwrap();

        let predictor = FakePredictor::new(temp.path().join("scratch"));
        let viewer = RecordingViewer::default();
        let runner = InferenceRunner::new(&predictor, &viewer);

        let outcome = runner.run(&request(temp.path(), source_dir)).unwrap();
        let expected = temp
            .path()
            .join("proj")
            .join("model_v1")
            .join("INFERENCE")
            .join("batch-1");
        assert_eq!(outcome, InferenceOutcome::Saved(expected.clone()));
        assert!(expected.is_dir());

        let calls = predictor.calls.lock().unwrap();
        assert!(calls[0].save);
        assert!(calls[0].exist_ok);
        assert_eq!(calls[0].name.as_deref(), Some("INFERENCE/batch-1"));
        assert!(viewer.shown.lock().unwrap().is_empty());
    }

    #[test]
    fn test_batch_save_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        seed_weights(temp.path());
        let source_dir = temp.path().join("images");
        std::fs::create_dir_all(&source_dir).unwrap();

        let predictor = FakePredictor::new(temp.path().join("scratch"));
        let viewer = RecordingViewer::default();
        let runner = InferenceRunner::new(&predictor, &viewer);

        let mut req = request(temp.path(), source_dir);
        req.save = Some(false);
        runner.run(&req).unwrap();

        assert!(!predictor.calls.lock().unwrap()[0].save);
    }

    #[test]
    fn test_latest_predict_dir_prefers_most_recent() {
        let temp = TempDir::new().unwrap();
        let old = temp.path().join("predict");
        let new = temp.path().join("predict2");
        std::fs::create_dir_all(&old).unwrap();
        std::fs::create_dir_all(&new).unwrap();
        // Nudge mtimes apart without sleeping.
        let past = std::time::SystemTime::now() - std::time::Duration::from_secs(60);
        let file = std::fs::File::open(&old).unwrap();
        file.set_modified(past).unwrap();

        let latest = latest_predict_dir(temp.path()).unwrap();
        assert_eq!(latest, Some(new));
    }
}
