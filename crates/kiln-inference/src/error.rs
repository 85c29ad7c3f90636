use thiserror::Error;

pub type InferenceResult<T> = std::result::Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("predictor error: {0}")]
    Predictor(String),

    #[error(transparent)]
    Training(#[from] kiln_training::TrainingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
