use std::path::PathBuf;
use thiserror::Error;

pub type DataResult<T> = std::result::Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("'{0}' is not a valid directory")]
    NotADirectory(PathBuf),

    #[error("registry error: {0}")]
    Registry(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
