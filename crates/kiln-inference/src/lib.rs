//! Kiln Inference
//!
//! Runs an external detector against a versioned model's weights. Single
//! inputs are routed through the predictor's scratch output for interactive
//! display; directory inputs land in the version's `INFERENCE/` tree.

pub mod error;
pub mod predictor;
pub mod runner;
pub mod viewer;

pub use error::{InferenceError, InferenceResult};
pub use predictor::{PredictOptions, Predictor};
pub use runner::{InferenceOutcome, InferenceRequest, InferenceRunner};
pub use viewer::{ResultViewer, StdoutViewer};
