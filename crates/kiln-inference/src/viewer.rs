use std::path::Path;

/// Seam for presenting a predicted image to the operator.
pub trait ResultViewer: Send + Sync {
    fn show(&self, image: &Path);
}

/// Prints the predicted image path instead of opening it.
#[derive(Debug, Default)]
pub struct StdoutViewer;

impl ResultViewer for StdoutViewer {
    fn show(&self, image: &Path) {
        println!("[predict] annotated result: {}", image.display());
    }
}
