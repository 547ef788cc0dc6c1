//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for directory comparisons.
///
/// The bar is shared across rayon workers; `ProgressBar` is internally
/// synchronized.
#[derive(Debug)]
pub struct ProgressReporter {
    pub files_pb: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter with a bar over `total` file pairs
    pub fn new_for_batch(total: u64) -> Self {
        Self {
            files_pb: Some(create_progress_bar(total, "Comparing job files")),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self { files_pb: None }
    }

    /// Record one finished file pair
    pub fn inc(&self, label: &str) {
        if let Some(pb) = &self.files_pb {
            pb.set_message(label.to_string());
            pb.inc(1);
        }
    }

    pub fn finish(&mut self, message: &str) {
        if let Some(pb) = self.files_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.files_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a progress bar with known total. Drawn on stderr so it never mixes
/// with a report written to stdout.
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
