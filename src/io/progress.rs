//! Progress display for single images and directory batches

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Shows a row-level bar for the current image plus a batch bar for directories
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    row_bar: Option<ProgressBar>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] rows {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            row_bar: None,
            file_count: 0,
        }
    }

    /// Prepare bars for the given number of images
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let row_bar = ProgressBar::new(0);
        row_bar.set_style(ROW_STYLE.clone());
        self.row_bar = Some(self.multi_progress.add(row_bar));
    }

    /// Number of images the manager was initialized for
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Reset the row bar for a new image
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.row_bar {
            let display_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_prefix(display_name);
            bar.set_length(0);
            bar.set_position(0);
        }
    }

    /// Report matched block rows for the current image
    pub fn update_rows(&self, completed: u32, total: u32) {
        if let Some(ref bar) = self.row_bar {
            bar.set_length(u64::from(total));
            bar.set_position(u64::from(completed));
        }
    }

    /// Mark the current image as done
    pub fn complete_file(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        if let Some(ref row_bar) = self.row_bar {
            row_bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
