//! Progress bar display for downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for one skill's file downloads.
/// Safe to update from the download worker threads.
pub struct DownloadProgress {
    file_pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress bar for a skill with the given file count
    pub fn new(skill_name: &str, total_files: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(style);
        file_pb.set_message(skill_name.to_string());
        Self { file_pb }
    }

    /// Record one finished file (downloaded or failed)
    pub fn file_done(&self, file_path: &str) {
        // Truncate long paths for display
        let display_path = if file_path.len() > 50 {
            format!("...{}", &file_path[file_path.len() - 47..])
        } else {
            file_path.to_string()
        };
        self.file_pb.set_message(display_path);
        self.file_pb.inc(1);
    }

    /// Finish the bar
    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }

    /// Abandon on error, leaving the bar visible
    pub fn abandon(&self) {
        self.file_pb.abandon();
    }
}
