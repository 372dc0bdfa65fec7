//! Progress bar for registering many libraries

use indicatif::{ProgressBar, ProgressStyle};

/// One tick per library registered into KiCad's tables
pub struct RegistrationProgress {
    bar: ProgressBar,
}

impl RegistrationProgress {
    pub fn new(total_libraries: u64) -> Self {
        let bar = ProgressBar::new(total_libraries);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    /// Show the library being registered
    pub fn start(&self, library: &str) {
        self.bar.set_message(library.to_string());
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Remove the bar so summary lines print cleanly
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
