//! Progress display for the batch imports
//!
//! One bar per import run, showing position, rate, and ETA - the same
//! numbers the import jobs have always logged between batch flushes.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ImportProgress {
    pb: ProgressBar,
}

impl ImportProgress {
    /// A bar over a known record count
    pub fn new(label: &str, total: usize) -> Self {
        let pb = if console::Term::stdout().is_term() {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:30}] {human_pos}/{human_len} ({percent}%) | {per_sec} | ~{eta} remaining",
            )
            .expect("valid template")
            .progress_chars("=> "),
        );
        pb.set_message(label.to_string());
        Self { pb }
    }

    /// Advance by one flushed batch
    pub fn inc(&self, count: usize) {
        self.pb.inc(count as u64);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        Self { pb }
    }

    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
