//! Import pipeline - sequential batch jobs over static exports
//!
//! Every job follows the same pattern: load the export, build
//! existing-key sets and lookup maps from the database, filter, insert
//! in fixed-size batches inside transactions, and report what was
//! skipped at the end. Unmatched rows are collected, never retried.

pub mod backfill;
pub mod blocks;
pub mod catalog;
pub mod concordance;
pub mod graphemes;
pub mod legacy;
pub mod roboflow;

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::Result;

/// Outcome of one import run
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Records in the source file
    pub loaded: usize,
    /// Rows written to the database
    pub inserted: usize,
    /// Rows dropped (already present, or unresolvable)
    pub skipped: usize,
    pub elapsed: Duration,
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inserted {} of {} (skipped {}) in {}s",
            self.inserted,
            self.loaded,
            self.skipped,
            self.elapsed.as_secs()
        )
    }
}

/// Read and parse a JSON export file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
