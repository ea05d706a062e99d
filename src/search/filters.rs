//! Search filter state - the toggles, dropdowns, and text inputs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Results per page across all view modes
pub const DEFAULT_PAGE_SIZE: usize = 48;

/// Which entity the search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Signs,
    Blocks,
    Graphemes,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "signs" | "sign" => Ok(ViewMode::Signs),
            "blocks" | "block" => Ok(ViewMode::Blocks),
            "graphemes" | "grapheme" => Ok(ViewMode::Graphemes),
            _ => Err(format!("Unknown view mode: {}", s)),
        }
    }
}

/// Sort order for the signs view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// By display code, then id (the catalog's natural order)
    #[default]
    Code,
    /// By corpus occurrence count, descending
    Frequency,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "code" => Ok(SortBy::Code),
            "frequency" => Ok(SortBy::Frequency),
            _ => Err(format!("Unknown sort: {}", s)),
        }
    }
}

/// The full filter state for one search.
///
/// Dropdowns are `None` when set to "all"; text inputs are empty when
/// inactive. Each view mode reads the subset that applies to it.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Free-text query, LIKE-matched across the mode's code/value columns
    pub query: String,

    // Toggles
    pub has_image: bool,
    pub has_roboflow: bool,
    pub has_date: bool,

    // Dropdowns
    pub volume: Option<String>,
    pub word_class: Option<String>,
    pub technique: Option<String>,
    pub distribution: Option<String>,
    pub region: Option<String>,

    // Text inputs
    pub artifact: String,
    pub site: String,

    pub sort: SortBy,
}

impl SearchFilters {
    /// Number of active filters (the UI badge count)
    pub fn active_count(&self) -> usize {
        let toggles = [self.has_image, self.has_roboflow, self.has_date]
            .iter()
            .filter(|b| **b)
            .count();
        let dropdowns = [
            &self.volume,
            &self.word_class,
            &self.technique,
            &self.distribution,
            &self.region,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count();
        let texts = [&self.artifact, &self.site]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .count();
        toggles + dropdowns + texts
    }
}

/// A 1-based results page
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: usize,
    pub page_size: usize,
}

impl Page {
    pub fn new(page: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_size(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// Row offset of the first result on this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}
