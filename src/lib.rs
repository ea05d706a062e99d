//! # Glyphbase - Maya Hieroglyphic Sign Portal
//!
//! Searchable catalog of Maya hieroglyphic signs backed by SQLite.
//!
//! Glyphbase provides:
//! - A relational catalog of signs, inscription blocks, and graphemes
//! - A search query builder with per-view filters and pagination
//! - Batch import jobs for MHD exports, Roboflow COCO annotations,
//!   and the LMGG concordance
//! - Site-geography resolution for artifact codes
//! - An HTTP JSON API for the portal frontend

pub mod block;
pub mod catalog;
pub mod coco;
pub mod config;
pub mod grapheme;
pub mod html;
pub mod import;
pub mod legacy;
pub mod mhd;
pub mod objstore;
pub mod roboflow;
pub mod search;
pub mod server;
pub mod sites;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use block::{BlockSummary, NewBlock};
pub use catalog::{CatalogSign, NewCatalogSign, SignHit};
pub use grapheme::{GraphemeHit, NewGrapheme};
pub use roboflow::NewRoboflowInstance;
pub use search::{Page, SearchFilters, ViewMode};
pub use storage::CatalogStore;

/// Result type alias for Glyphbase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Glyphbase operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}
