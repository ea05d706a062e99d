//! MHD export handling - record types for the scraped JSON exports and
//! a paging client for the MHD API

pub mod client;
pub mod record;

pub use client::{ExportKind, MhdClient, DEFAULT_BASE_URL};
pub use record::{BlockRecord, CatalogRecord, GraphemeRecord, LegacyRecord};
