//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - catalog_signs(mhd_code, graphcode, cross-catalog codes, linguistic values)
//! - blocks(mhd_block_id, artifact/date/geo fields, sort_order)
//! - graphemes(block_id, catalog_sign_id, grapheme_code)
//! - roboflow_instances(catalog_sign_id, image_url, bbox, split)
//! - signs / sign_instances (legacy schema for the early pages)
//! - sources (seeded reference rows)

pub mod schema;
pub mod sqlite;

pub use sqlite::{CatalogStore, DbStats, FilterOptions, VerifyReport, CATALOG_SIGN_COLUMNS};
