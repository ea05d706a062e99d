//! Block types - one physically inscribed unit of text
//!
//! A block is a word-sized glyph group on an artifact (one monument face,
//! one codex page cell). Blocks carry the artifact/location metadata, the
//! free-text date fields (never parsed into a calendar type), and the
//! geographic columns filled in by the geo backfill.

use serde::Serialize;

/// Fields for inserting a block.
///
/// `mhd_block_id` is the composed unique key `<artifact>-<sort>`.
#[derive(Debug, Clone, Default)]
pub struct NewBlock {
    pub mhd_block_id: String,
    pub artifact_code: String,
    pub surface_page: Option<String>,
    pub orientation_frame: Option<String>,
    pub coordinate: Option<String>,

    pub block_logosyll: Option<String>,
    pub block_hyphenated: Option<String>,
    pub block_maya1: Option<String>,
    pub block_maya2: Option<String>,
    pub block_english: Option<String>,
    pub block_graphcodes: Option<String>,

    // Date fields (multiple calendar systems, free text)
    pub event_calendar: Option<String>,
    pub event_long_count: Option<String>,
    pub event_260_day: Option<String>,
    pub event_365_day: Option<String>,

    pub person_code: Option<String>,
    pub scribe: Option<String>,
    pub semantic_context: Option<String>,
    pub notes: Option<String>,

    pub block_image1_url: Option<String>,
    pub block_image2_url: Option<String>,
    pub image_notes: Option<String>,

    pub sort_order: Option<i64>,
}

/// The block projection returned by search results
#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub id: i64,
    pub block_id: String,
    pub artifact_code: String,
    pub block_maya1: Option<String>,
    pub block_english: Option<String>,
    pub event_calendar: Option<String>,
    pub block_img: Option<String>,
    pub site_name: Option<String>,
    pub region: Option<String>,
}

/// Geographic fields resolved from an artifact code (see [`crate::sites`])
#[derive(Debug, Clone)]
pub struct BlockSiteFix {
    pub block_id: i64,
    pub site_code: String,
    pub site_name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}
