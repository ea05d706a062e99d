//! Grapheme types - a single sign occurrence within a block

use serde::Serialize;

/// Fields for inserting a grapheme.
///
/// `block_id` must resolve; `catalog_sign_id` stays NULL when the
/// graphcode has no catalog entry. `artifact_code` and
/// `location_summary` are denormalized for join-free filtering.
#[derive(Debug, Clone, Default)]
pub struct NewGrapheme {
    pub block_id: i64,
    pub catalog_sign_id: Option<i64>,
    pub grapheme_code: String,
    pub grapheme_logosyll: Option<String>,
    pub grapheme_hyphenated: Option<String>,
    pub grapheme_maya: Option<String>,
    pub grapheme_english: Option<String>,
    pub artifact_code: Option<String>,
    pub location_summary: Option<String>,
}

/// A grapheme search result with joined block and catalog context
#[derive(Debug, Clone, Serialize)]
pub struct GraphemeHit {
    pub id: i64,
    pub block_id: i64,
    pub catalog_sign_id: Option<i64>,
    pub grapheme_code: String,
    pub grapheme_logosyll: Option<String>,
    pub grapheme_hyphenated: Option<String>,
    pub grapheme_maya: Option<String>,
    pub grapheme_english: Option<String>,
    pub artifact_code: Option<String>,
    pub location_summary: Option<String>,

    // From the owning block
    pub block_maya1: Option<String>,
    pub block_english: Option<String>,
    pub event_calendar: Option<String>,
    pub block_img: Option<String>,

    // From the linked catalog sign
    pub mhd_code_sub: Option<String>,
    pub syllabic_value: Option<String>,
    pub primary_image_url: Option<String>,
}
