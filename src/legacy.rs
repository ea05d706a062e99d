//! Legacy sign schema - the simpler tables used by the early pages
//!
//! Before the full catalog existed the portal ran on two tables:
//! `signs` (one row per sign, keyed loosely by Bonn/Thompson/MHD id) and
//! `sign_instances` (occurrences with a free-form metadata blob). The
//! `/api/signs` endpoints still read them, and the concordance and
//! legacy MHD imports still write them.

use serde::Serialize;

/// A legacy sign row
#[derive(Debug, Clone, Serialize)]
pub struct Sign {
    pub id: i64,
    pub bonn_id: Option<String>,
    pub thompson_id: Option<String>,
    pub mhd_id: Option<String>,
    pub phonetic_value: Option<String>,
    pub description: Option<String>,
    pub primary_image_url: Option<String>,
    pub created_at: Option<String>,
}

/// A legacy sign with its occurrence count, as listed by `/api/signs`
#[derive(Debug, Clone, Serialize)]
pub struct SignWithCount {
    #[serde(flatten)]
    pub sign: Sign,
    pub instance_count: i64,
}

/// A legacy sign occurrence
#[derive(Debug, Clone, Serialize)]
pub struct SignInstance {
    pub id: i64,
    pub sign_id: i64,
    pub source_type: String,
    pub source_id: String,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub location: Option<String>,
    pub artifact_type: Option<String>,
    pub notes: Option<String>,
    /// Full source row, serialized as JSON
    pub metadata: Option<String>,
}

/// Fields for inserting a legacy sign
#[derive(Debug, Clone, Default)]
pub struct NewSign {
    pub bonn_id: Option<String>,
    pub thompson_id: Option<String>,
    pub mhd_id: Option<String>,
    pub phonetic_value: Option<String>,
    pub description: Option<String>,
    pub primary_image_url: Option<String>,
}

/// Fields for inserting a legacy sign instance.
///
/// (source_type, source_id) is unique, so re-imports are no-ops.
#[derive(Debug, Clone, Default)]
pub struct NewSignInstance {
    pub sign_id: i64,
    pub source_type: String,
    pub source_id: String,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub location: Option<String>,
    pub artifact_type: Option<String>,
    pub notes: Option<String>,
    pub metadata: Option<String>,
}
