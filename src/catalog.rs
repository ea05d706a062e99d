//! Catalog sign types - the canonical sign dictionary
//!
//! One row per sign in the master catalog, cross-referenced by the
//! competing cataloging schemes (Thompson, Zender, Kettunen, Gronemeyer)
//! in addition to the MHD's own code families.

use serde::{Deserialize, Serialize};

/// A catalog sign row.
///
/// `mhd_code` is the stable unique key (the MHD `codeid`); `graphcode`
/// is the display code used throughout the corpus tables. Everything
/// else is nullable - the source data is sparse and stays that way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSign {
    pub id: i64,

    // MHD identifiers
    pub mhd_code: String,
    pub mhd_code_sub: Option<String>,
    pub mhd_code_2003: Option<String>,
    pub graphcode: Option<String>,

    // Cross-catalog codes
    pub thompson_code: Option<String>,
    pub thompson_variant: Option<String>,
    pub zender_code: Option<String>,
    pub kettunen_code: Option<String>,
    pub kettunen_1999: Option<String>,
    pub gronemeyer_code: Option<String>,
    pub former_mhd_code: Option<String>,

    // Linguistic data
    pub logographic_value: Option<String>,
    pub logographic_cvc: Option<String>,
    pub syllabic_value: Option<String>,
    pub english_translation: Option<String>,
    pub word_class: Option<String>,
    pub calendrical_name: Option<String>,

    // Visual/contextual metadata
    pub picture_description: Option<String>,
    pub volume: Option<String>,
    pub technique: Option<String>,
    pub distribution: Option<String>,

    pub primary_image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Fields for inserting a catalog sign (id and timestamp come from the DB)
#[derive(Debug, Clone, Default)]
pub struct NewCatalogSign {
    pub mhd_code: String,
    pub mhd_code_sub: Option<String>,
    pub mhd_code_2003: Option<String>,
    pub graphcode: Option<String>,
    pub thompson_code: Option<String>,
    pub thompson_variant: Option<String>,
    pub zender_code: Option<String>,
    pub kettunen_code: Option<String>,
    pub kettunen_1999: Option<String>,
    pub gronemeyer_code: Option<String>,
    pub former_mhd_code: Option<String>,
    pub logographic_value: Option<String>,
    pub logographic_cvc: Option<String>,
    pub syllabic_value: Option<String>,
    pub english_translation: Option<String>,
    pub word_class: Option<String>,
    pub calendrical_name: Option<String>,
    pub picture_description: Option<String>,
    pub volume: Option<String>,
    pub technique: Option<String>,
    pub distribution: Option<String>,
    pub primary_image_url: Option<String>,
    pub notes: Option<String>,
}

/// A sign search result: the catalog row plus usage counts
#[derive(Debug, Clone, Serialize)]
pub struct SignHit {
    #[serde(flatten)]
    pub sign: CatalogSign,
    /// Occurrences of this sign in the corpus
    pub grapheme_count: i64,
    /// ML-annotated crops linked to this sign
    pub roboflow_count: i64,
}
