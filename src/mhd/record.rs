//! Record types for the MHD JSON exports
//!
//! Field names mirror the export files verbatim. The MHD uses `""` for
//! missing values and `"_"` as a placeholder in the linguistic columns;
//! both become NULL on import.

use serde::{Deserialize, Serialize};

use crate::block::NewBlock;
use crate::catalog::NewCatalogSign;

/// Sentinel used when a source row has no artifact code
pub const UNKNOWN_ARTIFACT: &str = "UNKNOWN";

/// Drop empty strings
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Drop empty strings and the `_` placeholder
pub fn placeholder(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty() && s != "_")
}

/// The catalog export's embedded picture link
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LinkedPicture {
    #[serde(rename = "OrgPubLink")]
    pub org_pub_link: Option<String>,
}

/// One row of the catalog export (mhd-catalog-all.json)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogRecord {
    pub codeid: i64,
    pub newcodesub: Option<String>,
    pub graphcode: Option<String>,
    pub subsort: Option<String>,
    pub code2003: Option<String>,
    pub lpict: Option<LinkedPicture>,
    pub tno: Option<String>,
    pub mtno: Option<String>,
    pub zno: Option<String>,
    pub kno: Option<String>,
    pub gno: Option<String>,
    pub k1999: Option<String>,
    pub picture: Option<String>,
    pub technique: Option<String>,
    pub distribution: Option<String>,
    pub volume: Option<String>,
    pub lexcode: Option<String>,
    pub logographic: Option<String>,
    pub logocvc: Option<String>,
    pub english: Option<String>,
    pub wordclass: Option<String>,
    pub syllabic: Option<String>,
    pub calendrical: Option<String>,
    pub note: Option<String>,
}

impl CatalogRecord {
    /// The stable unique key: codeid as text
    pub fn mhd_code(&self) -> String {
        self.codeid.to_string()
    }

    /// Display code: newcodesub, falling back to graphcode, then codeid
    pub fn display_code(&self) -> String {
        non_empty(self.newcodesub.clone())
            .or_else(|| non_empty(self.graphcode.clone()))
            .unwrap_or_else(|| self.mhd_code())
    }

    pub fn into_new_catalog_sign(self) -> NewCatalogSign {
        let mhd_code = self.mhd_code();
        let graphcode = Some(self.display_code());
        NewCatalogSign {
            mhd_code,
            graphcode,
            mhd_code_sub: non_empty(self.newcodesub),
            mhd_code_2003: non_empty(self.code2003),
            thompson_code: non_empty(self.tno),
            thompson_variant: non_empty(self.mtno),
            zender_code: non_empty(self.zno),
            kettunen_code: non_empty(self.kno),
            kettunen_1999: non_empty(self.k1999),
            gronemeyer_code: non_empty(self.gno),
            former_mhd_code: None,
            logographic_value: non_empty(self.logographic),
            logographic_cvc: non_empty(self.logocvc),
            syllabic_value: non_empty(self.syllabic),
            english_translation: non_empty(self.english),
            word_class: non_empty(self.wordclass),
            calendrical_name: non_empty(self.calendrical),
            picture_description: non_empty(self.picture),
            volume: non_empty(self.volume),
            technique: non_empty(self.technique),
            distribution: non_empty(self.distribution),
            primary_image_url: self.lpict.and_then(|p| non_empty(p.org_pub_link)),
            notes: non_empty(self.note),
        }
    }
}

/// One row of the blocks export (mhd-blocks-all.json)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockRecord {
    pub objabbr: Option<String>,
    pub objstralmpg: Option<String>,
    pub blsort: i64,
    pub bltag: Option<String>,
    pub objorienfr: Option<String>,
    pub blcoord: Option<String>,
    pub bllogosyll: Option<String>,
    pub blhyphen: Option<String>,
    pub blmaya1: Option<String>,
    pub blmaya2: Option<String>,
    pub blengl: Option<String>,
    pub blgraphcodes: Option<String>,
    pub blevcal: Option<String>,
    pub blevlc: Option<String>,
    pub blev260: Option<String>,
    pub blev365: Option<String>,
    pub pncode: Option<String>,
    pub blnotes: Option<String>,
    pub blsem: Option<String>,
    pub blsurfpgfr: Option<String>,
    pub imgfr: Option<String>,
    pub blimage1: Option<String>,
    pub blimage2: Option<String>,
    pub blimagenotes: Option<String>,
}

impl BlockRecord {
    pub fn artifact_code(&self) -> String {
        non_empty(self.objabbr.clone()).unwrap_or_else(|| UNKNOWN_ARTIFACT.to_string())
    }

    /// The composed unique key `<artifact>-<sort>`
    pub fn block_key(&self) -> String {
        format!("{}-{}", self.artifact_code(), self.blsort)
    }

    pub fn into_new_block(self) -> NewBlock {
        let artifact_code = self.artifact_code();
        let mhd_block_id = self.block_key();
        NewBlock {
            mhd_block_id,
            artifact_code,
            surface_page: non_empty(self.objstralmpg),
            orientation_frame: non_empty(self.objorienfr),
            coordinate: non_empty(self.blcoord),
            block_logosyll: placeholder(self.bllogosyll),
            block_hyphenated: placeholder(self.blhyphen),
            block_maya1: placeholder(self.blmaya1),
            block_maya2: placeholder(self.blmaya2),
            block_english: placeholder(self.blengl),
            block_graphcodes: non_empty(self.blgraphcodes),
            event_calendar: non_empty(self.blevcal),
            event_long_count: non_empty(self.blevlc),
            event_260_day: non_empty(self.blev260),
            event_365_day: non_empty(self.blev365),
            person_code: non_empty(self.pncode),
            // Scribe attribution lives inside blnotes; never extracted
            scribe: None,
            semantic_context: non_empty(self.blsem),
            notes: non_empty(self.blnotes),
            block_image1_url: non_empty(self.blimage1),
            block_image2_url: non_empty(self.blimage2),
            image_notes: non_empty(self.blimagenotes),
            sort_order: Some(self.blsort),
        }
    }
}

/// One row of the graphemes export (mhd-graphemes-all.json)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphemeRecord {
    pub objabbr: Option<String>,
    pub objstralmpg: Option<String>,
    pub blsort: i64,
    pub objorienfr: Option<String>,
    pub grlogosyll: Option<String>,
    pub grhyphen: Option<String>,
    pub grmaya: Option<String>,
    pub grengl: Option<String>,
    pub grgraphcode: Option<String>,
}

impl GraphemeRecord {
    pub fn artifact_code(&self) -> String {
        non_empty(self.objabbr.clone()).unwrap_or_else(|| UNKNOWN_ARTIFACT.to_string())
    }

    /// Key of the block this occurrence belongs to
    pub fn block_key(&self) -> String {
        format!("{}-{}", self.artifact_code(), self.blsort)
    }

    /// Grapheme code, with the UNKNOWN sentinel for unlabeled rows
    pub fn grapheme_code(&self) -> String {
        non_empty(self.grgraphcode.clone()).unwrap_or_else(|| UNKNOWN_ARTIFACT.to_string())
    }

    /// Denormalized "artifact surface/page" display string
    pub fn location_summary(&self) -> String {
        format!(
            "{} {}",
            self.artifact_code(),
            self.objstralmpg.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string()
    }
}

/// One row of the full grapheme export consumed by the legacy import.
/// Serializable: the whole row is kept as the instance's metadata blob.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LegacyRecord {
    pub objabbr: Option<String>,
    pub objstralmpg: Option<String>,
    pub blsort: i64,
    pub bltag: Option<String>,
    pub objorienfr: Option<String>,
    pub blcoord: Option<String>,
    pub bllogosyll: Option<String>,
    pub blhyphen: Option<String>,
    pub blmaya1: Option<String>,
    pub blmaya2: Option<String>,
    pub blengl: Option<String>,
    pub blgraphcodes: Option<String>,
    pub blevcal: Option<String>,
    pub blevlc: Option<String>,
    pub blev260: Option<String>,
    pub blev365: Option<String>,
    pub pncode: Option<String>,
    pub grlogosyll: Option<String>,
    pub grhyphen: Option<String>,
    pub grmaya: Option<String>,
    pub grengl: Option<String>,
    pub grgraphcode: Option<String>,
    pub dictionary: Option<String>,
    pub evidence: Option<String>,
    pub substitution: Option<String>,
    pub blnotes: Option<String>,
    pub blsem: Option<String>,
    pub blsurfpgfr: Option<String>,
    pub imgfr: Option<String>,
    pub blimage1: Option<String>,
    pub blimage2: Option<String>,
    pub blimagenotes: Option<String>,
}

impl LegacyRecord {
    /// Grapheme code, falling back to the block-level code list
    pub fn code(&self) -> Option<String> {
        non_empty(self.grgraphcode.clone())
            .or_else(|| non_empty(self.blgraphcodes.clone()))
            .filter(|c| c != "UNKNOWN")
    }

    /// Composed unique source id for the instance row
    pub fn source_id(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.objabbr.as_deref().unwrap_or(""),
            self.blsurfpgfr.as_deref().unwrap_or(""),
            self.objorienfr.as_deref().unwrap_or(""),
            self.blsort
        )
    }

    pub fn location(&self) -> String {
        format!(
            "{} {}",
            self.objabbr.as_deref().unwrap_or(""),
            self.blsurfpgfr.as_deref().unwrap_or("")
        )
    }

    /// Pipe-joined notes, skipping placeholders
    pub fn notes(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.blnotes,
            &self.dictionary,
            &self.evidence,
            &self.substitution,
            &self.blsem,
            &self.blimagenotes,
        ]
        .iter()
        .filter_map(|v| v.as_deref())
        .filter(|s| !s.is_empty() && *s != "_" && *s != "?")
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_cleaning() {
        assert_eq!(placeholder(Some("_".to_string())), None);
        assert_eq!(placeholder(Some("".to_string())), None);
        assert_eq!(placeholder(Some("ba".to_string())), Some("ba".to_string()));
        assert_eq!(non_empty(Some("_".to_string())), Some("_".to_string()));
    }

    #[test]
    fn test_block_key_with_missing_artifact() {
        let record = BlockRecord {
            blsort: 42,
            ..Default::default()
        };
        assert_eq!(record.block_key(), "UNKNOWN-42");

        let record = BlockRecord {
            objabbr: Some("YAX".to_string()),
            blsort: 7,
            ..Default::default()
        };
        assert_eq!(record.block_key(), "YAX-7");
    }

    #[test]
    fn test_catalog_display_code_fallbacks() {
        let record = CatalogRecord {
            codeid: 123,
            newcodesub: Some("0123bt".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_code(), "0123bt");

        let record = CatalogRecord {
            codeid: 123,
            graphcode: Some("0123".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_code(), "0123");

        let record = CatalogRecord {
            codeid: 123,
            ..Default::default()
        };
        assert_eq!(record.display_code(), "123");
    }

    #[test]
    fn test_catalog_conversion_strips_empties() {
        let record = CatalogRecord {
            codeid: 9,
            english: Some("".to_string()),
            syllabic: Some("ba".to_string()),
            lpict: Some(LinkedPicture {
                org_pub_link: Some("https://mhd.example/9.png".to_string()),
            }),
            ..Default::default()
        };
        let sign = record.into_new_catalog_sign();
        assert_eq!(sign.mhd_code, "9");
        assert_eq!(sign.english_translation, None);
        assert_eq!(sign.syllabic_value.as_deref(), Some("ba"));
        assert_eq!(
            sign.primary_image_url.as_deref(),
            Some("https://mhd.example/9.png")
        );
    }

    #[test]
    fn test_block_conversion_placeholders() {
        let record = BlockRecord {
            objabbr: Some("PAL".to_string()),
            blsort: 3,
            blmaya1: Some("_".to_string()),
            blengl: Some("he was born".to_string()),
            blevcal: Some("9.8.9.13.0".to_string()),
            ..Default::default()
        };
        let block = record.into_new_block();
        assert_eq!(block.mhd_block_id, "PAL-3");
        assert_eq!(block.block_maya1, None);
        assert_eq!(block.block_english.as_deref(), Some("he was born"));
        assert_eq!(block.event_calendar.as_deref(), Some("9.8.9.13.0"));
        assert_eq!(block.sort_order, Some(3));
    }

    #[test]
    fn test_grapheme_location_summary() {
        let record = GraphemeRecord {
            objabbr: Some("CPN".to_string()),
            objstralmpg: Some("St A".to_string()),
            blsort: 1,
            ..Default::default()
        };
        assert_eq!(record.location_summary(), "CPN St A");

        let record = GraphemeRecord {
            blsort: 1,
            ..Default::default()
        };
        assert_eq!(record.location_summary(), "UNKNOWN");
    }

    #[test]
    fn test_legacy_notes_skip_placeholders() {
        let record = LegacyRecord {
            blnotes: Some("erosion on left edge".to_string()),
            dictionary: Some("_".to_string()),
            evidence: Some("?".to_string()),
            blsem: Some("accession".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.notes().as_deref(),
            Some("erosion on left edge | accession")
        );

        let empty = LegacyRecord::default();
        assert_eq!(empty.notes(), None);
    }

    #[test]
    fn test_legacy_code_fallback() {
        let record = LegacyRecord {
            grgraphcode: Some("".to_string()),
            blgraphcodes: Some("0580bt".to_string()),
            ..Default::default()
        };
        assert_eq!(record.code().as_deref(), Some("0580bt"));

        let unknown = LegacyRecord {
            grgraphcode: Some("UNKNOWN".to_string()),
            ..Default::default()
        };
        assert_eq!(unknown.code(), None);
    }
}
