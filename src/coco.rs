//! COCO annotation types for the Roboflow export
//!
//! Each dataset split ships a `_annotations.coco.json` with images,
//! annotations, and categories. Category names are the annotators'
//! sign codes, which only loosely match the catalog - see
//! [`label_variants`] for the matching fallbacks.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct CocoImage {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CocoAnnotation {
    pub id: i64,
    pub image_id: i64,
    pub category_id: i64,
    pub bbox: [f64; 4],
    /// Polygon list, kept raw and stored as JSON text
    #[serde(default)]
    pub segmentation: serde_json::Value,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub iscrowd: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CocoCategory {
    pub id: i64,
    pub name: String,
}

/// One split's annotation file
#[derive(Debug, Clone, Deserialize)]
pub struct CocoDataset {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    pub categories: Vec<CocoCategory>,
}

impl CocoDataset {
    /// Index images by id for annotation lookup
    pub fn image_index(&self) -> HashMap<i64, &CocoImage> {
        self.images.iter().map(|img| (img.id, img)).collect()
    }
}

fn code_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)([a-z]{2})$").expect("valid regex"))
}

/// Matching fallbacks for an annotator's label, in priority order.
///
/// A label like "743a glyph" tries "743a" first, then the bare digits,
/// then digits+suffix, then the full label. Duplicates are removed while
/// keeping order. The caller lowercases before calling.
pub fn label_variants(label: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let first_token = label.split(' ').next().unwrap_or(label);
    variants.push(first_token.to_string());

    if let Some(caps) = code_suffix_re().captures(first_token) {
        variants.push(caps[1].to_string());
        variants.push(format!("{}{}", &caps[1], &caps[2]));
    }

    variants.push(label.to_string());

    let mut seen = std::collections::HashSet::new();
    variants.retain(|v| seen.insert(v.clone()));
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_variants_with_suffix() {
        let variants = label_variants("743ab glyph");
        assert_eq!(variants, vec!["743ab", "743", "743ab glyph"]);
    }

    #[test]
    fn test_label_variants_plain() {
        assert_eq!(label_variants("1034"), vec!["1034"]);
        assert_eq!(label_variants("t501"), vec!["t501"]);
    }

    #[test]
    fn test_image_index() {
        let data = r#"{
            "images": [{"id": 1, "file_name": "a.jpg", "width": 640, "height": 480}],
            "annotations": [{"id": 10, "image_id": 1, "category_id": 3,
                             "bbox": [1.0, 2.0, 30.0, 40.0],
                             "segmentation": [[1.0, 2.0, 3.0, 4.0]],
                             "area": 1200.0, "iscrowd": 0}],
            "categories": [{"id": 3, "name": "743ab"}]
        }"#;
        let dataset: CocoDataset = serde_json::from_str(data).unwrap();
        let index = dataset.image_index();
        assert_eq!(index[&1].file_name, "a.jpg");
        assert_eq!(dataset.annotations[0].bbox[2], 30.0);
    }
}
