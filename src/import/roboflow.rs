//! Roboflow import - COCO annotation splits into roboflow_instances
//!
//! Category names are matched against lowercased catalog codes with the
//! fallback variations from [`crate::coco::label_variants`]. Categories
//! that match nothing are collected and sampled in the final report;
//! their annotations are skipped, not retried.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

use super::read_json;
use crate::coco::{label_variants, CocoDataset};
use crate::objstore::ObjectStore;
use crate::roboflow::NewRoboflowInstance;
use crate::storage::CatalogStore;
use crate::Result;

/// Rows per transaction flush
pub const BATCH_SIZE: usize = 500;

/// The dataset's split directories
pub const SPLITS: [&str; 3] = ["train", "valid", "test"];

/// Where instance images come from
pub enum ImageSource<'a> {
    /// Upload each referenced crop and store the returned URL
    Upload(&'a ObjectStore),
    /// Images are already in the bucket; only compose URLs
    Linked { public_url: String },
}

impl ImageSource<'_> {
    fn url_for(&self, key: &str, local_path: &Path) -> Result<String> {
        match self {
            ImageSource::Upload(store) => store.put_object(local_path, key),
            ImageSource::Linked { public_url } => {
                Ok(format!("{}/{}", public_url.trim_end_matches('/'), key))
            }
        }
    }
}

/// Outcome of a Roboflow import run
#[derive(Debug, Default)]
pub struct RoboflowReport {
    pub imported: usize,
    pub skipped: usize,
    /// Category names with no catalog match, across all splits
    pub unmatched: BTreeSet<String>,
    pub elapsed: std::time::Duration,
}

impl RoboflowReport {
    /// First n unmatched codes for the end-of-run printout
    pub fn unmatched_sample(&self, n: usize) -> Vec<&str> {
        self.unmatched.iter().take(n).map(String::as_str).collect()
    }
}

fn instance_key(image_url: &str, bbox: &[f64; 4]) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        image_url, bbox[0], bbox[1], bbox[2], bbox[3]
    )
}

/// Import every split under `data_dir`. Splits without an annotation
/// file are skipped with a warning.
pub fn run(
    store: &mut CatalogStore,
    data_dir: &Path,
    images: &ImageSource,
) -> Result<RoboflowReport> {
    let catalog_map = store.mhd_code_map_lowercase()?;
    tracing::info!(mappings = catalog_map.len(), "loaded catalog mappings");

    let mut existing: HashSet<String> = store
        .existing_roboflow_boxes()?
        .iter()
        .map(|(url, x, y, w, h)| instance_key(url, &[*x, *y, *w, *h]))
        .collect();

    let started = Instant::now();
    let mut report = RoboflowReport::default();

    for split in SPLITS {
        let annotations_path = data_dir.join(split).join("_annotations.coco.json");
        if !annotations_path.exists() {
            tracing::warn!(split, "split not found, skipping");
            continue;
        }

        let coco: CocoDataset = read_json(&annotations_path)?;
        tracing::info!(
            split,
            images = coco.images.len(),
            annotations = coco.annotations.len(),
            categories = coco.categories.len(),
            "processing split"
        );

        // Resolve each category to a catalog sign, trying the label
        // variations in order
        let mut category_map: HashMap<i64, i64> = HashMap::new();
        for category in &coco.categories {
            let matched = label_variants(&category.name.to_lowercase())
                .into_iter()
                .find_map(|variant| catalog_map.get(&variant).copied());
            match matched {
                Some(catalog_id) => {
                    category_map.insert(category.id, catalog_id);
                }
                None => {
                    report.unmatched.insert(category.name.clone());
                }
            }
        }
        tracing::info!(
            matched = category_map.len(),
            total = coco.categories.len(),
            "matched categories"
        );

        let image_index = coco.image_index();
        // One upload per image file, however many annotations point at it
        let mut uploaded: HashMap<i64, String> = HashMap::new();
        let mut batch: Vec<NewRoboflowInstance> = Vec::with_capacity(BATCH_SIZE);

        for annotation in &coco.annotations {
            let Some(image) = image_index.get(&annotation.image_id) else {
                report.skipped += 1;
                continue;
            };
            let Some(&catalog_sign_id) = category_map.get(&annotation.category_id) else {
                report.skipped += 1;
                continue;
            };

            let image_url = match uploaded.get(&annotation.image_id) {
                Some(url) => url.clone(),
                None => {
                    let local_path = data_dir.join(split).join(&image.file_name);
                    if matches!(images, ImageSource::Upload(_)) && !local_path.exists() {
                        report.skipped += 1;
                        continue;
                    }
                    let key = format!("roboflow/{}/{}", split, image.file_name);
                    let url = images.url_for(&key, &local_path)?;
                    uploaded.insert(annotation.image_id, url.clone());
                    url
                }
            };

            if !existing.insert(instance_key(&image_url, &annotation.bbox)) {
                report.skipped += 1;
                continue;
            }

            batch.push(NewRoboflowInstance {
                catalog_sign_id,
                image_url,
                bbox_x: annotation.bbox[0],
                bbox_y: annotation.bbox[1],
                bbox_width: annotation.bbox[2],
                bbox_height: annotation.bbox[3],
                segmentation_mask: if annotation.segmentation.is_null() {
                    None
                } else {
                    Some(annotation.segmentation.to_string())
                },
                confidence: 1.0,
                dataset_split: split.to_string(),
            });

            if batch.len() >= BATCH_SIZE {
                report.imported += store.insert_roboflow_instances(&batch)?;
                batch.clear();
            }
        }

        if !batch.is_empty() {
            report.imported += store.insert_roboflow_instances(&batch)?;
        }
    }

    report.elapsed = started.elapsed();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewCatalogSign;
    use std::io::Write;

    const TRAIN: &str = r#"{
        "images": [
            {"id": 1, "file_name": "page1.jpg", "width": 640, "height": 480},
            {"id": 2, "file_name": "page2.jpg", "width": 640, "height": 480}
        ],
        "annotations": [
            {"id": 10, "image_id": 1, "category_id": 100, "bbox": [5.0, 6.0, 20.0, 30.0],
             "segmentation": [[5.0, 6.0, 25.0, 36.0]], "area": 600.0, "iscrowd": 0},
            {"id": 11, "image_id": 1, "category_id": 101, "bbox": [50.0, 60.0, 10.0, 10.0],
             "segmentation": [], "area": 100.0, "iscrowd": 0},
            {"id": 12, "image_id": 2, "category_id": 100, "bbox": [1.0, 1.0, 8.0, 9.0],
             "segmentation": [], "area": 72.0, "iscrowd": 0}
        ],
        "categories": [
            {"id": 100, "name": "743ab glyph"},
            {"id": 101, "name": "nonsense-code"}
        ]
    }"#;

    fn dataset_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train");
        std::fs::create_dir_all(&train).unwrap();
        let mut file = std::fs::File::create(train.join("_annotations.coco.json")).unwrap();
        file.write_all(TRAIN.as_bytes()).unwrap();
        dir
    }

    fn store_with_sign() -> CatalogStore {
        let mut store = CatalogStore::open_in_memory().unwrap();
        // The annotators label this sign "743ab ..."; the catalog knows
        // it by the bare digits
        store
            .insert_catalog_signs(&[NewCatalogSign {
                mhd_code: "743".to_string(),
                graphcode: Some("0743ab".to_string()),
                ..Default::default()
            }])
            .unwrap();
        store
    }

    #[test]
    fn test_matched_categories_import_and_unmatched_collect() {
        let dir = dataset_dir();
        let mut store = store_with_sign();
        let images = ImageSource::Linked {
            public_url: "https://img.example".to_string(),
        };

        let report = run(&mut store, dir.path(), &images).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.unmatched_sample(5), vec!["nonsense-code"]);
        assert_eq!(store.count_roboflow_instances().unwrap(), 2);
    }

    #[test]
    fn test_rerun_inserts_nothing() {
        let dir = dataset_dir();
        let mut store = store_with_sign();
        let images = ImageSource::Linked {
            public_url: "https://img.example".to_string(),
        };

        run(&mut store, dir.path(), &images).unwrap();
        let second = run(&mut store, dir.path(), &images).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(store.count_roboflow_instances().unwrap(), 2);
    }

    #[test]
    fn test_linked_urls_compose_split_and_filename() {
        let dir = dataset_dir();
        let mut store = store_with_sign();
        let images = ImageSource::Linked {
            public_url: "https://img.example/".to_string(),
        };
        run(&mut store, dir.path(), &images).unwrap();

        let boxes = store.existing_roboflow_boxes().unwrap();
        assert!(boxes
            .iter()
            .any(|(url, ..)| url == "https://img.example/roboflow/train/page1.jpg"));
    }
}
