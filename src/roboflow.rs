//! Roboflow instance types - ML-annotated image crops
//!
//! Each row is one segmented annotation from the Roboflow dataset,
//! linked to the catalog sign its class name resolved to.

/// Fields for inserting a Roboflow instance
#[derive(Debug, Clone)]
pub struct NewRoboflowInstance {
    pub catalog_sign_id: i64,
    pub image_url: String,
    pub bbox_x: f64,
    pub bbox_y: f64,
    pub bbox_width: f64,
    pub bbox_height: f64,
    /// COCO segmentation polygon, kept as raw JSON text
    pub segmentation_mask: Option<String>,
    pub confidence: f64,
    /// Which dataset split the crop came from (train/valid/test)
    pub dataset_split: String,
}
