//! Graphemes import - mhd-graphemes-all.json into graphemes
//!
//! Each row is joined to its block by the composed block key; rows
//! whose block never made it into the database are skipped and counted.
//! The catalog link is best-effort: an unknown graphcode leaves the
//! foreign key NULL.

use std::path::Path;
use std::time::Instant;

use super::{read_json, ImportReport};
use crate::grapheme::NewGrapheme;
use crate::mhd::GraphemeRecord;
use crate::storage::CatalogStore;
use crate::ui::ImportProgress;
use crate::Result;

/// Rows per transaction flush
pub const BATCH_SIZE: usize = 1000;

pub fn run(store: &mut CatalogStore, path: &Path) -> Result<ImportReport> {
    let records: Vec<GraphemeRecord> = read_json(path)?;
    let loaded = records.len();
    tracing::info!(records = loaded, "loaded graphemes export");

    let block_map = store.block_key_map()?;
    let catalog_map = store.graphcode_map()?;
    let existing = store.existing_grapheme_pairs()?;
    tracing::info!(
        blocks = block_map.len(),
        catalog = catalog_map.len(),
        "loaded lookup maps"
    );

    let started = Instant::now();
    let progress = ImportProgress::new("Inserting graphemes", loaded);

    let mut batch: Vec<NewGrapheme> = Vec::with_capacity(BATCH_SIZE);
    let mut inserted = 0;
    let mut skipped = 0;

    for record in records {
        let Some(&block_id) = block_map.get(&record.block_key()) else {
            skipped += 1;
            progress.inc(1);
            continue;
        };

        let code = record.grapheme_code();
        if existing.contains(&(block_id, code.clone())) {
            skipped += 1;
            progress.inc(1);
            continue;
        }

        let catalog_sign_id = catalog_map.get(&code).copied();
        batch.push(NewGrapheme {
            block_id,
            catalog_sign_id,
            grapheme_code: code,
            grapheme_logosyll: crate::mhd::record::placeholder(record.grlogosyll.clone()),
            grapheme_hyphenated: crate::mhd::record::placeholder(record.grhyphen.clone()),
            grapheme_maya: crate::mhd::record::placeholder(record.grmaya.clone()),
            grapheme_english: crate::mhd::record::placeholder(record.grengl.clone()),
            artifact_code: Some(record.artifact_code()),
            location_summary: Some(record.location_summary()),
        });

        if batch.len() >= BATCH_SIZE {
            inserted += store.insert_graphemes(&batch)?;
            progress.inc(batch.len());
            batch.clear();
        }
    }

    if !batch.is_empty() {
        inserted += store.insert_graphemes(&batch)?;
        progress.inc(batch.len());
    }
    progress.finish();

    Ok(ImportReport {
        loaded,
        inserted,
        skipped,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::NewBlock;
    use crate::catalog::NewCatalogSign;
    use std::io::Write;

    const EXPORT: &str = r#"[
        {"objabbr": "YAX", "blsort": 1, "grgraphcode": "0001bt", "grmaya": "b'alam", "grengl": "jaguar"},
        {"objabbr": "YAX", "blsort": 1, "grgraphcode": "9999zz"},
        {"objabbr": "PNG", "blsort": 9, "grgraphcode": "0001bt"}
    ]"#;

    fn export_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("mhd-graphemes-all.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        path
    }

    fn seeded_store() -> CatalogStore {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store
            .insert_blocks(&[NewBlock {
                mhd_block_id: "YAX-1".to_string(),
                artifact_code: "YAX".to_string(),
                ..Default::default()
            }])
            .unwrap();
        store
            .insert_catalog_signs(&[NewCatalogSign {
                mhd_code: "1".to_string(),
                mhd_code_sub: Some("0001bt".to_string()),
                graphcode: Some("0001bt".to_string()),
                ..Default::default()
            }])
            .unwrap();
        store
    }

    #[test]
    fn test_unmatched_blocks_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_file(&dir);
        let mut store = seeded_store();

        let report = run(&mut store, &path).unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(report.inserted, 2);
        // The PNG-9 block was never imported
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_catalog_link_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_file(&dir);
        let mut store = seeded_store();
        run(&mut store, &path).unwrap();

        let linked = store.existing_grapheme_pairs().unwrap();
        assert!(linked.contains(&(1, "0001bt".to_string())));
        // 9999zz inserted without a catalog link
        assert!(linked.contains(&(1, "9999zz".to_string())));
        let report = store.verify_report().unwrap();
        assert_eq!(report.graphemes, 2);
        assert_eq!(report.graphemes_linked, 1);
    }

    #[test]
    fn test_rerun_inserts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_file(&dir);
        let mut store = seeded_store();

        run(&mut store, &path).unwrap();
        let second = run(&mut store, &path).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(store.count_graphemes().unwrap(), 2);
    }
}
