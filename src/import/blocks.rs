//! Blocks import - mhd-blocks-all.json into blocks

use std::path::Path;
use std::time::Instant;

use super::{read_json, ImportReport};
use crate::block::NewBlock;
use crate::mhd::BlockRecord;
use crate::storage::CatalogStore;
use crate::ui::ImportProgress;
use crate::Result;

/// Rows per transaction flush
pub const BATCH_SIZE: usize = 500;

/// Import the blocks export, keyed by `<artifact>-<sort>`
pub fn run(store: &mut CatalogStore, path: &Path) -> Result<ImportReport> {
    let records: Vec<BlockRecord> = read_json(path)?;
    let loaded = records.len();
    tracing::info!(records = loaded, "loaded blocks export");

    let existing = store.existing_block_keys()?;
    let new_rows: Vec<NewBlock> = records
        .into_iter()
        .filter(|record| !existing.contains(&record.block_key()))
        .map(BlockRecord::into_new_block)
        .collect();
    let skipped = loaded - new_rows.len();

    let started = Instant::now();
    if new_rows.is_empty() {
        return Ok(ImportReport {
            loaded,
            inserted: 0,
            skipped,
            elapsed: started.elapsed(),
        });
    }

    let progress = ImportProgress::new("Inserting blocks", new_rows.len());
    let mut inserted = 0;
    for chunk in new_rows.chunks(BATCH_SIZE) {
        inserted += store.insert_blocks(chunk)?;
        progress.inc(chunk.len());
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
    use std::io::Write;

    const EXPORT: &str = r#"[
        {"objabbr": "YAX", "blsort": 1, "blengl": "his jaguar", "blmaya1": "_", "blevcal": "9.15.0.0.0"},
        {"objabbr": "YAX", "blsort": 2, "blengl": "lord"},
        {"objabbr": "", "blsort": 3}
    ]"#;

    fn export_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("mhd-blocks-all.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_import_composes_keys_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_file(&dir);
        let mut store = CatalogStore::open_in_memory().unwrap();

        let first = run(&mut store, &path).unwrap();
        assert_eq!(first.inserted, 3);

        let keys = store.existing_block_keys().unwrap();
        assert!(keys.contains("YAX-1"));
        assert!(keys.contains("UNKNOWN-3"));

        let second = run(&mut store, &path).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 3);
        assert_eq!(store.count_blocks().unwrap(), 3);
    }
}
