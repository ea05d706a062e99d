//! Catalog import - mhd-catalog-all.json into catalog_signs

use std::path::Path;
use std::time::Instant;

use super::{read_json, ImportReport};
use crate::catalog::NewCatalogSign;
use crate::mhd::CatalogRecord;
use crate::storage::CatalogStore;
use crate::ui::ImportProgress;
use crate::Result;

/// Rows per transaction flush
pub const BATCH_SIZE: usize = 100;

/// Import the catalog export. Rows whose codeid is already present are
/// skipped, so re-running with unchanged input inserts nothing.
pub fn run(store: &mut CatalogStore, path: &Path) -> Result<ImportReport> {
    let records: Vec<CatalogRecord> = read_json(path)?;
    let loaded = records.len();
    tracing::info!(records = loaded, "loaded catalog export");

    let existing = store.existing_mhd_codes()?;
    let new_rows: Vec<NewCatalogSign> = records
        .into_iter()
        .filter(|record| !existing.contains(&record.mhd_code()))
        .map(CatalogRecord::into_new_catalog_sign)
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

    let progress = ImportProgress::new("Inserting catalog signs", new_rows.len());
    let mut inserted = 0;
    for chunk in new_rows.chunks(BATCH_SIZE) {
        inserted += store.insert_catalog_signs(chunk)?;
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
