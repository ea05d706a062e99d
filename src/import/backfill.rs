//! Backfills - geographic resolution and primary image promotion

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::block::BlockSiteFix;
use crate::sites;
use crate::storage::CatalogStore;
use crate::ui::ImportProgress;
use crate::Result;

/// Updates per transaction flush
pub const BATCH_SIZE: usize = 500;

/// Outcome of the geo backfill
#[derive(Debug, Default)]
pub struct GeoReport {
    pub mapped: usize,
    pub unmapped: usize,
    /// Extracted site codes that resolved to nothing
    pub unmapped_codes: BTreeSet<String>,
    /// Block counts per region after the run
    pub regions: Vec<(String, i64)>,
    pub elapsed: Duration,
}

impl GeoReport {
    pub fn unmapped_sample(&self, n: usize) -> Vec<&str> {
        self.unmapped_codes
            .iter()
            .take(n)
            .map(String::as_str)
            .collect()
    }
}

/// Resolve every block's artifact code against the site table and fill
/// the geographic columns. Blocks whose code matches nothing are
/// counted and their codes collected.
pub fn backfill_geo(store: &mut CatalogStore) -> Result<GeoReport> {
    let blocks = store.blocks_with_artifacts()?;
    tracing::info!(blocks = blocks.len(), "resolving block sites");

    let started = Instant::now();
    let progress = ImportProgress::new("Resolving sites", blocks.len());
    let mut report = GeoReport::default();
    let mut batch: Vec<BlockSiteFix> = Vec::with_capacity(BATCH_SIZE);

    for (block_id, artifact_code) in blocks {
        progress.inc(1);
        match sites::resolve_site(&artifact_code) {
            Some((site_code, site)) => {
                batch.push(BlockSiteFix {
                    block_id,
                    site_code: site_code.to_string(),
                    site_name: site.name.to_string(),
                    region: site.region.to_string(),
                    latitude: site.lat,
                    longitude: site.lng,
                });
                report.mapped += 1;
                if batch.len() >= BATCH_SIZE {
                    store.apply_site_fixes(&batch)?;
                    batch.clear();
                }
            }
            None => {
                report.unmapped += 1;
                if let Some(code) = sites::extract_site_code(&artifact_code) {
                    report.unmapped_codes.insert(code.to_string());
                }
            }
        }
    }

    if !batch.is_empty() {
        store.apply_site_fixes(&batch)?;
    }
    progress.finish();

    report.regions = store.region_summary()?;
    report.elapsed = started.elapsed();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::NewBlock;

    fn block(key: &str, artifact: &str) -> NewBlock {
        NewBlock {
            mhd_block_id: key.to_string(),
            artifact_code: artifact.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_backfill_resolves_and_collects_unmapped() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store
            .insert_blocks(&[
                block("YAXL7-1", "YAXL7"),
                block("TIK-2", "TIK"),
                block("ZZZ9-3", "ZZZ9"),
            ])
            .unwrap();

        let report = backfill_geo(&mut store).unwrap();
        assert_eq!(report.mapped, 2);
        assert_eq!(report.unmapped, 1);
        assert_eq!(report.unmapped_sample(5), vec!["ZZZ"]);

        let regions = report.regions;
        assert!(regions.iter().any(|(r, n)| r == "Usmacinta" && *n == 1));
        assert!(regions.iter().any(|(r, n)| r == "Central" && *n == 1));
    }

    #[test]
    fn test_backfill_rerun_is_stable() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store.insert_blocks(&[block("PAL-1", "PAL")]).unwrap();

        backfill_geo(&mut store).unwrap();
        let second = backfill_geo(&mut store).unwrap();
        assert_eq!(second.mapped, 1);
        assert_eq!(second.regions, vec![("Usmacinta".to_string(), 1)]);
    }
}
