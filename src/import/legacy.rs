//! Legacy MHD import - the grapheme export into signs/sign_instances
//!
//! The early-schema ingest: one legacy sign per grapheme code
//! (find-or-create by MHD id), one instance per occurrence. The unique
//! (source_type, source_id) index makes re-runs no-ops at the database
//! level.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use super::{read_json, ImportReport};
use crate::legacy::{NewSign, NewSignInstance};
use crate::mhd::record::placeholder;
use crate::mhd::LegacyRecord;
use crate::storage::CatalogStore;
use crate::ui::ImportProgress;
use crate::Result;

pub fn run(store: &mut CatalogStore, path: &Path) -> Result<ImportReport> {
    let records: Vec<LegacyRecord> = read_json(path)?;
    let loaded = records.len();
    tracing::info!(records = loaded, "loaded legacy export");

    let started = Instant::now();
    let progress = ImportProgress::new("Importing legacy instances", loaded);

    // Per-run cache so each code is looked up once
    let mut sign_id_by_code: HashMap<String, i64> = HashMap::new();
    let mut inserted = 0;
    let mut skipped = 0;

    for record in records {
        progress.inc(1);
        let Some(code) = record.code() else {
            skipped += 1;
            continue;
        };

        let sign_id = match sign_id_by_code.get(&code) {
            Some(&id) => id,
            None => {
                let id = match store.find_sign_by_mhd_id(&code)? {
                    Some(id) => id,
                    None => store.insert_sign(&NewSign {
                        mhd_id: Some(code.clone()),
                        phonetic_value: placeholder(record.grmaya.clone()),
                        description: placeholder(record.grengl.clone()),
                        ..Default::default()
                    })?,
                };
                sign_id_by_code.insert(code.clone(), id);
                id
            }
        };

        let instance = NewSignInstance {
            sign_id,
            source_type: "mhd".to_string(),
            source_id: record.source_id(),
            location: Some(record.location()),
            artifact_type: Some("codex".to_string()),
            notes: record.notes(),
            metadata: Some(serde_json::to_string(&record)?),
            ..Default::default()
        };

        if store.insert_sign_instance(&instance)? {
            inserted += 1;
        } else {
            skipped += 1;
        }
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
        {"objabbr": "MAD", "blsurfpgfr": "12b", "objorienfr": "fr2", "blsort": 1,
         "grgraphcode": "1M2", "grmaya": "b'a", "grengl": "first", "blnotes": "eroded"},
        {"objabbr": "MAD", "blsurfpgfr": "12b", "objorienfr": "fr3", "blsort": 2,
         "grgraphcode": "1M2", "grmaya": "b'a", "grengl": "again"},
        {"objabbr": "MAD", "blsurfpgfr": "13a", "objorienfr": "fr1", "blsort": 3,
         "grgraphcode": "", "blgraphcodes": ""}
    ]"#;

    fn export_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("mhd-graphemes-all.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_find_or_create_shares_one_sign() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_file(&dir);
        let mut store = CatalogStore::open_in_memory().unwrap();

        let report = run(&mut store, &path).unwrap();
        assert_eq!(report.inserted, 2);
        // Codeless row dropped
        assert_eq!(report.skipped, 1);
        assert_eq!(store.count_signs().unwrap(), 1);
        assert_eq!(store.count_sign_instances().unwrap(), 2);

        let sign_id = store.find_sign_by_mhd_id("1M2").unwrap().unwrap();
        let instances = store.instances_for_sign(sign_id).unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].source_id, "MAD-12b-fr2-1");
        assert_eq!(instances[0].location.as_deref(), Some("MAD 12b"));
        assert_eq!(instances[0].notes.as_deref(), Some("eroded"));
        assert!(instances[0]
            .metadata
            .as_deref()
            .unwrap()
            .contains("\"grgraphcode\":\"1M2\""));
    }

    #[test]
    fn test_rerun_is_noop_via_unique_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_file(&dir);
        let mut store = CatalogStore::open_in_memory().unwrap();

        run(&mut store, &path).unwrap();
        let second = run(&mut store, &path).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 3);
        assert_eq!(store.count_sign_instances().unwrap(), 2);
    }
}
