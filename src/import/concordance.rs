//! Concordance import - the LMGG HTML table into the legacy signs table
//!
//! The table's columns are Thompson, Bonn, (plate), MHD. Rows where the
//! concordance annotates a non-match are dropped, as are `~`
//! placeholders; a row needs at least one surviving identifier.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use super::ImportReport;
use crate::html;
use crate::legacy::NewSign;
use crate::storage::CatalogStore;
use crate::Result;

fn clean_cell(cell: Option<&String>) -> Option<String> {
    cell.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "~")
}

fn sign_key(
    thompson: &Option<String>,
    bonn: &Option<String>,
    mhd: &Option<String>,
) -> String {
    format!(
        "{}|{}|{}",
        thompson.as_deref().unwrap_or(""),
        bonn.as_deref().unwrap_or(""),
        mhd.as_deref().unwrap_or("")
    )
}

pub fn run(store: &mut CatalogStore, path: &Path) -> Result<ImportReport> {
    let contents = std::fs::read_to_string(path)?;
    let rows = html::table_rows(&contents);
    let loaded = rows.len().saturating_sub(1);
    tracing::info!(rows = loaded, "parsed concordance table");

    let existing: HashSet<String> = store
        .existing_sign_keys()?
        .iter()
        .map(|(t, b, m)| sign_key(t, b, m))
        .collect();

    let started = Instant::now();
    let mut inserted = 0;
    let mut skipped = 0;

    // First row is the header
    for row in rows.iter().skip(1) {
        if row.len() < 3 {
            skipped += 1;
            continue;
        }

        let thompson_raw = row.first();
        let bonn_raw = row.get(1);
        let mhd_raw = row.get(3);

        // Annotation rows, not identifiers
        if bonn_raw.is_some_and(|s| s.contains("not a Bonn number"))
            || mhd_raw.is_some_and(|s| s.contains("does not give a match"))
        {
            skipped += 1;
            continue;
        }

        let thompson = clean_cell(thompson_raw);
        let bonn = clean_cell(bonn_raw);
        let mhd = clean_cell(mhd_raw);

        if thompson.is_none() && bonn.is_none() && mhd.is_none() {
            skipped += 1;
            continue;
        }

        if !existing.contains(&sign_key(&thompson, &bonn, &mhd)) {
            store.insert_sign(&NewSign {
                thompson_id: thompson,
                bonn_id: bonn,
                mhd_id: mhd,
                ..Default::default()
            })?;
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    Ok(ImportReport {
        loaded,
        inserted,
        skipped,
        elapsed: started.elapsed(),
    })
}
