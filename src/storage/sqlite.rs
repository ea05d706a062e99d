//! SQLite storage implementation

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::block::{BlockSiteFix, BlockSummary, NewBlock};
use crate::catalog::{CatalogSign, NewCatalogSign, SignHit};
use crate::grapheme::{GraphemeHit, NewGrapheme};
use crate::legacy::{NewSign, NewSignInstance, Sign, SignInstance, SignWithCount};
use crate::roboflow::NewRoboflowInstance;
use crate::Result;
use super::schema;

/// SQLite-backed storage for the sign catalog
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema and seed the sources table
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Catalog Sign Operations ==========

    /// Insert a batch of catalog signs inside one transaction
    pub fn insert_catalog_signs(&mut self, signs: &[NewCatalogSign]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO catalog_signs (
                    mhd_code, mhd_code_sub, mhd_code_2003, graphcode,
                    thompson_code, thompson_variant, zender_code,
                    kettunen_code, kettunen_1999, gronemeyer_code, former_mhd_code,
                    logographic_value, logographic_cvc, syllabic_value,
                    english_translation, word_class, calendrical_name,
                    picture_description, volume, technique, distribution,
                    primary_image_url, notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                          ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)
                "#,
            )?;
            for sign in signs {
                stmt.execute(params![
                    sign.mhd_code,
                    sign.mhd_code_sub,
                    sign.mhd_code_2003,
                    sign.graphcode,
                    sign.thompson_code,
                    sign.thompson_variant,
                    sign.zender_code,
                    sign.kettunen_code,
                    sign.kettunen_1999,
                    sign.gronemeyer_code,
                    sign.former_mhd_code,
                    sign.logographic_value,
                    sign.logographic_cvc,
                    sign.syllabic_value,
                    sign.english_translation,
                    sign.word_class,
                    sign.calendrical_name,
                    sign.picture_description,
                    sign.volume,
                    sign.technique,
                    sign.distribution,
                    sign.primary_image_url,
                    sign.notes,
                ])?;
            }
        }
        tx.commit()?;
        Ok(signs.len())
    }

    /// All mhd_codes already present (for idempotent re-imports)
    pub fn existing_mhd_codes(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT mhd_code FROM catalog_signs")?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(codes)
    }

    /// Map from display code (graphcode) to catalog sign id
    pub fn graphcode_map(&self) -> Result<HashMap<String, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT graphcode, id FROM catalog_signs WHERE graphcode IS NOT NULL",
        )?;
        let map = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(map)
    }

    /// Map from lowercased mhd_code to catalog sign id (Roboflow matching)
    pub fn mhd_code_map_lowercase(&self) -> Result<HashMap<String, i64>> {
        let mut stmt = self.conn.prepare("SELECT mhd_code, id FROM catalog_signs")?;
        let map = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .filter_map(|r| r.ok())
            .map(|(code, id): (String, i64)| (code.to_lowercase(), id))
            .collect();
        Ok(map)
    }

    /// Get a catalog sign by id
    pub fn get_catalog_sign(&self, id: i64) -> Result<Option<CatalogSign>> {
        self.conn
            .query_row(
                &format!("SELECT {CATALOG_SIGN_COLUMNS} FROM catalog_signs cs WHERE cs.id = ?1"),
                [id],
                row_to_catalog_sign,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all catalog signs
    pub fn count_catalog_signs(&self) -> Result<usize> {
        self.count_table("catalog_signs")
    }

    // ========== Block Operations ==========

    /// Insert a batch of blocks inside one transaction
    pub fn insert_blocks(&mut self, blocks: &[NewBlock]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO blocks (
                    mhd_block_id, artifact_code, surface_page, orientation_frame, coordinate,
                    block_logosyll, block_hyphenated, block_maya1, block_maya2, block_english,
                    block_graphcodes, event_calendar, event_long_count, event_260_day, event_365_day,
                    person_code, scribe, semantic_context, notes,
                    block_image1_url, block_image2_url, image_notes, sort_order
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                          ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)
                "#,
            )?;
            for block in blocks {
                stmt.execute(params![
                    block.mhd_block_id,
                    block.artifact_code,
                    block.surface_page,
                    block.orientation_frame,
                    block.coordinate,
                    block.block_logosyll,
                    block.block_hyphenated,
                    block.block_maya1,
                    block.block_maya2,
                    block.block_english,
                    block.block_graphcodes,
                    block.event_calendar,
                    block.event_long_count,
                    block.event_260_day,
                    block.event_365_day,
                    block.person_code,
                    block.scribe,
                    block.semantic_context,
                    block.notes,
                    block.block_image1_url,
                    block.block_image2_url,
                    block.image_notes,
                    block.sort_order,
                ])?;
            }
        }
        tx.commit()?;
        Ok(blocks.len())
    }

    /// All mhd_block_ids already present
    pub fn existing_block_keys(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT mhd_block_id FROM blocks")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(keys)
    }

    /// Map from mhd_block_id to database id (grapheme import join)
    pub fn block_key_map(&self) -> Result<HashMap<String, i64>> {
        let mut stmt = self.conn.prepare("SELECT mhd_block_id, id FROM blocks")?;
        let map = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(map)
    }

    /// (id, artifact_code) for every block with a non-empty artifact code
    pub fn blocks_with_artifacts(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, artifact_code FROM blocks WHERE artifact_code IS NOT NULL AND artifact_code != ''",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    /// Apply a batch of resolved site fixes inside one transaction
    pub fn apply_site_fixes(&mut self, fixes: &[BlockSiteFix]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                UPDATE blocks
                SET site_code = ?1, site_name = ?2, region = ?3, latitude = ?4, longitude = ?5
                WHERE id = ?6
                "#,
            )?;
            for fix in fixes {
                stmt.execute(params![
                    fix.site_code,
                    fix.site_name,
                    fix.region,
                    fix.latitude,
                    fix.longitude,
                    fix.block_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(fixes.len())
    }

    /// Block counts grouped by resolved region, descending
    pub fn region_summary(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT region, COUNT(*) FROM blocks WHERE region IS NOT NULL GROUP BY region ORDER BY COUNT(*) DESC",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    /// Count all blocks
    pub fn count_blocks(&self) -> Result<usize> {
        self.count_table("blocks")
    }

    // ========== Grapheme Operations ==========

    /// Insert a batch of graphemes inside one transaction
    pub fn insert_graphemes(&mut self, graphemes: &[NewGrapheme]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO graphemes (
                    block_id, catalog_sign_id, grapheme_code,
                    grapheme_logosyll, grapheme_hyphenated, grapheme_maya, grapheme_english,
                    artifact_code, location_summary
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )?;
            for g in graphemes {
                stmt.execute(params![
                    g.block_id,
                    g.catalog_sign_id,
                    g.grapheme_code,
                    g.grapheme_logosyll,
                    g.grapheme_hyphenated,
                    g.grapheme_maya,
                    g.grapheme_english,
                    g.artifact_code,
                    g.location_summary,
                ])?;
            }
        }
        tx.commit()?;
        Ok(graphemes.len())
    }

    /// (block_id, grapheme_code) pairs already present. An unchanged
    /// re-import resolves every row to an existing pair and inserts
    /// nothing.
    pub fn existing_grapheme_pairs(&self) -> Result<HashSet<(i64, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT block_id, grapheme_code FROM graphemes")?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(pairs)
    }

    /// Count all graphemes
    pub fn count_graphemes(&self) -> Result<usize> {
        self.count_table("graphemes")
    }

    // ========== Roboflow Operations ==========

    /// Insert a batch of Roboflow instances inside one transaction
    pub fn insert_roboflow_instances(&mut self, instances: &[NewRoboflowInstance]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO roboflow_instances (
                    catalog_sign_id, image_url,
                    bbox_x, bbox_y, bbox_width, bbox_height,
                    segmentation_mask, confidence, dataset_split
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )?;
            for inst in instances {
                stmt.execute(params![
                    inst.catalog_sign_id,
                    inst.image_url,
                    inst.bbox_x,
                    inst.bbox_y,
                    inst.bbox_width,
                    inst.bbox_height,
                    inst.segmentation_mask,
                    inst.confidence,
                    inst.dataset_split,
                ])?;
            }
        }
        tx.commit()?;
        Ok(instances.len())
    }

    /// Count all Roboflow instances
    pub fn count_roboflow_instances(&self) -> Result<usize> {
        self.count_table("roboflow_instances")
    }

    /// Image URL and bbox of every stored instance (re-import dedup)
    pub fn existing_roboflow_boxes(&self) -> Result<Vec<(String, f64, f64, f64, f64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT image_url, bbox_x, bbox_y, bbox_width, bbox_height FROM roboflow_instances",
        )?;
        let boxes = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(boxes)
    }

    /// Promote the first Roboflow image to primary_image_url where missing.
    /// Returns the number of catalog signs updated.
    pub fn set_primary_images_from_roboflow(&self) -> Result<usize> {
        let updated = self.conn.execute(
            r#"
            UPDATE catalog_signs
            SET primary_image_url = (
                SELECT ri.image_url
                FROM roboflow_instances ri
                WHERE ri.catalog_sign_id = catalog_signs.id
                LIMIT 1
            )
            WHERE primary_image_url IS NULL
            AND EXISTS (
                SELECT 1 FROM roboflow_instances ri2
                WHERE ri2.catalog_sign_id = catalog_signs.id
            )
            "#,
            [],
        )?;
        Ok(updated)
    }

    // ========== Legacy Sign Operations ==========

    /// Find a legacy sign id by its MHD code
    pub fn find_sign_by_mhd_id(&self, mhd_id: &str) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT id FROM signs WHERE mhd_id = ?1 LIMIT 1",
                [mhd_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert a legacy sign and return its id
    pub fn insert_sign(&self, sign: &NewSign) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO signs (bonn_id, thompson_id, mhd_id, phonetic_value, description, primary_image_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                sign.bonn_id,
                sign.thompson_id,
                sign.mhd_id,
                sign.phonetic_value,
                sign.description,
                sign.primary_image_url,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a legacy sign instance; returns false when the
    /// (source_type, source_id) pair already exists
    pub fn insert_sign_instance(&self, instance: &NewSignInstance) -> Result<bool> {
        let inserted = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO sign_instances
                (sign_id, source_type, source_id, source_url, image_url,
                 date_start, date_end, location, artifact_type, notes, metadata)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                instance.sign_id,
                instance.source_type,
                instance.source_id,
                instance.source_url,
                instance.image_url,
                instance.date_start,
                instance.date_end,
                instance.location,
                instance.artifact_type,
                instance.notes,
                instance.metadata,
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Legacy sign listing with instance counts (the /api/signs query)
    pub fn list_signs(&self, query: &str) -> Result<Vec<SignWithCount>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                s.id, s.bonn_id, s.thompson_id, s.mhd_id, s.phonetic_value,
                s.description, s.primary_image_url, s.created_at,
                COUNT(si.id) as instance_count
            FROM signs s
            LEFT JOIN sign_instances si ON s.id = si.sign_id
            WHERE
                s.bonn_id LIKE ?1 OR
                s.thompson_id LIKE ?1 OR
                s.mhd_id LIKE ?1 OR
                s.phonetic_value LIKE ?1
            GROUP BY s.id
            ORDER BY s.bonn_id
            "#,
        )?;
        let signs = stmt
            .query_map([&pattern], |row| {
                Ok(SignWithCount {
                    sign: row_to_sign(row)?,
                    instance_count: row.get(8)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(signs)
    }

    /// Get a legacy sign by id
    pub fn get_sign(&self, id: i64) -> Result<Option<Sign>> {
        self.conn
            .query_row(
                "SELECT id, bonn_id, thompson_id, mhd_id, phonetic_value, description, primary_image_url, created_at FROM signs WHERE id = ?1",
                [id],
                row_to_sign,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All instances of a legacy sign
    pub fn instances_for_sign(&self, sign_id: i64) -> Result<Vec<SignInstance>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, sign_id, source_type, source_id, source_url, image_url,
                   date_start, date_end, location, artifact_type, notes, metadata
            FROM sign_instances WHERE sign_id = ?1 ORDER BY id
            "#,
        )?;
        let instances = stmt
            .query_map([sign_id], row_to_sign_instance)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(instances)
    }

    /// Identifier triples of every legacy sign (re-import dedup)
    pub fn existing_sign_keys(
        &self,
    ) -> Result<Vec<(Option<String>, Option<String>, Option<String>)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT thompson_id, bonn_id, mhd_id FROM signs")?;
        let keys = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(keys)
    }

    /// Count legacy signs
    pub fn count_signs(&self) -> Result<usize> {
        self.count_table("signs")
    }

    /// Count legacy sign instances
    pub fn count_sign_instances(&self) -> Result<usize> {
        self.count_table("sign_instances")
    }

    // ========== Query Execution ==========
    //
    // The search module builds the SQL and the parameter vector in
    // lockstep; these methods only execute and map rows.

    /// Run a COUNT(*) query with positional parameters
    pub fn query_count(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row(sql, params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Run a sign search page query
    pub fn query_sign_hits(&self, sql: &str, params: &[Value]) -> Result<Vec<SignHit>> {
        let mut stmt = self.conn.prepare(sql)?;
        let hits = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(SignHit {
                    sign: row_to_catalog_sign(row)?,
                    grapheme_count: row.get(25)?,
                    roboflow_count: row.get(26)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(hits)
    }

    /// Run a block search page query
    pub fn query_block_summaries(&self, sql: &str, params: &[Value]) -> Result<Vec<BlockSummary>> {
        let mut stmt = self.conn.prepare(sql)?;
        let blocks = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(BlockSummary {
                    id: row.get(0)?,
                    block_id: row.get(1)?,
                    artifact_code: row.get(2)?,
                    block_maya1: row.get(3)?,
                    block_english: row.get(4)?,
                    event_calendar: row.get(5)?,
                    block_img: row.get(6)?,
                    site_name: row.get(7)?,
                    region: row.get(8)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(blocks)
    }

    /// Run a grapheme search page query
    pub fn query_grapheme_hits(&self, sql: &str, params: &[Value]) -> Result<Vec<GraphemeHit>> {
        let mut stmt = self.conn.prepare(sql)?;
        let hits = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(GraphemeHit {
                    id: row.get(0)?,
                    block_id: row.get(1)?,
                    catalog_sign_id: row.get(2)?,
                    grapheme_code: row.get(3)?,
                    grapheme_logosyll: row.get(4)?,
                    grapheme_hyphenated: row.get(5)?,
                    grapheme_maya: row.get(6)?,
                    grapheme_english: row.get(7)?,
                    artifact_code: row.get(8)?,
                    location_summary: row.get(9)?,
                    block_maya1: row.get(10)?,
                    block_english: row.get(11)?,
                    event_calendar: row.get(12)?,
                    block_img: row.get(13)?,
                    mhd_code_sub: row.get(14)?,
                    syllabic_value: row.get(15)?,
                    primary_image_url: row.get(16)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(hits)
    }

    /// Distinct dropdown options for the search UI
    pub fn filter_options(&self) -> Result<FilterOptions> {
        Ok(FilterOptions {
            volumes: self.distinct("catalog_signs", "volume")?,
            word_classes: self.distinct("catalog_signs", "word_class")?,
            techniques: self.distinct("catalog_signs", "technique")?,
            distributions: self.distinct("catalog_signs", "distribution")?,
            regions: self.distinct("blocks", "region")?,
        })
    }

    fn distinct(&self, table: &str, column: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT {column} FROM {table} WHERE {column} IS NOT NULL ORDER BY {column}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(values)
    }

    // ========== Verification / Stats ==========

    fn count_table(&self, table: &str) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn count_where(&self, table: &str, predicate: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {predicate}"),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Coverage and linkage counts for the verification report
    pub fn verify_report(&self) -> Result<VerifyReport> {
        Ok(VerifyReport {
            catalog_signs: self.count_catalog_signs()?,
            catalog_signs_with_images: self
                .count_where("catalog_signs", "primary_image_url IS NOT NULL")?,
            blocks: self.count_blocks()?,
            blocks_with_images: self.count_where("blocks", "block_image1_url IS NOT NULL")?,
            blocks_with_sites: self.count_where("blocks", "site_name IS NOT NULL")?,
            graphemes: self.count_graphemes()?,
            graphemes_linked: self.count_where("graphemes", "catalog_sign_id IS NOT NULL")?,
            roboflow_instances: self.count_roboflow_instances()?,
            signs_with_roboflow: self.count_distinct_expr(
                "roboflow_instances",
                "catalog_sign_id",
                "catalog_sign_id IS NOT NULL",
            )?,
            signs_with_usage: self.count_distinct_expr(
                "graphemes",
                "catalog_sign_id",
                "catalog_sign_id IS NOT NULL",
            )?,
        })
    }

    fn count_distinct_expr(&self, table: &str, column: &str, predicate: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(DISTINCT {column}) FROM {table} WHERE {predicate}"),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            catalog_signs: self.count_catalog_signs()?,
            blocks: self.count_blocks()?,
            graphemes: self.count_graphemes()?,
            roboflow_instances: self.count_roboflow_instances()?,
            signs: self.count_signs()?,
            sign_instances: self.count_sign_instances()?,
        })
    }
}

/// Column list shared by every query that maps a full catalog sign row.
/// Keep the order in sync with [`row_to_catalog_sign`].
pub const CATALOG_SIGN_COLUMNS: &str = "cs.id, cs.mhd_code, cs.mhd_code_sub, cs.mhd_code_2003, cs.graphcode, \
     cs.thompson_code, cs.thompson_variant, cs.zender_code, cs.kettunen_code, \
     cs.kettunen_1999, cs.gronemeyer_code, cs.former_mhd_code, \
     cs.logographic_value, cs.logographic_cvc, cs.syllabic_value, \
     cs.english_translation, cs.word_class, cs.calendrical_name, \
     cs.picture_description, cs.volume, cs.technique, cs.distribution, \
     cs.primary_image_url, cs.notes, cs.created_at";

fn row_to_catalog_sign(row: &rusqlite::Row) -> rusqlite::Result<CatalogSign> {
    Ok(CatalogSign {
        id: row.get(0)?,
        mhd_code: row.get(1)?,
        mhd_code_sub: row.get(2)?,
        mhd_code_2003: row.get(3)?,
        graphcode: row.get(4)?,
        thompson_code: row.get(5)?,
        thompson_variant: row.get(6)?,
        zender_code: row.get(7)?,
        kettunen_code: row.get(8)?,
        kettunen_1999: row.get(9)?,
        gronemeyer_code: row.get(10)?,
        former_mhd_code: row.get(11)?,
        logographic_value: row.get(12)?,
        logographic_cvc: row.get(13)?,
        syllabic_value: row.get(14)?,
        english_translation: row.get(15)?,
        word_class: row.get(16)?,
        calendrical_name: row.get(17)?,
        picture_description: row.get(18)?,
        volume: row.get(19)?,
        technique: row.get(20)?,
        distribution: row.get(21)?,
        primary_image_url: row.get(22)?,
        notes: row.get(23)?,
        created_at: row.get(24)?,
    })
}

fn row_to_sign(row: &rusqlite::Row) -> rusqlite::Result<Sign> {
    Ok(Sign {
        id: row.get(0)?,
        bonn_id: row.get(1)?,
        thompson_id: row.get(2)?,
        mhd_id: row.get(3)?,
        phonetic_value: row.get(4)?,
        description: row.get(5)?,
        primary_image_url: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_sign_instance(row: &rusqlite::Row) -> rusqlite::Result<SignInstance> {
    Ok(SignInstance {
        id: row.get(0)?,
        sign_id: row.get(1)?,
        source_type: row.get(2)?,
        source_id: row.get(3)?,
        source_url: row.get(4)?,
        image_url: row.get(5)?,
        date_start: row.get(6)?,
        date_end: row.get(7)?,
        location: row.get(8)?,
        artifact_type: row.get(9)?,
        notes: row.get(10)?,
        metadata: row.get(11)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub catalog_signs: usize,
    pub blocks: usize,
    pub graphemes: usize,
    pub roboflow_instances: usize,
    pub signs: usize,
    pub sign_instances: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Catalog signs: {}", self.catalog_signs)?;
        writeln!(f, "  Blocks: {}", self.blocks)?;
        writeln!(f, "  Graphemes: {}", self.graphemes)?;
        writeln!(f, "  Roboflow instances: {}", self.roboflow_instances)?;
        writeln!(f, "  Legacy signs: {}", self.signs)?;
        writeln!(f, "  Legacy instances: {}", self.sign_instances)
    }
}

/// Dropdown options for the search UI
#[derive(Debug, Clone, serde::Serialize)]
pub struct FilterOptions {
    pub volumes: Vec<String>,
    pub word_classes: Vec<String>,
    pub techniques: Vec<String>,
    pub distributions: Vec<String>,
    pub regions: Vec<String>,
}

/// Linkage coverage for the verification report
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub catalog_signs: usize,
    pub catalog_signs_with_images: usize,
    pub blocks: usize,
    pub blocks_with_images: usize,
    pub blocks_with_sites: usize,
    pub graphemes: usize,
    pub graphemes_linked: usize,
    pub roboflow_instances: usize,
    pub signs_with_roboflow: usize,
    pub signs_with_usage: usize,
}

impl VerifyReport {
    /// Integer percentage, guarded against empty tables
    pub fn pct(part: usize, whole: usize) -> usize {
        if whole == 0 {
            0
        } else {
            part * 100 / whole
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sign(code: &str) -> NewCatalogSign {
        NewCatalogSign {
            mhd_code: code.to_string(),
            mhd_code_sub: Some(format!("{code}bt")),
            graphcode: Some(format!("{code}bt")),
            syllabic_value: Some("ba".to_string()),
            english_translation: Some("jaguar".to_string()),
            ..Default::default()
        }
    }

    fn sample_block(key: &str, artifact: &str, sort: i64) -> NewBlock {
        NewBlock {
            mhd_block_id: key.to_string(),
            artifact_code: artifact.to_string(),
            block_english: Some("lord of the mat".to_string()),
            sort_order: Some(sort),
            ..Default::default()
        }
    }

    #[test]
    fn test_catalog_sign_batch_and_lookup() {
        let mut store = CatalogStore::open_in_memory().unwrap();

        let inserted = store
            .insert_catalog_signs(&[sample_sign("0001"), sample_sign("0002")])
            .unwrap();
        assert_eq!(inserted, 2);

        let codes = store.existing_mhd_codes().unwrap();
        assert!(codes.contains("0001"));
        assert!(codes.contains("0002"));

        let map = store.graphcode_map().unwrap();
        assert_eq!(map.len(), 2);
        let id = map["0001bt"];
        let sign = store.get_catalog_sign(id).unwrap().unwrap();
        assert_eq!(sign.mhd_code, "0001");
        assert_eq!(sign.graphcode.as_deref(), Some("0001bt"));
    }

    #[test]
    fn test_block_key_map() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store
            .insert_blocks(&[sample_block("YAX-1", "YAX", 1), sample_block("PAL-2", "PAL", 2)])
            .unwrap();

        let map = store.block_key_map().unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("YAX-1"));

        let keys = store.existing_block_keys().unwrap();
        assert!(keys.contains("PAL-2"));
    }

    #[test]
    fn test_sign_instance_idempotent() {
        let store = CatalogStore::open_in_memory().unwrap();

        let sign_id = store
            .insert_sign(&NewSign {
                mhd_id: Some("1M2".to_string()),
                ..Default::default()
            })
            .unwrap();

        let instance = NewSignInstance {
            sign_id,
            source_type: "mhd".to_string(),
            source_id: "YAX--1".to_string(),
            ..Default::default()
        };

        assert!(store.insert_sign_instance(&instance).unwrap());
        // Same (source_type, source_id) again: ignored
        assert!(!store.insert_sign_instance(&instance).unwrap());
        assert_eq!(store.count_sign_instances().unwrap(), 1);
    }

    #[test]
    fn test_primary_image_promotion() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store.insert_catalog_signs(&[sample_sign("0001")]).unwrap();
        let id = store.graphcode_map().unwrap()["0001bt"];

        store
            .insert_roboflow_instances(&[NewRoboflowInstance {
                catalog_sign_id: id,
                image_url: "https://img.example/roboflow/train/a.jpg".to_string(),
                bbox_x: 1.0,
                bbox_y: 2.0,
                bbox_width: 10.0,
                bbox_height: 12.0,
                segmentation_mask: None,
                confidence: 1.0,
                dataset_split: "train".to_string(),
            }])
            .unwrap();

        let updated = store.set_primary_images_from_roboflow().unwrap();
        assert_eq!(updated, 1);

        let sign = store.get_catalog_sign(id).unwrap().unwrap();
        assert_eq!(
            sign.primary_image_url.as_deref(),
            Some("https://img.example/roboflow/train/a.jpg")
        );

        // Second run changes nothing
        assert_eq!(store.set_primary_images_from_roboflow().unwrap(), 0);
    }

    #[test]
    fn test_legacy_listing() {
        let store = CatalogStore::open_in_memory().unwrap();
        store
            .insert_sign(&NewSign {
                bonn_id: Some("ZB1".to_string()),
                phonetic_value: Some("ba".to_string()),
                ..Default::default()
            })
            .unwrap();
        store
            .insert_sign(&NewSign {
                bonn_id: Some("ZC2".to_string()),
                phonetic_value: Some("ka".to_string()),
                ..Default::default()
            })
            .unwrap();

        let all = store.list_signs("").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].sign.bonn_id.as_deref(), Some("ZB1"));

        let hits = store.list_signs("ka").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].instance_count, 0);
    }
}
