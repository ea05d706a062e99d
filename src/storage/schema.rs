//! Database schema definitions
//!
//! Columns that arrived through one-off migrations (roboflow bbox
//! columns, block geo columns, the sign_instances uniqueness index) are
//! folded into the base DDL here. All statements are idempotent.

/// SQL to create the catalog_signs table - master list of all Maya signs
/// with cross-references
pub const CREATE_CATALOG_SIGNS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS catalog_signs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,

    -- MHD identifiers
    mhd_code TEXT NOT NULL UNIQUE,
    mhd_code_sub TEXT,
    mhd_code_2003 TEXT,
    graphcode TEXT,

    -- Cross-catalog codes (for search by different systems)
    thompson_code TEXT,
    thompson_variant TEXT,
    zender_code TEXT,
    kettunen_code TEXT,
    kettunen_1999 TEXT,
    gronemeyer_code TEXT,
    former_mhd_code TEXT,

    -- Linguistic data
    logographic_value TEXT,
    logographic_cvc TEXT,
    syllabic_value TEXT,
    english_translation TEXT,
    word_class TEXT,
    calendrical_name TEXT,

    -- Visual/contextual metadata
    picture_description TEXT,
    volume TEXT,
    technique TEXT,
    distribution TEXT,

    primary_image_url TEXT,

    notes TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the blocks table - glyph blocks (words composed of 1+
/// graphemes)
pub const CREATE_BLOCKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS blocks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    mhd_block_id TEXT NOT NULL UNIQUE,

    -- Location/artifact metadata
    artifact_code TEXT NOT NULL,
    surface_page TEXT,
    orientation_frame TEXT,
    coordinate TEXT,

    -- Block-level linguistic data
    block_logosyll TEXT,
    block_hyphenated TEXT,
    block_maya1 TEXT,
    block_maya2 TEXT,
    block_english TEXT,
    block_graphcodes TEXT,

    -- Date fields (multiple calendar systems)
    event_calendar TEXT,
    event_long_count TEXT,
    event_260_day TEXT,
    event_365_day TEXT,

    -- Geographic/contextual
    region_origin TEXT,
    site_origin TEXT,
    region_dest TEXT,
    site_dest TEXT,
    person_code TEXT,
    scribe TEXT,
    material TEXT,
    technique TEXT,
    artifact_type TEXT,
    object_description TEXT,

    semantic_context TEXT,
    notes TEXT,

    -- Images
    block_image1_url TEXT,
    block_image2_url TEXT,
    image_notes TEXT,

    -- Resolved site geography (geo backfill)
    site_code TEXT,
    site_name TEXT,
    region TEXT,
    latitude REAL,
    longitude REAL,

    -- Sorting
    sort_order INTEGER,

    created_at TEXT DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the graphemes table - individual sign occurrences
/// within blocks
pub const CREATE_GRAPHEMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS graphemes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,

    -- Links
    block_id INTEGER NOT NULL,
    catalog_sign_id INTEGER,

    -- Grapheme-specific data
    grapheme_code TEXT NOT NULL,
    grapheme_logosyll TEXT,
    grapheme_hyphenated TEXT,
    grapheme_maya TEXT,
    grapheme_english TEXT,

    -- For quick filtering without joins
    artifact_code TEXT,
    location_summary TEXT,

    FOREIGN KEY (block_id) REFERENCES blocks(id),
    FOREIGN KEY (catalog_sign_id) REFERENCES catalog_signs(id)
)
"#;

/// SQL to create the roboflow_instances table - segmented training data
pub const CREATE_ROBOFLOW_INSTANCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS roboflow_instances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    catalog_sign_id INTEGER NOT NULL,
    image_url TEXT NOT NULL,
    bbox_x REAL NOT NULL,
    bbox_y REAL NOT NULL,
    bbox_width REAL NOT NULL,
    bbox_height REAL NOT NULL,
    segmentation_mask TEXT,
    confidence REAL DEFAULT 1.0,
    dataset_split TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (catalog_sign_id) REFERENCES catalog_signs(id)
)
"#;

/// SQL to create the legacy signs table (used by the early pages)
pub const CREATE_SIGNS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS signs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bonn_id TEXT,
    thompson_id TEXT,
    mhd_id TEXT,
    phonetic_value TEXT,
    description TEXT,
    primary_image_url TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the legacy sign_instances table
pub const CREATE_SIGN_INSTANCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sign_instances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sign_id INTEGER NOT NULL,
    source_type TEXT NOT NULL,
    source_id TEXT NOT NULL,
    source_url TEXT,
    image_url TEXT,
    date_start TEXT,
    date_end TEXT,
    location TEXT,
    artifact_type TEXT,
    notes TEXT,
    metadata TEXT,
    FOREIGN KEY (sign_id) REFERENCES signs(id)
)
"#;

/// SQL to create the sources reference table
pub const CREATE_SOURCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    short_code TEXT NOT NULL UNIQUE,
    base_url TEXT NOT NULL,
    requires_login BOOLEAN NOT NULL DEFAULT 0
)
"#;

/// Seed rows for the sources table
pub const SEED_SOURCES: &str = r#"
INSERT OR IGNORE INTO sources (name, short_code, base_url, requires_login) VALUES
('Maya Hieroglyphic Database', 'mhd', 'https://www.mayadatabase.org/', 1),
('Kerr Maya Vase Database', 'kerr', 'http://mayavase.com/', 0),
('Corpus of Maya Hieroglyphic Inscriptions', 'cmhi', 'https://peabody.harvard.edu/sites-online', 0),
('Roboflow Dataset', 'roboflow', 'https://universe.roboflow.com/maya-glyphs/', 0)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    // Search by catalog codes
    "CREATE INDEX IF NOT EXISTS idx_catalog_mhd ON catalog_signs(mhd_code)",
    "CREATE INDEX IF NOT EXISTS idx_catalog_graphcode ON catalog_signs(graphcode)",
    "CREATE INDEX IF NOT EXISTS idx_catalog_thompson ON catalog_signs(thompson_code)",
    "CREATE INDEX IF NOT EXISTS idx_catalog_english ON catalog_signs(english_translation)",
    "CREATE INDEX IF NOT EXISTS idx_catalog_wordclass ON catalog_signs(word_class)",
    // Filter blocks by location/date
    "CREATE INDEX IF NOT EXISTS idx_blocks_artifact ON blocks(artifact_code)",
    "CREATE INDEX IF NOT EXISTS idx_blocks_sort ON blocks(sort_order)",
    // Quick grapheme lookups
    "CREATE INDEX IF NOT EXISTS idx_graphemes_code ON graphemes(grapheme_code)",
    "CREATE INDEX IF NOT EXISTS idx_graphemes_block ON graphemes(block_id)",
    "CREATE INDEX IF NOT EXISTS idx_graphemes_catalog ON graphemes(catalog_sign_id)",
    "CREATE INDEX IF NOT EXISTS idx_graphemes_artifact ON graphemes(artifact_code)",
    // Roboflow lookups
    "CREATE INDEX IF NOT EXISTS idx_roboflow_catalog ON roboflow_instances(catalog_sign_id)",
    // Legacy tables: no duplicate instances for the same source row
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_sign_instances_source ON sign_instances(source_type, source_id)",
    "CREATE INDEX IF NOT EXISTS idx_signs_mhd ON signs(mhd_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_CATALOG_SIGNS_TABLE,
        CREATE_BLOCKS_TABLE,
        CREATE_GRAPHEMES_TABLE,
        CREATE_ROBOFLOW_INSTANCES_TABLE,
        CREATE_SIGNS_TABLE,
        CREATE_SIGN_INSTANCES_TABLE,
        CREATE_SOURCES_TABLE,
        SEED_SOURCES,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
