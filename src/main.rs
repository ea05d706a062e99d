//! Glyphbase CLI - searchable Maya sign catalog and import pipeline

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use glyphbase::config;
use glyphbase::import;
use glyphbase::import::roboflow::ImageSource;
use glyphbase::mhd::{ExportKind, MhdClient};
use glyphbase::objstore::ObjectStore;
use glyphbase::storage::{CatalogStore, VerifyReport};
use glyphbase::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "glyphbase")]
#[command(version = "0.0.1")]
#[command(about = "Research data portal for Maya hieroglyphic signs")]
#[command(long_about = r#"
Glyphbase maintains a searchable catalog of Maya hieroglyphic signs:
  • SQLite catalog of signs, inscription blocks, and graphemes
  • HTTP JSON API for the portal frontend
  • Batch imports for MHD exports, Roboflow COCO annotations,
    and the LMGG concordance

Example usage:
  glyphbase init
  glyphbase import-catalog --file data/mhd-catalog-all.json
  glyphbase import-blocks --file data/mhd-blocks-all.json
  glyphbase import-graphemes --file data/mhd-graphemes-all.json
  glyphbase backfill-geo
  glyphbase serve --port 3000
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema and a starter config file
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Overwrite an existing glyphbase.toml
        #[arg(long)]
        force: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import the MHD catalog export into catalog_signs
    ImportCatalog {
        /// Path to mhd-catalog-all.json
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import the MHD blocks export into blocks
    ImportBlocks {
        /// Path to mhd-blocks-all.json
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import the MHD graphemes export into graphemes
    ImportGraphemes {
        /// Path to mhd-graphemes-all.json
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import Roboflow COCO annotation splits into roboflow_instances
    ImportRoboflow {
        /// Dataset directory containing train/valid/test splits
        #[arg(long)]
        dir: PathBuf,

        /// Upload crop images to object storage (default: link only)
        #[arg(long)]
        upload: bool,

        /// Public image base URL when not uploading
        #[arg(long)]
        public_url: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import the LMGG concordance table into the legacy signs table
    ImportConcordance {
        /// Path to the concordance HTML file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import the grapheme export into the legacy signs/sign_instances
    ImportLegacy {
        /// Path to mhd-graphemes-all.json
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Resolve block artifact codes to sites and fill the geo columns
    BackfillGeo {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Promote the first Roboflow image of each sign to its primary image
    SetPrimaryImages {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Fetch a full export from the MHD API and write it to disk
    FetchMhd {
        /// Which export to fetch (catalog, blocks, graphemes)
        #[arg(short, long)]
        kind: ExportKind,

        /// Output JSON file
        #[arg(short, long)]
        out: PathBuf,

        /// API base URL
        #[arg(long, default_value = glyphbase::mhd::DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Print the data verification report
    Verify {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show row counts for every table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

/// CLI flag beats config file beats glyphbase.db
fn resolve_database(cli_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path);
    }
    if let Some(config) = config::load_config(None)? {
        if let Some(database) = config.database {
            return Ok(PathBuf::from(database));
        }
    }
    Ok(config::default_database_path())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { database, force } => {
            let database = resolve_database(database)?;
            config::ensure_db_dir(&database)?;

            ui::info("Database", &database.display().to_string());
            let store = CatalogStore::open(&database)?;
            ui::success("Database schema initialized");

            let config_path = config::default_config_path();
            if !config_path.exists() || force {
                let starter = config::GlyphbaseConfig {
                    database: Some(database.to_string_lossy().to_string()),
                    data_dir: Some("data".to_string()),
                    storage: None,
                };
                config::write_config(&config_path, &starter, force)?;
                ui::success(&format!("Wrote {}", config_path.display()));
            }

            println!("{}", store.stats()?);
        }

        Commands::Serve { port, database } => {
            let database = resolve_database(database)?;
            if !database.exists() {
                anyhow::bail!("database {:?} does not exist (run `glyphbase init` first)", database);
            }
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(glyphbase::server::start_server(port, database))?;
        }

        Commands::ImportCatalog { file, database } => {
            let database = resolve_database(database)?;
            println!("🚀 Starting catalog import");
            println!("📂 Reading {:?}", file);
            let mut store = CatalogStore::open(&database)?;
            let report = import::catalog::run(&mut store, &file)?;
            if report.inserted == 0 && report.skipped > 0 {
                ui::success("All catalog signs already imported");
            } else {
                ui::success(&format!("Catalog import: {}", report));
            }
        }

        Commands::ImportBlocks { file, database } => {
            let database = resolve_database(database)?;
            println!("🚀 Starting blocks import");
            println!("📂 Reading {:?}", file);
            let mut store = CatalogStore::open(&database)?;
            let report = import::blocks::run(&mut store, &file)?;
            if report.inserted == 0 && report.skipped > 0 {
                ui::success("All blocks already imported");
            } else {
                ui::success(&format!("Blocks import: {}", report));
            }
        }

        Commands::ImportGraphemes { file, database } => {
            let database = resolve_database(database)?;
            println!("🚀 Starting graphemes import");
            println!("📂 Reading {:?}", file);
            let mut store = CatalogStore::open(&database)?;
            let report = import::graphemes::run(&mut store, &file)?;
            ui::success(&format!("Graphemes import: {}", report));
        }

        Commands::ImportRoboflow { dir, upload, public_url, database } => {
            let database = resolve_database(database)?;
            println!("📥 Importing Roboflow instances from {:?}", dir);
            let mut store = CatalogStore::open(&database)?;

            let loaded_config = config::load_config(None)?;
            let storage_config = loaded_config.and_then(|c| c.storage);

            let report = if upload {
                let storage_config = storage_config
                    .ok_or_else(|| anyhow::anyhow!("--upload requires a [storage] section in glyphbase.toml"))?;
                let object_store = ObjectStore::from_config(&storage_config)?;
                import::roboflow::run(&mut store, &dir, &ImageSource::Upload(&object_store))?
            } else {
                let public_url = public_url
                    .or_else(|| storage_config.map(|c| c.public_url))
                    .ok_or_else(|| anyhow::anyhow!("pass --public-url or configure [storage] in glyphbase.toml"))?;
                import::roboflow::run(&mut store, &dir, &ImageSource::Linked { public_url })?
            };

            ui::success(&format!("Imported {} Roboflow instances", report.imported));
            if report.skipped > 0 {
                ui::warn(&format!("Skipped {} instances", report.skipped));
            }
            if !report.unmatched.is_empty() {
                println!("\n📝 Sample unmatched codes:");
                for code in report.unmatched_sample(20) {
                    println!("   - {}", code);
                }
            }
        }

        Commands::ImportConcordance { file, database } => {
            let database = resolve_database(database)?;
            println!("📥 Importing LMGG concordance from {:?}", file);
            let mut store = CatalogStore::open(&database)?;
            let report = import::concordance::run(&mut store, &file)?;
            ui::success(&format!("Concordance import: {}", report));
        }

        Commands::ImportLegacy { file, database } => {
            let database = resolve_database(database)?;
            println!("🚀 Starting legacy import");
            println!("📂 Reading {:?}", file);
            let mut store = CatalogStore::open(&database)?;
            let report = import::legacy::run(&mut store, &file)?;
            ui::success(&format!("Legacy import: {}", report));
        }

        Commands::BackfillGeo { database } => {
            let database = resolve_database(database)?;
            println!("🌍 Resolving block sites");
            let mut store = CatalogStore::open(&database)?;
            let report = import::backfill::backfill_geo(&mut store)?;

            ui::success(&format!(
                "Mapped {} blocks ({} unmapped)",
                report.mapped, report.unmapped
            ));
            if !report.unmapped_codes.is_empty() {
                println!("\nUnmapped site codes (top 20):");
                for code in report.unmapped_sample(20) {
                    println!("  - {}", code);
                }
            }
            println!("\nBlocks by region:");
            for (region, count) in &report.regions {
                println!("  {:<15} {}", region, count);
            }
        }

        Commands::SetPrimaryImages { database } => {
            let database = resolve_database(database)?;
            println!("🖼️  Setting primary images from Roboflow instances");
            let store = CatalogStore::open(&database)?;
            let updated = store.set_primary_images_from_roboflow()?;
            ui::success(&format!("Updated {} catalog signs with primary images", updated));

            let report = store.verify_report()?;
            println!("\n📊 Coverage:");
            println!("   Total signs: {}", report.catalog_signs);
            println!("   With images: {}", report.catalog_signs_with_images);
            println!(
                "   Coverage: {}%",
                VerifyReport::pct(report.catalog_signs_with_images, report.catalog_signs)
            );
        }

        Commands::FetchMhd { kind, out, base_url } => {
            let email = std::env::var("MHD_EMAIL")
                .map_err(|_| anyhow::anyhow!("MHD_EMAIL is not set"))?;
            let password = std::env::var("MHD_PASSWORD")
                .map_err(|_| anyhow::anyhow!("MHD_PASSWORD is not set"))?;

            ui::header(&format!("Fetching MHD {} export", kind.search_type()));
            let spinner = ui::Spinner::new(&format!("Logging in to {}", base_url));
            let mut client = MhdClient::new(base_url)?;
            client.login(&email, &password)?;
            spinner.finish_with_message("Logged in");

            let records = client.fetch_all(kind, |count, total| match total {
                Some(total) => println!("📡 {}/{}", count, total),
                None => println!("📡 {}", count),
            })?;

            std::fs::write(&out, serde_json::to_string_pretty(&records)?)?;
            ui::success(&format!("Wrote {} records to {:?}", records.len(), out));
        }

        Commands::Verify { database } => {
            let database = resolve_database(database)?;
            let store = CatalogStore::open(&database)?;
            let report = store.verify_report()?;

            println!("📊 Data Verification Report");

            ui::section(&format!("Catalog signs: {}", report.catalog_signs));
            ui::summary_row(
                "With images:",
                &format!(
                    "{} ({}%)",
                    report.catalog_signs_with_images,
                    VerifyReport::pct(report.catalog_signs_with_images, report.catalog_signs)
                ),
            );

            ui::section(&format!("Blocks: {}", report.blocks));
            ui::summary_row(
                "With images:",
                &format!(
                    "{} ({}%)",
                    report.blocks_with_images,
                    VerifyReport::pct(report.blocks_with_images, report.blocks)
                ),
            );
            ui::summary_row(
                "With sites:",
                &format!(
                    "{} ({}%)",
                    report.blocks_with_sites,
                    VerifyReport::pct(report.blocks_with_sites, report.blocks)
                ),
            );

            ui::section(&format!("Graphemes: {}", report.graphemes));
            ui::summary_row(
                "Linked to catalog:",
                &format!(
                    "{} ({}%)",
                    report.graphemes_linked,
                    VerifyReport::pct(report.graphemes_linked, report.graphemes)
                ),
            );

            ui::section(&format!("Roboflow instances: {}", report.roboflow_instances));
            ui::summary_row("Unique signs covered:", &report.signs_with_roboflow.to_string());

            ui::section(&format!("Signs with corpus usage: {}", report.signs_with_usage));
            println!();
            ui::success("All data sources are connected");
        }

        Commands::Stats { database } => {
            let database = resolve_database(database)?;
            let store = CatalogStore::open(&database)?;
            let stats = store.stats()?;

            ui::status(ui::Icons::DATABASE, "Database", &database.display().to_string());
            println!(
                "{}",
                ui::stats_table(&[
                    ("catalog_signs", stats.catalog_signs),
                    ("blocks", stats.blocks),
                    ("graphemes", stats.graphemes),
                    ("roboflow_instances", stats.roboflow_instances),
                    ("signs (legacy)", stats.signs),
                    ("sign_instances (legacy)", stats.sign_instances),
                ])
            );
        }
    }

    Ok(())
}
