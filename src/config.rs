use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Object storage settings (the upload token stays in the environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub public_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlyphbaseConfig {
    pub database: Option<String>,
    pub data_dir: Option<String>,
    pub storage: Option<StorageConfig>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("glyphbase.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("glyphbase.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<GlyphbaseConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: GlyphbaseConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &GlyphbaseConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphbase.toml");

        let config = GlyphbaseConfig {
            database: Some("data/glyphbase.db".to_string()),
            data_dir: Some("data".to_string()),
            storage: Some(StorageConfig {
                endpoint: "https://storage.example".to_string(),
                bucket: "glyphs".to_string(),
                public_url: "https://img.example".to_string(),
            }),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("data/glyphbase.db"));
        assert_eq!(loaded.storage.unwrap().bucket, "glyphs");

        // Refuses to overwrite without force
        assert!(write_config(&path, &config, false).is_err());
        assert!(write_config(&path, &config, true).is_ok());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }
}
