//! Object storage uploads
//!
//! Images live in an S3-compatible bucket and are referenced by URL
//! only. Uploads are a plain authenticated PUT of the file body; the
//! returned URL is what gets stored in the database.

use std::path::Path;
use std::time::Duration;

use crate::config::StorageConfig;
use crate::{Error, Result};

/// Environment variable carrying the upload token
pub const TOKEN_ENV: &str = "GLYPHBASE_STORAGE_TOKEN";

/// Content type for an image file, by extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Blocking uploader for an S3-compatible bucket
pub struct ObjectStore {
    client: reqwest::blocking::Client,
    endpoint: String,
    bucket: String,
    public_url: String,
    token: String,
}

impl ObjectStore {
    /// Build from config; the token comes from the environment
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| Error::Upload(format!("{} is not set", TOKEN_ENV)))?;
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Upload a local file under `key` and return its public URL
    pub fn put_object(&self, local_path: &Path, key: &str) -> Result<String> {
        let body = std::fs::read(local_path)?;
        let url = format!("{}/{}/{}", self.endpoint, self.bucket, key);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, content_type_for(local_path))
            .body(body)
            .send()?;

        if !response.status().is_success() {
            return Err(Error::Upload(format!(
                "PUT {} returned {}",
                url,
                response.status()
            )));
        }

        Ok(self.object_url(key))
    }

    /// Public URL of an object, without uploading
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(&PathBuf::from("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(&PathBuf::from("b.png")), "image/png");
        assert_eq!(content_type_for(&PathBuf::from("c.webp")), "image/webp");
        assert_eq!(
            content_type_for(&PathBuf::from("d.tiff")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(&PathBuf::from("noext")),
            "application/octet-stream"
        );
    }
}
