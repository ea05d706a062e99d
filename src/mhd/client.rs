//! Paging client for the MHD JSON API
//!
//! Log in, walk the search endpoint in fixed-size pages, deduplicate by
//! the export's key field, and hand the full record set back for
//! writing to disk.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.mayadatabase.org";

/// Records fetched per request (the site pages in batches of 50)
pub const PAGE_SIZE: usize = 50;

/// Which export to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Catalog,
    Blocks,
    Graphemes,
}

impl ExportKind {
    /// The API's searchtype parameter
    pub fn search_type(&self) -> &'static str {
        match self {
            ExportKind::Catalog => "catalog",
            ExportKind::Blocks => "blocks",
            ExportKind::Graphemes => "graphemes",
        }
    }

    /// Field used to deduplicate records across pages
    pub fn key_field(&self) -> &'static str {
        match self {
            ExportKind::Catalog => "codeid",
            ExportKind::Blocks | ExportKind::Graphemes => "blsort",
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "catalog" => Ok(ExportKind::Catalog),
            "blocks" => Ok(ExportKind::Blocks),
            "graphemes" => Ok(ExportKind::Graphemes),
            _ => Err(format!("Unknown export kind: {}", s)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    counts: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Dedup key of one record, stringified so integer and text ids compare
/// the same way
pub fn record_key(record: &Value, field: &str) -> Option<String> {
    match record.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Blocking client for the MHD API
pub struct MhdClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl MhdClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Log in and keep the bearer token for subsequent requests
    pub fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let url = format!("{}/v1/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?
            .error_for_status()?;
        let login: LoginResponse = response.json()?;
        match login.token {
            Some(token) => {
                self.token = Some(token);
                Ok(())
            }
            None => Err(Error::Import("login response carried no token".to_string())),
        }
    }

    /// Fetch every record of one export kind, deduplicated.
    ///
    /// `on_progress` is called with the running record count after each
    /// page so the caller can drive a progress display.
    pub fn fetch_all<F>(&self, kind: ExportKind, mut on_progress: F) -> Result<Vec<Value>>
    where
        F: FnMut(usize, Option<u64>),
    {
        let mut records: Vec<Value> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut skip = 0usize;
        let mut total: Option<u64> = None;

        loop {
            let url = format!("{}/v1/main/maya", self.base_url);
            let mut request = self.client.get(&url).query(&[
                ("searchtype", kind.search_type().to_string()),
                ("skip", skip.to_string()),
                ("take", PAGE_SIZE.to_string()),
            ]);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let page: ApiPage = request.send()?.error_for_status()?.json()?;
            if !page.success {
                return Err(Error::Import(format!(
                    "MHD API reported failure at offset {}",
                    skip
                )));
            }
            if page.counts.is_some() {
                total = page.counts;
            }

            let fetched = page.data.len();
            for record in page.data {
                match record_key(&record, kind.key_field()) {
                    Some(key) if !seen.insert(key.clone()) => {}
                    _ => records.push(record),
                }
            }

            on_progress(records.len(), total);

            skip += PAGE_SIZE;
            if fetched < PAGE_SIZE {
                break;
            }
            if let Some(total) = total {
                if records.len() as u64 >= total {
                    break;
                }
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_kind_parse() {
        assert_eq!("catalog".parse::<ExportKind>().unwrap(), ExportKind::Catalog);
        assert_eq!("Blocks".parse::<ExportKind>().unwrap(), ExportKind::Blocks);
        assert!("codices".parse::<ExportKind>().is_err());
    }

    #[test]
    fn test_record_key_handles_numbers_and_strings() {
        let record = json!({"codeid": 123, "blsort": "A-7"});
        assert_eq!(record_key(&record, "codeid").as_deref(), Some("123"));
        assert_eq!(record_key(&record, "blsort").as_deref(), Some("A-7"));
        assert_eq!(record_key(&record, "missing"), None);
    }

    #[test]
    fn test_dedup_by_key_field() {
        let pages = vec![
            json!({"blsort": 1, "blengl": "first"}),
            json!({"blsort": 2, "blengl": "second"}),
            json!({"blsort": 1, "blengl": "repeat"}),
        ];
        let mut seen = HashSet::new();
        let kept: Vec<_> = pages
            .into_iter()
            .filter(|r| match record_key(r, "blsort") {
                Some(key) => seen.insert(key),
                None => true,
            })
            .collect();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0]["blengl"], "first");
    }
}
