// Local JSON file source — product records stored on disk.
//
// Handy for offline runs and tests. A locator is a path to a JSON document
// holding one ProductRecord.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::models::ProductRecord;
use super::traits::ProductSource;
use crate::error::FetchError;

/// Reads product records from JSON files, optionally under a root directory.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    root: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locators against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn path_for(&self, locator: &str) -> PathBuf {
        let locator = locator.strip_prefix("file://").unwrap_or(locator);
        match &self.root {
            Some(root) if !PathBuf::from(locator).is_absolute() => root.join(locator),
            _ => PathBuf::from(locator),
        }
    }
}

#[async_trait]
impl ProductSource for JsonFileSource {
    async fn fetch(&self, locator: &str) -> Result<ProductRecord, FetchError> {
        let path = self.path_for(locator);
        debug!(path = %path.display(), "Reading product record");

        let raw = tokio::fs::read_to_string(&path).await?;
        let mut record: ProductRecord = serde_json::from_str(&raw)?;
        record.fetched_at = Utc::now();
        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new();
        let result = source.fetch("/nonexistent/reviewmatch/product.json").await;
        assert!(matches!(result, Err(FetchError::Io(_))));
    }

    #[tokio::test]
    async fn test_reads_record_relative_to_root() {
        let dir = std::env::temp_dir().join(format!("reviewmatch-file-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("kettle.json"),
            r#"{"title": "Kettle", "reviews": ["boils fast"], "ratings": [5.0], "price": 20.0}"#,
        )
        .unwrap();

        let source = JsonFileSource::with_root(&dir);
        let record = source.fetch("file://kettle.json").await.unwrap();
        assert_eq!(record.title, "Kettle");
        assert_eq!(record.reviews, vec!["boils fast".to_string()]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_malformed_json_is_malformed_error() {
        let path = std::env::temp_dir().join(format!("reviewmatch-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let source = JsonFileSource::new();
        let result = source.fetch(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(FetchError::Malformed(_))));

        std::fs::remove_file(&path).ok();
    }
}
