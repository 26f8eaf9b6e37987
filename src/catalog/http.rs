// HTTP product source — fetches product records as JSON.
//
// Locators are either absolute URLs or paths resolved against the configured
// base URL. The endpoint is expected to return a ProductRecord document;
// markup extraction lives upstream of this service.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::models::ProductRecord;
use super::traits::ProductSource;
use crate::error::FetchError;

/// Default base URL for relative locators.
pub const DEFAULT_SOURCE_URL: &str = "http://localhost:8080";

/// Thin reqwest wrapper that fetches one product record per locator.
pub struct HttpProductSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductSource {
    /// Create a source for the given base URL with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("reviewmatch/0.1")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a locator to the URL that will actually be requested.
    pub fn resolve(&self, locator: &str) -> String {
        let locator = locator.trim();
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            format!("{}/{}", self.base_url, locator.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch(&self, locator: &str) -> Result<ProductRecord, FetchError> {
        let url = self.resolve(locator);

        debug!(url = %url, "Fetching product record");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let mut record: ProductRecord = response.json().await?;
        record.fetched_at = Utc::now();
        record.validate()?;

        debug!(
            title = %record.title,
            reviews = record.reviews.len(),
            ratings = record.ratings.len(),
            "Fetched product record"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_locator() {
        let source = HttpProductSource::new("http://shop.test/", Duration::from_secs(5)).unwrap();
        assert_eq!(source.resolve("/products/42"), "http://shop.test/products/42");
        assert_eq!(source.resolve("products/42"), "http://shop.test/products/42");
    }

    #[test]
    fn test_resolve_absolute_locator() {
        let source = HttpProductSource::new("http://shop.test", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.resolve("https://other.test/p/1"),
            "https://other.test/p/1"
        );
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let source = HttpProductSource::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = source.fetch("products/1").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
