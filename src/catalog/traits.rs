// Product source trait — the scraping collaborator's contract.
//
// Implementations may block on the network. The coordinator awaits a fetch
// to completion before touching any state, so a failed fetch mutates nothing.

use async_trait::async_trait;

use super::models::ProductRecord;
use crate::error::FetchError;

/// Something that can turn a locator (usually a URL) into a product record.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one product record.
    async fn fetch(&self, locator: &str) -> Result<ProductRecord, FetchError>;
}
