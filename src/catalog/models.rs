// Product records as produced by a ProductSource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One scraped product: identity, raw reviews, ratings and price.
///
/// Records are immutable once produced. An update replaces the prior record
/// for the same title wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    #[serde(default)]
    pub reviews: Vec<String>,
    #[serde(default)]
    pub ratings: Vec<f64>,
    #[serde(default)]
    pub price: f64,
    /// When the source produced this record
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl ProductRecord {
    pub fn new(title: impl Into<String>, reviews: Vec<String>, ratings: Vec<f64>, price: f64) -> Self {
        Self {
            title: title.into(),
            reviews,
            ratings,
            price,
            fetched_at: Utc::now(),
        }
    }

    /// Lower-cased title, the key used by the product index.
    pub fn key(&self) -> String {
        self.title.to_lowercase()
    }

    /// Reject records a source should never have produced.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.title.trim().is_empty() {
            return Err(FetchError::Malformed("product title is empty".to_string()));
        }
        if let Some(bad) = self.ratings.iter().find(|r| !r.is_finite()) {
            return Err(FetchError::Malformed(format!(
                "non-finite rating {bad} for {}",
                self.title
            )));
        }
        if !self.price.is_finite() {
            return Err(FetchError::Malformed(format!(
                "non-finite price for {}",
                self.title
            )));
        }
        Ok(())
    }

    /// Summary of the numeric ratings.
    pub fn rating_summary(&self) -> RatingSummary {
        let count = self.ratings.len();
        let mean = if count == 0 {
            None
        } else {
            Some(self.ratings.iter().sum::<f64>() / count as f64)
        };
        RatingSummary { count, mean }
    }
}

/// Count and mean of a product's ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub mean: Option<f64>,
}
