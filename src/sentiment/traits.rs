// Sentiment scorer trait.
//
// Scoring is pure CPU work over already-fetched text, so the trait is
// synchronous. Batch scoring isolates failures: one unscoreable review turns
// into one degraded score and the rest of the batch still gets scored.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Compound sentiment of a single review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Polarity from -1.0 (most negative) to 1.0 (most positive)
    pub compound: f64,
    /// True when the scorer could not handle the review and 0.0 was substituted
    pub degraded: bool,
}

impl SentimentScore {
    pub fn scored(compound: f64) -> Self {
        Self {
            compound: compound.clamp(-1.0, 1.0),
            degraded: false,
        }
    }

    pub fn degraded() -> Self {
        Self {
            compound: 0.0,
            degraded: true,
        }
    }
}

/// Trait for mapping review text to a compound sentiment score.
pub trait SentimentScorer: Send + Sync {
    /// Score a single review. Must be deterministic for a given text.
    fn score_text(&self, text: &str) -> Result<f64>;

    /// Score every review, in input order, one score per review.
    fn score_batch(&self, reviews: &[String]) -> Vec<SentimentScore> {
        reviews
            .iter()
            .enumerate()
            .map(|(i, review)| match self.score_text(review) {
                Ok(compound) if compound.is_finite() => SentimentScore::scored(compound),
                Ok(compound) => {
                    warn!(index = i, compound, "Scorer returned a non-finite score");
                    SentimentScore::degraded()
                }
                Err(e) => {
                    warn!(index = i, error = %e, "Failed to score review, using neutral");
                    SentimentScore::degraded()
                }
            })
            .collect()
    }
}
