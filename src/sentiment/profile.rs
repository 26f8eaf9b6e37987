// Sentiment profile — aggregate view over a product's review scores.

use serde::{Deserialize, Serialize};

use super::traits::SentimentScore;

/// Compound scores at or above this are counted as positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are counted as negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Number of histogram bins over [-1, 1].
pub const HISTOGRAM_BINS: usize = 10;

/// Aggregate sentiment for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentProfile {
    /// Per-review scores, aligned with the normalized review order
    pub scores: Vec<SentimentScore>,
}

impl SentimentProfile {
    pub fn new(scores: Vec<SentimentScore>) -> Self {
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Mean compound score over the reviews that scored cleanly.
    pub fn mean(&self) -> Option<f64> {
        let clean: Vec<f64> = self
            .scores
            .iter()
            .filter(|s| !s.degraded)
            .map(|s| s.compound)
            .collect();
        if clean.is_empty() {
            None
        } else {
            Some(clean.iter().sum::<f64>() / clean.len() as f64)
        }
    }

    pub fn degraded_count(&self) -> usize {
        self.scores.iter().filter(|s| s.degraded).count()
    }

    /// (positive, neutral, negative) counts, skipping degraded scores.
    pub fn polarity_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for score in self.scores.iter().filter(|s| !s.degraded) {
            if score.compound >= POSITIVE_THRESHOLD {
                counts.0 += 1;
            } else if score.compound <= NEGATIVE_THRESHOLD {
                counts.2 += 1;
            } else {
                counts.1 += 1;
            }
        }
        counts
    }

    /// Bucket all scores into `HISTOGRAM_BINS` equal-width bins over [-1, 1].
    ///
    /// The last bin is closed on the right so a score of exactly 1.0 lands in it.
    pub fn histogram(&self) -> [usize; HISTOGRAM_BINS] {
        let mut bins = [0usize; HISTOGRAM_BINS];
        let width = 2.0 / HISTOGRAM_BINS as f64;
        for score in &self.scores {
            let offset = (score.compound.clamp(-1.0, 1.0) + 1.0) / width;
            let bin = (offset.floor() as usize).min(HISTOGRAM_BINS - 1);
            bins[bin] += 1;
        }
        bins
    }

    /// Lower edge of histogram bin `i`.
    pub fn bin_lower_edge(i: usize) -> f64 {
        -1.0 + i as f64 * (2.0 / HISTOGRAM_BINS as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[f64]) -> SentimentProfile {
        SentimentProfile::new(values.iter().map(|&v| SentimentScore::scored(v)).collect())
    }

    #[test]
    fn test_mean_skips_degraded() {
        let mut p = profile(&[0.5, -0.1]);
        p.scores.push(SentimentScore::degraded());
        assert!((p.mean().unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(p.degraded_count(), 1);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(profile(&[]).mean(), None);
    }

    #[test]
    fn test_polarity_counts() {
        let p = profile(&[0.6, 0.05, 0.0, -0.04, -0.05, -0.9]);
        assert_eq!(p.polarity_counts(), (2, 2, 2));
    }

    #[test]
    fn test_histogram_edges() {
        let p = profile(&[-1.0, -0.95, 0.0, 0.99, 1.0]);
        let bins = p.histogram();
        assert_eq!(bins[0], 2);
        assert_eq!(bins[5], 1);
        assert_eq!(bins[9], 2);
        assert_eq!(bins.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_bin_lower_edge() {
        assert!((SentimentProfile::bin_lower_edge(0) + 1.0).abs() < 1e-12);
        assert!((SentimentProfile::bin_lower_edge(5)).abs() < 1e-12);
    }
}
