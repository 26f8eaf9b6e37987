// Lexicon-based compound sentiment scorer.
//
// Backed by the VADER lexicon and rule set from `vader_sentiment`: word
// valences, boosters and dampeners, negation, ALL-CAPS emphasis, "but"
// re-weighting and exclamation emphasis, squashed into [-1, 1] with
// x / sqrt(x^2 + 15). Only the compound score is used.

use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result};
use vader_sentiment::SentimentIntensityAnalyzer;

use super::traits::SentimentScorer;

/// Deterministic VADER scorer. No model files, no network.
pub struct LexiconScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn score_text(&self, text: &str) -> Result<f64> {
        if text.contains('\u{FFFD}') || text.contains('\0') {
            anyhow::bail!("review contains undecodable characters");
        }
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        // A panic inside the analyzer fails this review only
        let scores = panic::catch_unwind(AssertUnwindSafe(|| self.analyzer.polarity_scores(text)))
            .map_err(|_| anyhow::anyhow!("sentiment analyzer panicked"))?;

        let compound = scores
            .get("compound")
            .copied()
            .context("analyzer returned no compound score")?;
        Ok(compound.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().score_text(text).unwrap()
    }

    #[test]
    fn test_single_words() {
        assert!((score("good") - 0.4404).abs() < 1e-4, "got {}", score("good"));
        assert!((score("bad") + 0.5423).abs() < 1e-4, "got {}", score("bad"));
    }

    #[test]
    fn test_neutral_text() {
        assert_eq!(score("the box arrived on tuesday"), 0.0);
        assert_eq!(score(""), 0.0);
        assert_eq!(score("   "), 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let negated = score("not good");
        assert!((negated + 0.3412).abs() < 1e-4, "got {negated}");
    }

    #[test]
    fn test_booster_increases_magnitude() {
        assert!(score("very good") > score("good"));
        assert!(score("very bad") < score("bad"));
    }

    #[test]
    fn test_caps_emphasis_only_in_mixed_case() {
        assert!(score("this is GOOD") > score("this is good"));
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let s = score("the handle is bad but the kettle is great");
        assert!(s > 0.0, "second clause should dominate, got {s}");
    }

    #[test]
    fn test_exclamations_add_emphasis() {
        assert!(score("great!!") > score("great"));
    }

    #[test]
    fn test_common_review_vocabulary_is_scored() {
        assert!(score("brilliant, delighted, my favorite") > 0.5);
        assert!(score("outstanding") > 0.0);
        assert!(score("pathetic, stupid, it sucks") < -0.5);
        assert!(score("lousy and overpriced") < 0.0);
    }

    #[test]
    fn test_range() {
        let s = score("AMAZING amazing best best best perfect love love!!!!");
        assert!(s <= 1.0 && s > 0.9);
        let s = score("worst worst hated hated garbage useless");
        assert!((-1.0..-0.9).contains(&s));
    }

    #[test]
    fn test_rejects_malformed_text() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score_text("good \u{FFFD} stuff").is_err());
        assert!(scorer.score_text("nul\0byte").is_err());
    }
}
