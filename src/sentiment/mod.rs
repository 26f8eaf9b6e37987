// Sentiment scoring — per-review compound polarity and product-level profiles.
//
// The SentimentScorer trait is the seam. LexiconScorer is the built-in,
// deterministic implementation; a model-backed scorer can replace it without
// touching the coordinator.

pub mod lexicon;
pub mod profile;
pub mod traits;
