// ReviewNormalizer: turns a product's raw reviews into a corpus document.
//
// Only exact duplicates are removed. No case folding, no whitespace cleanup:
// "Good" and "good " are different reviews. First occurrence wins, so the
// output order is the input order with repeats dropped.

use std::collections::HashSet;

/// The distinct reviews of one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedReviews {
    reviews: Vec<String>,
}

impl NormalizedReviews {
    pub fn as_slice(&self) -> &[String] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// All reviews joined into one bag-of-words document.
    pub fn document(&self) -> String {
        self.reviews.join(" ")
    }
}

/// Deduplicate a product's raw reviews.
pub fn normalize(raw: &[String]) -> NormalizedReviews {
    let mut seen: HashSet<&str> = HashSet::with_capacity(raw.len());
    let reviews = raw
        .iter()
        .filter(|review| seen.insert(review.as_str()))
        .cloned()
        .collect();
    NormalizedReviews { reviews }
}
