// Key terms of a product's reviews, for display.
//
// Uses the `keyword_extraction` TF-IDF with each review as its own document:
// words every review repeats get downweighted, words particular to a few
// reviews get boosted. Has no effect on similarity, which uses raw counts.

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::debug;

/// Top `n` distinctive terms across the given reviews, highest score first.
///
/// Returns an empty list when there is nothing to rank.
pub fn key_terms(reviews: &[String], n: usize) -> Vec<(String, f32)> {
    if reviews.is_empty() || n == 0 {
        return Vec::new();
    }

    let stop_words: Vec<String> = get(LANGUAGE::English);
    let params = TfIdfParams::UnprocessedDocuments(reviews, &stop_words, None);
    let tfidf = TfIdf::new(params);
    let ranked = tfidf.get_ranked_word_scores(n);

    debug!(reviews = reviews.len(), terms = ranked.len(), "Extracted key terms");

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reviews() {
        assert!(key_terms(&[], 5).is_empty());
        assert!(key_terms(&["great kettle".to_string()], 0).is_empty());
    }

    #[test]
    fn test_extracts_content_words() {
        let reviews = vec![
            "The kettle boils water quickly and the handle stays cool".to_string(),
            "Kettle lid broke after a week, disappointing kettle".to_string(),
            "Handle feels sturdy, water tastes clean".to_string(),
        ];
        let terms = key_terms(&reviews, 5);
        assert!(!terms.is_empty());
        assert!(terms.len() <= 5);
        assert!(terms.iter().all(|(t, _)| t != "the"));
    }
}
