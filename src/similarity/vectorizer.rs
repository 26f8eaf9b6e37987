// Count vectorizer with a shared vocabulary.
//
// Text is lower-cased and split into tokens of two or more Unicode word
// characters.
// The vocabulary is sorted, so column order only depends on the set of terms.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use regex::Regex;
use stop_words::{get, LANGUAGE};

/// Sparse term counts for one document: column -> count.
pub type TermCounts = BTreeMap<usize, u32>;

/// Vocabulary plus one sparse count vector per document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<TermCounts>,
}

impl TermMatrix {
    /// Look up a term's column.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }
}

/// Tokenizes documents and counts terms against a vocabulary rebuilt per call.
pub struct CountVectorizer {
    token_pattern: Regex,
    stop_words: HashSet<String>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl CountVectorizer {
    /// Create a vectorizer, optionally dropping English stop words.
    pub fn new(remove_stop_words: bool) -> Self {
        let stop_words = if remove_stop_words {
            get(LANGUAGE::English).into_iter().collect()
        } else {
            HashSet::new()
        };
        Self {
            token_pattern: Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"),
            stop_words,
        }
    }

    /// Split a document into lower-cased tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_pattern
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Build the vocabulary over all documents and count each document's terms.
    pub fn fit_transform(&self, documents: &[String]) -> TermMatrix {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.tokenize(d)).collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let column_of: BTreeMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts = TermCounts::new();
                for token in tokens {
                    if let Some(&col) = column_of.get(token.as_str()) {
                        *counts.entry(col).or_insert(0) += 1;
                    }
                }
                counts
            })
            .collect();

        TermMatrix { vocabulary, rows }
    }
}
