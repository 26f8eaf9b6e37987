// SimilarityIndexer: product documents in, similarity matrix out.

use tracing::{debug, warn};

use super::matrix::SimilarityMatrix;
use super::vectorizer::{CountVectorizer, TermMatrix};

/// Result of one full index rebuild.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    pub terms: TermMatrix,
    pub matrix: SimilarityMatrix,
}

/// Rebuilds the vector space and pairwise matrix from scratch on every call.
#[derive(Default)]
pub struct SimilarityIndexer {
    vectorizer: CountVectorizer,
}

impl SimilarityIndexer {
    pub fn new(remove_stop_words: bool) -> Self {
        Self {
            vectorizer: CountVectorizer::new(remove_stop_words),
        }
    }

    /// Index one joined review document per product, in matrix order.
    pub fn build(&self, documents: &[String]) -> SimilarityIndex {
        let terms = self.vectorizer.fit_transform(documents);
        let matrix = SimilarityMatrix::from_rows(&terms.rows);

        if !documents.is_empty() && matrix.is_degenerate() {
            warn!(
                products = documents.len(),
                "No review terms in corpus, all similarities are zero"
            );
        }

        debug!(
            products = matrix.dim(),
            vocabulary = terms.vocabulary.len(),
            "Rebuilt similarity index"
        );

        SimilarityIndex { terms, matrix }
    }
}
