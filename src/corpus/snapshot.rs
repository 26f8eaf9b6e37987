// CorpusSnapshot — records, index, derived entries and matrix as one value.

use tracing::debug;

use super::index::{ProductIndex, Slot};
use crate::catalog::models::ProductRecord;
use crate::reviews::normalize::{self, NormalizedReviews};
use crate::sentiment::profile::SentimentProfile;
use crate::sentiment::traits::SentimentScorer;
use crate::similarity::indexer::SimilarityIndexer;
use crate::similarity::matrix::SimilarityMatrix;

/// Derived data for one indexed product.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    pub reviews: NormalizedReviews,
    pub sentiment: SentimentProfile,
}

/// A consistent view of the corpus: row i of every field is the same product.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSnapshot {
    records: Vec<ProductRecord>,
    index: ProductIndex,
    entries: Vec<CorpusEntry>,
    matrix: SimilarityMatrix,
}

impl Default for CorpusSnapshot {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: ProductIndex::new(),
            entries: Vec::new(),
            matrix: SimilarityMatrix::empty(),
        }
    }
}

impl CorpusSnapshot {
    /// Produce the next snapshot with `record` added or replaced.
    ///
    /// `self` is left untouched. All derived data is recomputed for every
    /// product, not just the incoming one.
    pub fn with_record(
        &self,
        record: ProductRecord,
        scorer: &dyn SentimentScorer,
        indexer: &SimilarityIndexer,
    ) -> (Self, Slot) {
        let mut records = self.records.clone();
        let mut index = self.index.clone();

        let slot = index.insert(&record.title);
        match slot {
            Slot::Appended(_) => records.push(record),
            Slot::Replaced(row) => records[row] = record,
        }

        let entries: Vec<CorpusEntry> = records
            .iter()
            .map(|r| {
                let reviews = normalize::normalize(&r.reviews);
                let sentiment = SentimentProfile::new(scorer.score_batch(reviews.as_slice()));
                CorpusEntry { reviews, sentiment }
            })
            .collect();

        let documents: Vec<String> = entries.iter().map(|e| e.reviews.document()).collect();
        let matrix = indexer.build(&documents).matrix;

        debug!(
            products = records.len(),
            slot = ?slot,
            "Built next corpus snapshot"
        );

        (
            Self {
                records,
                index,
                entries,
                matrix,
            },
            slot,
        )
    }

    pub fn index(&self) -> &ProductIndex {
        &self.index
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record and derived entry for a title, matched case-insensitively.
    pub fn get(&self, title: &str) -> Option<(&ProductRecord, &CorpusEntry)> {
        let row = self.index.position(title)?;
        Some((self.records.get(row)?, self.entries.get(row)?))
    }
}
