// RecommendationRanker: top-K most similar products for a target title.
//
// Candidates are every row of the target's matrix row, sorted by score
// descending. The sort is stable, so equal scores keep matrix row order.
// Whether the target itself stays in the list is an explicit option; the
// default keeps it, which means the first entry is usually the target with
// score 1.0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::index::ProductIndex;
use crate::error::{RecommendError, Result};
use crate::similarity::matrix::SimilarityMatrix;

/// Default number of recommendations.
pub const DEFAULT_TOP_K: usize = 5;

/// Upper bound on the number of recommendations, whatever `top_k` says.
pub const MAX_TOP_K: usize = 5;

/// Ranking knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    /// Maximum number of entries returned, capped at `MAX_TOP_K`
    pub top_k: usize,
    /// Keep the target product in its own candidate list
    pub include_self: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            include_self: true,
        }
    }
}

/// One recommended product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

/// Ranked recommendations, highest score first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub entries: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.entries.iter()
    }
}

/// Ranks matrix rows for a target product.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationRanker {
    pub options: RankOptions,
}

impl RecommendationRanker {
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// Top-K neighbors of `target_title`.
    ///
    /// Fails with `NotFound` when the title isn't indexed and with
    /// `DegenerateInput` when the matrix has no rows.
    pub fn rank(
        &self,
        target_title: &str,
        matrix: &SimilarityMatrix,
        index: &ProductIndex,
    ) -> Result<RecommendationResult> {
        if matrix.is_empty() {
            return Err(RecommendError::DegenerateInput);
        }

        let target = index
            .position(target_title)
            .ok_or_else(|| RecommendError::NotFound {
                title: target_title.to_string(),
            })?;

        let row = matrix.row(target).ok_or_else(|| RecommendError::NotFound {
            title: target_title.to_string(),
        })?;

        let mut candidates: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| self.options.include_self || i != target)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let entries: Vec<Recommendation> = candidates
            .into_iter()
            .take(self.options.top_k.min(MAX_TOP_K))
            .filter_map(|(i, score)| {
                index.title_at(i).map(|title| Recommendation {
                    title: title.to_string(),
                    score,
                })
            })
            .collect();

        debug!(
            target = target_title,
            returned = entries.len(),
            include_self = self.options.include_self,
            "Ranked recommendations"
        );

        Ok(RecommendationResult { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::vectorizer::TermCounts;

    fn setup(rows: Vec<Vec<(usize, u32)>>, titles: &[&str]) -> (SimilarityMatrix, ProductIndex) {
        let rows: Vec<TermCounts> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        let mut index = ProductIndex::new();
        for t in titles {
            index.insert(t);
        }
        (SimilarityMatrix::from_rows(&rows), index)
    }

    #[test]
    fn test_includes_self_by_default() {
        let (m, idx) = setup(vec![vec![(0, 1)], vec![(0, 1), (1, 1)]], &["A", "B"]);
        let result = RecommendationRanker::default().rank("a", &m, &idx).unwrap();
        assert_eq!(result.entries[0].title, "A");
        assert_eq!(result.entries[0].score, 1.0);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_exclude_self() {
        let (m, idx) = setup(vec![vec![(0, 1)], vec![(0, 1), (1, 1)]], &["A", "B"]);
        let ranker = RecommendationRanker::new(RankOptions {
            top_k: 5,
            include_self: false,
        });
        let result = ranker.rank("A", &m, &idx).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].title, "B");
    }

    #[test]
    fn test_not_found() {
        let (m, idx) = setup(vec![vec![(0, 1)]], &["A"]);
        let err = RecommendationRanker::default().rank("Z", &m, &idx).unwrap_err();
        assert!(matches!(err, RecommendError::NotFound { title } if title == "Z"));
    }

    #[test]
    fn test_empty_matrix_is_degenerate() {
        let err = RecommendationRanker::default()
            .rank("A", &SimilarityMatrix::empty(), &ProductIndex::new())
            .unwrap_err();
        assert!(matches!(err, RecommendError::DegenerateInput));
    }

    #[test]
    fn test_ties_keep_row_order_and_top_k_caps() {
        // Seven products with no terms: every off-diagonal score is 0.0
        let (m, idx) = setup(vec![Vec::new(); 7], &["A", "B", "C", "D", "E", "F", "G"]);
        let result = RecommendationRanker::default().rank("D", &m, &idx).unwrap();
        let titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "A", "B", "C", "E"]);
    }

    #[test]
    fn test_large_top_k_still_capped_at_five() {
        let (m, idx) = setup(vec![Vec::new(); 7], &["A", "B", "C", "D", "E", "F", "G"]);
        let ranker = RecommendationRanker::new(RankOptions {
            top_k: 50,
            include_self: false,
        });
        let result = ranker.rank("A", &m, &idx).unwrap();
        assert_eq!(result.len(), MAX_TOP_K);
    }
}
