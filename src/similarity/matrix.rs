// Cosine similarity and the square similarity matrix.

use serde::{Deserialize, Serialize};

use super::vectorizer::TermCounts;

/// Cosine similarity between two sparse count vectors.
///
/// Returns 0.0 whenever either vector has zero magnitude, so empty documents
/// never produce NaN. Counts are non-negative, so the result is in [0, 1].
pub fn cosine_similarity(a: &TermCounts, b: &TermCounts) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let dot: f64 = small
        .iter()
        .filter_map(|(col, &x)| large.get(col).map(|&y| x as f64 * y as f64))
        .sum();
    let norm_sq_a: f64 = a.values().map(|&x| (x as f64) * (x as f64)).sum();
    let norm_sq_b: f64 = b.values().map(|&x| (x as f64) * (x as f64)).sum();

    // One square root over the product keeps integer cases exact (sqrt(4) = 2)
    let denom = (norm_sq_a * norm_sq_b).sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Symmetric N x N matrix of pairwise product similarities, unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    dim: usize,
    /// Row-major values
    values: Vec<f64>,
    /// True when every document was empty
    degenerate: bool,
}

impl SimilarityMatrix {
    /// A matrix over no products.
    pub fn empty() -> Self {
        Self {
            dim: 0,
            values: Vec::new(),
            degenerate: true,
        }
    }

    /// Compute the full pairwise matrix over the given count vectors.
    ///
    /// Only the upper triangle is computed; the lower triangle is mirrored so
    /// symmetry is exact. The diagonal is 1.0 for every product, including
    /// products with no reviews.
    pub fn from_rows(rows: &[TermCounts]) -> Self {
        let dim = rows.len();
        let mut values = vec![0.0; dim * dim];

        for i in 0..dim {
            values[i * dim + i] = 1.0;
            for j in (i + 1)..dim {
                let sim = cosine_similarity(&rows[i], &rows[j]);
                values[i * dim + j] = sim;
                values[j * dim + i] = sim;
            }
        }

        Self {
            dim,
            values,
            degenerate: rows.iter().all(|r| r.is_empty()),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// True when no product had any tokens, so every off-diagonal entry is 0.0.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.dim && j < self.dim {
            Some(self.values[i * self.dim + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.dim {
            Some(&self.values[i * self.dim..(i + 1) * self.dim])
        } else {
            None
        }
    }
}
