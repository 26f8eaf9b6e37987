// Review-text similarity — term-frequency vectors and pairwise cosine.
//
// Every rebuild starts from scratch: a fresh vocabulary over all current
// product documents, one count vector per product, and a full N x N matrix.

pub mod indexer;
pub mod matrix;
pub mod vectorizer;
