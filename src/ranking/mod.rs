// Recommendation ranking — top-K neighbors from the similarity matrix.

pub mod ranker;
