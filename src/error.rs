// Error taxonomy for the recommendation core.
//
// Fetch failures abort a single update cycle. Lookup failures surface to the
// caller. Neither is allowed to touch the indexed corpus.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Errors that cross the core's public boundary.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("product not found in index: {title}")]
    NotFound { title: String },

    /// Ranking was requested against a matrix with no rows.
    #[error("corpus has no indexed products")]
    DegenerateInput,
}

/// Failures from the product source collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("source returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed product record: {0}")]
    Malformed(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
