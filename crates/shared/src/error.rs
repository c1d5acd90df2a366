use thiserror::Error;

/// Local input rejected before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("state must be at least one character long")]
    EmptyState,
    #[error("splitter must be exactly one character, got {len}")]
    SplitterLength { len: usize },
    #[error("splitter must not be the null character")]
    NullSplitter,
}

/// A response body that could not be interpreted.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a single quoted character, got {body:?}")]
    Splitter { body: String },
}
