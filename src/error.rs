//! Crate-level error types.
//!
//! [`RibbonError`] unifies every error source (configuration, HTTP, JSON,
//! payload validation, terminal I/O) behind a single enum so callers can
//! match on the variant they care about while still using the `?` operator.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RibbonError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum RibbonError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// The market-data request failed or returned a non-2xx status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed as JSON but did not have the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A single entry of the market-data array failed validation.
    #[error("malformed sample at index {index}: {reason}")]
    MalformedSample { index: usize, reason: String },

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),
}
