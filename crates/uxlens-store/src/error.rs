//! Storage-tier error types.

use thiserror::Error;

/// Errors from the history stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Selecting an id that is not in the retained history is a caller
    /// error; a missing blob for a retained id is not (that is the
    /// degraded-read path, not an error).
    #[error("Unknown session: {id}")]
    UnknownSession { id: String },

    #[error("Ambiguous session prefix '{prefix}': matches {count} sessions")]
    AmbiguousPrefix { prefix: String, count: usize },

    #[error("No sessions match prefix '{prefix}'")]
    PrefixNotFound { prefix: String },

    /// The serialized metadata list exceeds the tier's byte quota.
    #[error("Metadata quota exceeded: {size} bytes > {quota} bytes")]
    QuotaExceeded { size: usize, quota: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
