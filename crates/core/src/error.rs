//! Error types for ainura-core.

use crate::content::ContentKind;
use thiserror::Error;

/// Errors raised by the content pool, persistence, and ranking entry points.
///
/// Ranking itself is total over well-formed items; the only ranking failure
/// is a reference that is absent from the pool.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// No item with this `(kind, id)` exists in the pool.
    #[error("{kind} {id} not found")]
    NotFound { kind: ContentKind, id: u64 },

    /// A path segment or query value did not name a content kind.
    #[error("unknown content type '{0}'")]
    UnknownKind(String),

    /// An explicit id collided with an existing item of the same kind.
    #[error("{kind} {id} already exists")]
    Duplicate { kind: ContentKind, id: u64 },

    /// Input failed validation.
    #[error("invalid item: {0}")]
    Invalid(String),

    /// Filesystem failure while reading or writing listing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A listing file or payload was not valid JSON for its schema.
    #[error("malformed listing: {0}")]
    Json(#[from] serde_json::Error),

    /// A listing file on disk could not be parsed.
    #[error("malformed listing file {path}: {source}")]
    MalformedListing {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for results in this crate.
pub type GalleryResult<T> = Result<T, GalleryError>;
