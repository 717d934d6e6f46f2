//! Error types for content rendering
//!
//! None of these reach the callers of the public entry points. They travel inside the crate as
//! `Result` values and end up in a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink).

use thiserror::Error;

/// Errors raised while resolving or rendering content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The value looked like a document but did not decode into one
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// The value is neither HTML, a document, nor a `body` wrapper
    #[error("unsupported content shape: {0}")]
    UnsupportedShape(&'static str),

    /// The tree nests deeper than the configured limit
    #[error("document nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },

    /// The writer was driven out of order (e.g. an attribute with no open tag)
    #[error("invalid markup: {0}")]
    InvalidMarkup(String),
}

/// Result alias used throughout the crate.
pub type ContentResult<T> = Result<T, ContentError>;
