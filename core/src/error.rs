//! Error types for the document-store client core.
//!
//! # Design
//! `ValidationError` is raised while assembling a batch, before any request
//! exists; it names the position of the first offending item. `ApiError`
//! covers everything that can go wrong while building or parsing HTTP
//! exchanges. `NotFound` keeps a dedicated variant because callers
//! frequently distinguish "the document does not exist" from "the server
//! returned an unexpected status."

use thiserror::Error;

/// A multi-get batch is internally inconsistent.
///
/// Checks run per item in order (tenant, index, id); the first violation
/// encountered aborts construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An item's tenant differs from the first item's tenant.
    #[error(
        "inconsistent tenantId at position {position}: expected {expected:?}, found {found:?}"
    )]
    InconsistentTenantId {
        position: usize,
        expected: Option<String>,
        found: Option<String>,
    },

    /// An item has an empty or whitespace-only index.
    #[error("missing index at position {position}")]
    MissingIndex { position: usize },

    /// An item has an empty or whitespace-only id.
    #[error("missing id at position {position}")]
    MissingId { position: usize },
}

/// Errors returned by `DataObjectClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested document or index does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one (and not 404).
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request was rejected before it was built.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store answered a multi-get with a different number of items than
    /// were requested.
    #[error("multi-get returned {actual} items, expected {expected}")]
    ResponseLengthMismatch { expected: usize, actual: usize },

    /// The item at `position` does not match the request at that position.
    #[error("multi-get item at position {position} does not match its request")]
    ResponseOrderMismatch { position: usize },

    /// The content cursor was read past its last item.
    #[error("content cursor exhausted")]
    CursorExhausted,
}
