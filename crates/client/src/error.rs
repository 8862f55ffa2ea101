//! Error types for the FHIR client.
//!
//! This module defines all error types surfaced by the client, organized
//! by the phase of a search in which they arise:
//!
//! | Error | Phase | Meaning |
//! |-------|-------|---------|
//! | [`QueryError`] | building | caller contract violation, no network activity |
//! | [`TransportError`] | dispatch | the transport could not complete the exchange |
//! | `UnsupportedStatus` | response | non-2xx status, body preserved for inspection |
//! | `UnsupportedFormat` | decode | content type mismatch, surfaced before parsing |
//! | `MalformedResponse` | decode | structurally invalid feed document |
//!
//! Every error is terminal for the search in progress; the client never
//! retries. Callers inspect the kind to decide their own retry policy.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use lumen_fhir::RegistryError;
use thiserror::Error;

/// The primary error type for client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The search request itself is invalid. Raised synchronously while
    /// building, before any network activity.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    /// The transport collaborator failed to complete the exchange.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("unsupported response status {status}")]
    UnsupportedStatus {
        status: u16,
        /// Raw response body, preserved for caller inspection.
        body: Vec<u8>,
    },

    /// The response content type does not match the expected wire format.
    #[error("unsupported response format: {content_type}")]
    UnsupportedFormat { content_type: String },

    /// The response body is not a well-formed feed document.
    #[error("malformed response: {message}")]
    MalformedResponse {
        message: String,
        /// The feed id, when it had already been read before the failure.
        feed_id: Option<String>,
    },
}

impl ClientError {
    /// Shorthand for a `MalformedResponse` without feed context.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ClientError::MalformedResponse {
            message: message.into(),
            feed_id: None,
        }
    }
}

/// Builder-time contract violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `_count` must be a positive integer.
    #[error("result count limit must be positive, got {count}")]
    InvalidCountLimit { count: u32 },

    /// The resource type is not known to the registry.
    #[error("unknown resource type: {type_name}")]
    UnknownResourceType { type_name: String },
}

impl From<RegistryError> for QueryError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownResourceType { type_name }
            | RegistryError::DuplicateResourceType { type_name } => {
                QueryError::UnknownResourceType { type_name }
            }
        }
    }
}

/// Errors raised by the transport collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request URL could not be parsed.
    #[error("invalid request url: {url}")]
    InvalidUrl { url: String },

    /// The HTTP exchange failed (connect, timeout, protocol).
    #[error("http exchange failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-HTTP implementation.
    #[error("transport failure: {message}")]
    Other { message: String },
}

/// Errors raised by the wire-format parser collaborator.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The payload is not parseable in the declared format.
    #[error("unparseable {format} resource payload: {message}")]
    Unparseable { format: &'static str, message: String },

    /// The payload carries no resource type tag.
    #[error("resource payload has no type tag")]
    MissingTypeTag,
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
