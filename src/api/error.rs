//! Error taxonomy surfaced by the API client.
//!
//! Only three outcomes matter to callers: the session is gone for good
//! (`SessionExpired`), the server rejected the request for an application
//! reason (`Api`), or the request never produced a usable response
//! (`Transport`/`Decode`). No error is swallowed inside the client.

use thiserror::Error;

use crate::session::StoreError;

use super::transport::TransportError;

/// Fallback shown when an error response carries no parseable message.
pub const GENERIC_ERROR_MESSAGE: &str = "API request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The token could not be refreshed, or the server kept rejecting it
    /// after one refresh-and-retry cycle. Session storage has already been
    /// cleared by the time this is returned; callers should present a
    /// logged-out state.
    #[error("session expired")]
    SessionExpired,

    /// Non-success HTTP response outside the authentication-failure cycle.
    /// Carries the status code and a best-effort human-readable message
    /// taken from the JSON error body.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The network call itself failed (unreachable host, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Reading or writing the persisted session failed.
    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    /// A 2xx response body could not be decoded as the expected JSON shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx response arrived with no body where one was required.
    #[error("unexpected empty response body")]
    EmptyResponse,
}

impl ApiError {
    /// HTTP status of an application-level failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
