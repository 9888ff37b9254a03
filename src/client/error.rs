//! Error types for the moderation backend API client.

use thiserror::Error;

/// Defines the possible errors when talking to the moderation backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential was rejected (HTTP 401). Not retried here: an expired
    /// credential can only be refreshed by the upstream login flow.
    #[error("authentication credential rejected")]
    AuthExpired,

    /// The backend answered with a non-success status.
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),

    /// A transport-level failure from the retrying middleware stack.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// A failure reading or decoding the response body.
    #[error("response error: {0}")]
    Response(#[from] reqwest::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}
