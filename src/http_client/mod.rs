//! Construction of the retryable HTTP client used for every backend call.
//!
//! Transient failures (network hiccups, 5xx) are retried with exponential
//! backoff and jitter via middleware; a 401 is never retried because an
//! expired credential can only be refreshed by the upstream login flow.

use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use thiserror::Error;

use crate::config::{HttpRetryConfig, JitterSetting};

/// Errors that can occur while building the HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The underlying `reqwest::Client` could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

/// Creates a retryable HTTP client with middleware from a base client.
///
/// # Parameters
/// - `config`: Configuration for the retry policy
/// - `base_client`: The base HTTP client to wrap
///
/// # Returns
/// A `ClientWithMiddleware` that includes retry capabilities
pub fn create_retryable_http_client(
    config: &HttpRetryConfig,
    base_client: reqwest::Client,
) -> ClientWithMiddleware {
    let policy_builder = match config.jitter {
        JitterSetting::None => ExponentialBackoff::builder().jitter(Jitter::None),
        JitterSetting::Full => ExponentialBackoff::builder().jitter(Jitter::Full),
    };

    let retry_policy = policy_builder
        .base(config.base_for_backoff)
        .retry_bounds(config.initial_backoff, config.max_backoff)
        .build_with_max_retries(config.max_retries);

    ClientBuilder::new(base_client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}

/// Builds the crate's default retryable client: connection pooling with
/// conservative timeouts, wrapped in the retry middleware.
pub fn build_default_client(config: &HttpRetryConfig) -> Result<ClientWithMiddleware, HttpClientError> {
    let base_client = reqwest::Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| HttpClientError::Build(e.to_string()))?;

    Ok(create_retryable_http_client(config, base_client))
}
