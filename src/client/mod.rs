//! REST client for the moderation backend.
//!
//! Thin, typed wrappers over the backend's trigger endpoints. All requests go
//! through the shared retrying HTTP client and carry the opaque credential
//! from the injected [`CredentialProvider`]. A `401` from any endpoint maps
//! to [`ApiError::AuthExpired`] and is never retried here; the upstream login
//! flow owns recovery.

pub mod auth;
pub mod error;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::models::{ModerationHistoryItem, Trigger};

pub use auth::{CredentialProvider, StaticCredential};
pub use error::ApiError;

/// Query parameter carrying the credential on the SSE stream endpoint, which
/// cannot carry custom headers.
const STREAM_AUTH_PARAM: &str = "auth";

/// The bulk moderation history snapshot for one trigger, oldest first.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationHistoryResponse {
    /// The full event log at the time of the request.
    pub items: Vec<ModerationHistoryItem>,
    /// The backend's view of the current step, if it reports one.
    #[serde(default)]
    pub current_step: Option<String>,
}

/// Point-in-time answer to "is this trigger inside the processing queue".
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QueueStatus {
    /// Whether automated evaluation is currently running.
    pub is_processing: bool,
}

/// Acknowledgement returned by the delete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAck {
    /// Backend status string, `"ok"` on success.
    pub status: String,
}

/// Typed client for the trigger moderation endpoints.
pub struct ApiClient {
    http: ClientWithMiddleware,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Creates a client against `base_url` using the given HTTP stack and
    /// credential provider.
    ///
    /// The base URL is normalized to end with a slash so endpoint paths join
    /// onto it instead of replacing its final segment.
    pub fn new(
        http: ClientWithMiddleware,
        mut base_url: Url,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Self {
            http,
            base_url,
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(
        &self,
        request: reqwest_middleware::RequestBuilder,
    ) -> reqwest_middleware::RequestBuilder {
        match self.credentials.credential() {
            Some(credential) => request.header(reqwest::header::AUTHORIZATION, credential),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthExpired);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.authorize(self.http.get(url)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.authorize(self.http.post(url)).send().await?;
        Self::decode(response).await
    }

    /// Fetches a single trigger record.
    pub async fn trigger(&self, trigger_id: i64) -> Result<Trigger, ApiError> {
        self.get_json(&format!("triggers/{trigger_id}")).await
    }

    /// One-shot bulk fetch of a trigger's moderation history, oldest first.
    pub async fn moderation_history(
        &self,
        trigger_id: i64,
    ) -> Result<ModerationHistoryResponse, ApiError> {
        self.get_json(&format!("triggers/{trigger_id}/moderation-history"))
            .await
    }

    /// Point-in-time probe of the trigger's processing-queue membership.
    pub async fn queue_status(&self, trigger_id: i64) -> Result<QueueStatus, ApiError> {
        self.get_json(&format!("triggers/{trigger_id}/queue-status"))
            .await
    }

    /// Requests transition to `safe`. The backend is idempotent; re-approving
    /// an already-safe trigger is allowed.
    pub async fn approve_trigger(&self, trigger_id: i64) -> Result<Trigger, ApiError> {
        self.post_json(&format!("triggers/{trigger_id}/approve"))
            .await
    }

    /// Requests re-entry into the automated pipeline.
    pub async fn requeue_trigger(&self, trigger_id: i64) -> Result<Trigger, ApiError> {
        self.post_json(&format!("triggers/{trigger_id}/requeue"))
            .await
    }

    /// Requests permanent removal of the trigger.
    pub async fn delete_trigger(&self, trigger_id: i64) -> Result<DeleteAck, ApiError> {
        let url = self.endpoint(&format!("triggers/{trigger_id}"))?;
        let response = self.authorize(self.http.delete(url)).send().await?;
        Self::decode(response).await
    }

    /// Opens the server-push moderation history stream for a trigger.
    ///
    /// The SSE transport cannot carry custom headers, so the credential
    /// travels as a query parameter instead. Returns the raw streaming
    /// response; framing is handled by the stream module.
    pub async fn open_history_stream(
        &self,
        trigger_id: i64,
    ) -> Result<reqwest::Response, ApiError> {
        let mut url = self.endpoint(&format!("triggers/{trigger_id}/moderation-history/stream"))?;
        if let Some(credential) = self.credentials.credential() {
            url.query_pairs_mut()
                .append_pair(STREAM_AUTH_PARAM, &credential);
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthExpired);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpRetryConfig;
    use crate::http_client::build_default_client;

    fn client_for(server_url: &str, credential: Option<&str>) -> ApiClient {
        let http = build_default_client(&HttpRetryConfig::no_retries()).unwrap();
        let credentials: Arc<dyn CredentialProvider> = match credential {
            Some(value) => Arc::new(StaticCredential::new(value)),
            None => Arc::new(StaticCredential::anonymous()),
        };
        ApiClient::new(http, Url::parse(server_url).unwrap(), credentials)
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = client_for("http://127.0.0.1:9/api/v1", None);
        let url = client.endpoint("triggers/5/queue-status").unwrap();
        assert_eq!(url.path(), "/api/v1/triggers/5/queue-status");
    }

    #[tokio::test]
    async fn authorization_header_carries_credential_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/triggers/3/queue-status")
            .match_header("authorization", "twa-init-data xyz")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"is_processing": true}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("twa-init-data xyz"));
        let status = client.queue_status(3).await.unwrap();
        assert!(status.is_processing);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_expired() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/triggers/3/queue-status")
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client.queue_status(3).await.unwrap_err();
        assert!(matches!(err, ApiError::AuthExpired));
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/triggers/3/moderation-history")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client.moderation_history(3).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn stream_url_carries_credential_as_query_param() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/triggers/8/moderation-history/stream")
            .match_query(mockito::Matcher::UrlEncoded(
                "auth".into(),
                "secret token".into(),
            ))
            .with_status(200)
            .with_body(": heartbeat\n\n")
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("secret token"));
        let response = client.open_history_stream(8).await.unwrap();
        assert!(response.status().is_success());
        mock.assert_async().await;
    }
}
