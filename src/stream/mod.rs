//! The live update channel: a per-trigger, one-way push subscription that
//! delivers newly appended moderation history items while a reviewer is
//! watching that trigger.
//!
//! Payloads are handed to the subscriber callback in transport order; the
//! channel relies on the transport's in-order delivery and does not re-order.
//! A malformed payload is logged and dropped without ending the subscription.
//! Consumers are expected to funnel every delivered item through
//! [`crate::history::ModerationLog::merge`], so duplicate delivery cannot
//! corrupt the log.
//!
//! There is no automatic reconnect: when the transport ends, the subscription
//! finishes and the caller decides whether to reopen.

pub mod registry;
mod sse;

use std::sync::Arc;

use futures::StreamExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::client::{ApiClient, ApiError};
use crate::models::ModerationHistoryItem;

pub use registry::ChannelRegistry;
pub use sse::SseDecoder;

/// Errors opening a live history subscription.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stream endpoint could not be reached or rejected the request.
    #[error("failed to open history stream: {0}")]
    Open(#[from] ApiError),
}

/// Factory for per-trigger live history subscriptions.
#[derive(Clone)]
pub struct LiveHistoryChannel {
    api: Arc<ApiClient>,
}

impl LiveHistoryChannel {
    /// Creates a channel factory over the given API client.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Opens a one-way push subscription for `trigger_id`.
    ///
    /// Every event the backend emits for the trigger after this call is
    /// delivered exactly once to `on_item`, in emission order. The returned
    /// subscription must be closed when the viewing session ends; dropping it
    /// closes it as well.
    pub async fn open<F>(
        &self,
        trigger_id: i64,
        on_item: F,
    ) -> Result<LiveHistorySubscription, StreamError>
    where
        F: Fn(ModerationHistoryItem) + Send + 'static,
    {
        let response = self.api.open_history_stream(trigger_id).await?;
        let token = CancellationToken::new();
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            let mut decoder = SseDecoder::new();
            let mut body = response.bytes_stream();

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        tracing::debug!(trigger_id, "live history subscription closed");
                        break;
                    }
                    chunk = body.next() => match chunk {
                        Some(Ok(bytes)) => {
                            for payload in decoder.feed(&bytes) {
                                match serde_json::from_str::<ModerationHistoryItem>(&payload) {
                                    Ok(item) => on_item(item),
                                    Err(e) => {
                                        // One corrupt message must never end
                                        // the subscription.
                                        tracing::warn!(
                                            trigger_id,
                                            error = %e,
                                            "dropping malformed history stream payload"
                                        );
                                    }
                                }
                            }
                        }
                        Some(Err(e)) => {
                            tracing::warn!(trigger_id, error = %e, "history stream transport error");
                            break;
                        }
                        None => {
                            tracing::debug!(trigger_id, "history stream ended by server");
                            break;
                        }
                    }
                }
            }
        });

        Ok(LiveHistorySubscription {
            trigger_id,
            token,
            task: Some(task),
        })
    }
}

/// A handle that can close a subscription from another owner (e.g. the action
/// controller after a delete).
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    token: CancellationToken,
}

impl SubscriptionHandle {
    /// Closes the subscription. Idempotent.
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Whether the subscription has been closed.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// An open live history subscription for one trigger.
///
/// Closing is idempotent and happens on every exit path: explicitly via
/// [`close`](Self::close), through a shared [`SubscriptionHandle`], or on
/// drop. Leaving a subscription open past its viewing session leaks the
/// transport connection.
#[derive(Debug)]
pub struct LiveHistorySubscription {
    trigger_id: i64,
    token: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl LiveHistorySubscription {
    /// The trigger this subscription observes.
    pub fn trigger_id(&self) -> i64 {
        self.trigger_id
    }

    /// Closes the subscription. Idempotent.
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Whether the subscription has been closed.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A cloneable handle that closes this subscription.
    pub fn handle(&self) -> SubscriptionHandle {
        SubscriptionHandle {
            token: self.token.clone(),
        }
    }

    /// Waits until the delivery task has finished, either because the
    /// transport ended or because the subscription was closed.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for LiveHistorySubscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
