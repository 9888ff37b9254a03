//! Point-in-time probe of a trigger's processing-queue membership.
//!
//! Answers "is automated evaluation running right now", which the event log
//! may lag behind. It is a non-critical enhancement indicator, not a
//! substitute for the live channel: failures downgrade to "not processing"
//! with a warning and are never surfaced as blocking errors.

use std::sync::Arc;

use crate::client::ApiClient;

/// Probe for the backend's processing queue.
#[derive(Clone)]
pub struct QueueStatusProbe {
    api: Arc<ApiClient>,
}

impl QueueStatusProbe {
    /// Creates a probe over the given API client.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Whether the trigger is currently inside the processing queue.
    ///
    /// Any failure, including auth expiry, reports `false`; consumers may
    /// poll at a low frequency while a detail panel is open.
    pub async fn check(&self, trigger_id: i64) -> bool {
        match self.api.queue_status(trigger_id).await {
            Ok(status) => status.is_processing,
            Err(e) => {
                tracing::warn!(
                    trigger_id,
                    error = %e,
                    "queue status probe failed; reporting not processing"
                );
                false
            }
        }
    }
}
