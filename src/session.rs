//! Per-trigger viewing sessions: bulk load, then live merge.
//!
//! A session owns one trigger's event log exclusively. The bulk snapshot is
//! fully loaded and stored before the live channel opens, so the log's
//! append-only assumption holds: anything the channel re-delivers from the
//! snapshot window is a duplicate and merges as a no-op. Sessions for
//! different triggers are fully independent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::client::{ApiClient, ApiError};
use crate::history::{MergeOutcome, ModerationLog};
use crate::models::ModerationHistoryItem;
use crate::stream::{ChannelRegistry, LiveHistoryChannel, LiveHistorySubscription, StreamError};

/// Errors opening or switching a viewing session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The bulk history fetch failed; the caller surfaces an error state and
    /// an empty timeline.
    #[error("failed to load moderation history: {0}")]
    Fetch(#[from] ApiError),

    /// The live channel could not be opened.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The reviewer navigated elsewhere while the fetch was in flight; the
    /// result was discarded.
    #[error("viewing session superseded before load completed")]
    Superseded,
}

/// An open viewing session for one trigger.
#[derive(Debug)]
pub struct TriggerSession {
    trigger_id: i64,
    log: Arc<Mutex<ModerationLog>>,
    subscription: LiveHistorySubscription,
    registry: ChannelRegistry,
}

impl TriggerSession {
    /// The trigger being viewed.
    pub fn trigger_id(&self) -> i64 {
        self.trigger_id
    }

    /// A point-in-time copy of the merged log.
    pub fn log_snapshot(&self) -> ModerationLog {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether the live subscription is still open. The action controller
    /// closes it through the registry when the trigger is deleted.
    pub fn is_live(&self) -> bool {
        !self.subscription.is_closed()
    }

    /// Waits until the live subscription's delivery task finishes (server
    /// closed the stream or the subscription was closed).
    pub async fn stream_done(&mut self) {
        self.subscription.join().await;
    }

    /// Closes the session, releasing the live transport. Also happens on
    /// drop; every exit path ends the subscription.
    pub fn close(&self) {
        self.subscription.close();
        self.registry.forget(self.trigger_id);
    }
}

impl Drop for TriggerSession {
    fn drop(&mut self) {
        self.subscription.close();
        self.registry.forget(self.trigger_id);
    }
}

/// Opens and switches viewing sessions, one at a time.
///
/// Switching closes the previous trigger's channel before opening the next
/// and discards a bulk fetch that resolves after the reviewer has already
/// navigated away (tracked with a session epoch taken before the await).
pub struct SessionManager {
    api: Arc<ApiClient>,
    channel: LiveHistoryChannel,
    registry: ChannelRegistry,
    epoch: Arc<AtomicU64>,
    active: Option<TriggerSession>,
}

impl SessionManager {
    /// Creates a manager that registers every open subscription in
    /// `registry`.
    pub fn new(api: Arc<ApiClient>, registry: ChannelRegistry) -> Self {
        Self {
            channel: LiveHistoryChannel::new(Arc::clone(&api)),
            api,
            registry,
            epoch: Arc::new(AtomicU64::new(0)),
            active: None,
        }
    }

    /// The currently viewed session, if any.
    pub fn active(&self) -> Option<&TriggerSession> {
        self.active.as_ref()
    }

    /// Opens a viewing session for `trigger_id`, replacing the current one.
    ///
    /// The previous session's channel is closed before the new trigger's
    /// history is fetched. The bulk snapshot is merged into a fresh log
    /// first; only then does the live channel open, feeding every delivered
    /// item through the log's merge.
    pub async fn view(&mut self, trigger_id: i64) -> Result<&TriggerSession, SessionError> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = self.active.take() {
            previous.close();
        }

        let snapshot = self.api.moderation_history(trigger_id).await?;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            // The reviewer moved on while the fetch was in flight.
            tracing::debug!(trigger_id, "discarding stale history fetch");
            return Err(SessionError::Superseded);
        }

        let log = Arc::new(Mutex::new(ModerationLog::from_items(snapshot.items)));

        let merge_log = Arc::clone(&log);
        let subscription = self
            .channel
            .open(trigger_id, move |item: ModerationHistoryItem| {
                let mut log = merge_log.lock().unwrap_or_else(|e| e.into_inner());
                if log.merge(item) == MergeOutcome::Appended {
                    tracing::debug!(trigger_id, "live history item merged");
                }
            })
            .await?;

        self.registry.register(trigger_id, subscription.handle());

        let session = TriggerSession {
            trigger_id,
            log,
            subscription,
            registry: self.registry.clone(),
        };
        Ok(self.active.insert(session))
    }

    /// Closes the active session, if any.
    pub fn close(&mut self) {
        if let Some(session) = self.active.take() {
            session.close();
        }
    }

    /// Takes ownership of the active session, leaving the manager idle.
    pub fn take_active(&mut self) -> Option<TriggerSession> {
        self.active.take()
    }
}
