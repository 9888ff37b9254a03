//! The trigger action controller: the three reviewer-initiated state
//! transitions (approve, requeue, delete) and the reconciliation of local
//! state with the backend's authoritative result.
//!
//! No operation updates local state optimistically: on failure the roster and
//! any open channel are left exactly as they were, so the interface always
//! reflects the last known-good server state.

pub mod feedback;
pub mod roster;

use std::sync::Arc;

use thiserror::Error;

use crate::client::{ApiClient, ApiError};
use crate::models::Trigger;
use crate::stream::ChannelRegistry;

pub use feedback::{
    AlwaysConfirm, ConfirmationGate, NeverConfirm, NotificationSink, RecordingSink, Severity,
    TerminalSink,
};
pub use roster::TriggerRoster;

/// Errors from reviewer-initiated actions.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The backend rejected or failed the request. Local state is unchanged.
    #[error("action failed: {0}")]
    Api(#[from] ApiError),

    /// The reviewer declined the confirmation prompt; nothing was sent.
    #[error("action not confirmed")]
    Unconfirmed,
}

/// Performs reviewer actions and reconciles the shared roster and open
/// channels with their results.
pub struct TriggerActionController {
    api: Arc<ApiClient>,
    roster: TriggerRoster,
    channels: ChannelRegistry,
    sink: Arc<dyn NotificationSink>,
    gate: Arc<dyn ConfirmationGate>,
}

impl TriggerActionController {
    /// Creates a controller over the shared roster and channel registry.
    pub fn new(
        api: Arc<ApiClient>,
        roster: TriggerRoster,
        channels: ChannelRegistry,
        sink: Arc<dyn NotificationSink>,
        gate: Arc<dyn ConfirmationGate>,
    ) -> Self {
        Self {
            api,
            roster,
            channels,
            sink,
            gate,
        }
    }

    /// Requests transition to `safe`.
    ///
    /// No client-side precondition: an already-safe trigger may be
    /// re-approved, the backend is idempotent. On success every local copy is
    /// replaced by identity match on id.
    pub async fn approve(&self, trigger_id: i64) -> Result<Trigger, ActionError> {
        match self.api.approve_trigger(trigger_id).await {
            Ok(updated) => {
                self.roster.upsert(updated.clone());
                self.sink
                    .notify(Severity::Success, &format!("Trigger {trigger_id} approved"));
                Ok(updated)
            }
            Err(e) => {
                self.sink.notify(
                    Severity::Error,
                    &format!("Failed to approve trigger {trigger_id}: {e}"),
                );
                Err(e.into())
            }
        }
    }

    /// Requests re-entry into the automated pipeline. The backend is expected
    /// to eventually append a `requeued` event to the log, opening a new run.
    pub async fn requeue(&self, trigger_id: i64) -> Result<Trigger, ActionError> {
        match self.api.requeue_trigger(trigger_id).await {
            Ok(updated) => {
                self.roster.upsert(updated.clone());
                self.sink.notify(
                    Severity::Success,
                    &format!("Trigger {trigger_id} sent back for re-check"),
                );
                Ok(updated)
            }
            Err(e) => {
                self.sink.notify(
                    Severity::Error,
                    &format!("Failed to requeue trigger {trigger_id}: {e}"),
                );
                Err(e.into())
            }
        }
    }

    /// Requests permanent removal.
    ///
    /// Destructive, so the confirmation gate is consulted first; approve and
    /// requeue are not gated. On success the record leaves the roster and any
    /// open live channel for it is closed so no events arrive for a
    /// nonexistent trigger.
    pub async fn delete(&self, trigger_id: i64) -> Result<(), ActionError> {
        let prompt = format!("Permanently delete trigger {trigger_id}? This cannot be undone.");
        if !self.gate.confirm(&prompt) {
            self.sink.notify(
                Severity::Info,
                &format!("Deletion of trigger {trigger_id} cancelled"),
            );
            return Err(ActionError::Unconfirmed);
        }

        match self.api.delete_trigger(trigger_id).await {
            Ok(_ack) => {
                self.roster.remove(trigger_id);
                self.channels.close_for(trigger_id);
                self.sink
                    .notify(Severity::Success, &format!("Trigger {trigger_id} deleted"));
                Ok(())
            }
            Err(e) => {
                self.sink.notify(
                    Severity::Error,
                    &format!("Failed to delete trigger {trigger_id}: {e}"),
                );
                Err(e.into())
            }
        }
    }
}
