//! Registry of open subscriptions, keyed by trigger id.
//!
//! The action controller uses it to close a trigger's channel when the
//! trigger is deleted, without owning the subscription itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::SubscriptionHandle;

/// Shared directory of open subscription handles.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    inner: Arc<Mutex<HashMap<i64, SubscriptionHandle>>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the handle for a trigger's subscription, replacing (and
    /// closing) any previous one for the same trigger.
    pub fn register(&self, trigger_id: i64, handle: SubscriptionHandle) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = map.insert(trigger_id, handle) {
            previous.close();
        }
    }

    /// Closes and forgets the subscription for a trigger, if any.
    pub fn close_for(&self, trigger_id: i64) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = map.remove(&trigger_id) {
            handle.close();
        }
    }

    /// Drops the registry entry without closing the subscription. Used when a
    /// session hands its subscription's lifetime back to its own owner.
    pub fn forget(&self, trigger_id: i64) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&trigger_id);
    }

    /// Whether a subscription is currently registered for the trigger.
    pub fn contains(&self, trigger_id: i64) -> bool {
        let map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.contains_key(&trigger_id)
    }
}
