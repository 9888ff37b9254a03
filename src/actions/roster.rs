//! The shared trigger collection.
//!
//! The roster is the only structure mutated from multiple call sites (list
//! views, detail views, the action controller), so every mutation goes
//! through identity-keyed operations on a single shared copy; divergent
//! copies of the same trigger cannot arise.

use std::sync::{Arc, Mutex};

use crate::models::Trigger;

/// A shared, identity-keyed collection of trigger records.
#[derive(Debug, Clone, Default)]
pub struct TriggerRoster {
    inner: Arc<Mutex<Vec<Trigger>>>,
}

impl TriggerRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Trigger>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replaces the roster's contents with a fresh listing.
    pub fn reset(&self, triggers: Vec<Trigger>) {
        *self.lock() = triggers;
    }

    /// Inserts a trigger, replacing an existing record with the same id in
    /// place (position preserved) or appending when none exists.
    pub fn upsert(&self, trigger: Trigger) {
        let mut triggers = self.lock();
        match triggers.iter_mut().find(|t| t.id == trigger.id) {
            Some(slot) => *slot = trigger,
            None => triggers.push(trigger),
        }
    }

    /// Replaces the record with the updated trigger's id, in place. Returns
    /// `false` when no record with that id exists; nothing is inserted.
    pub fn replace(&self, updated: Trigger) -> bool {
        let mut triggers = self.lock();
        match triggers.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id. Returns whether one existed.
    pub fn remove(&self, trigger_id: i64) -> bool {
        let mut triggers = self.lock();
        let before = triggers.len();
        triggers.retain(|t| t.id != trigger_id);
        triggers.len() != before
    }

    /// A copy of the record with the given id, if present.
    pub fn get(&self, trigger_id: i64) -> Option<Trigger> {
        self.lock().iter().find(|t| t.id == trigger_id).cloned()
    }

    /// A snapshot of the full collection in listing order.
    pub fn snapshot(&self) -> Vec<Trigger> {
        self.lock().clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the roster holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
