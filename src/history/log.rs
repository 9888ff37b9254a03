//! The in-memory moderation event log for a single trigger.

use crate::models::{ModerationHistoryItem, ModerationStep};

/// The result of offering an item to [`ModerationLog::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The item was new and is now the log's last entry.
    Appended,
    /// An item with the same id was already present; the log is unchanged.
    Duplicate,
}

/// The ordered, append-mostly event sequence for exactly one trigger.
///
/// The log is fetched in bulk once and then extended incrementally by the
/// live channel. It never shrinks; when the owning trigger is deleted the
/// whole log is discarded with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModerationLog {
    items: Vec<ModerationHistoryItem>,
}

impl ModerationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from a bulk snapshot, which the backend serves oldest
    /// first.
    pub fn from_items(items: Vec<ModerationHistoryItem>) -> Self {
        Self { items }
    }

    /// Offers a newly observed item to the log.
    ///
    /// If an item with the same id is already present anywhere in the log the
    /// call is an idempotent no-op: duplicate delivery from the push channel
    /// must not create a second entry. Otherwise the item is appended.
    ///
    /// Both the bulk snapshot and the push channel deliver items in
    /// non-decreasing `created_at` order, so a plain append keeps the log
    /// sorted. Should the transport ever violate that assumption, order is
    /// restored with a stable sort by `created_at` (insertion order preserved
    /// for equal timestamps).
    pub fn merge(&mut self, item: ModerationHistoryItem) -> MergeOutcome {
        if self.items.iter().any(|existing| existing.id == item.id) {
            return MergeOutcome::Duplicate;
        }

        let out_of_order = self
            .items
            .last()
            .is_some_and(|last| item.created_at < last.created_at);
        if out_of_order {
            tracing::warn!(
                item_id = item.id,
                trigger_id = item.trigger_id,
                "history item arrived out of order; re-sorting log"
            );
        }

        self.items.push(item);
        if out_of_order {
            self.items.sort_by_key(|item| item.created_at);
        }
        MergeOutcome::Appended
    }

    /// The items in log order, oldest first.
    pub fn items(&self) -> &[ModerationHistoryItem] {
        &self.items
    }

    /// Number of items in the log.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the log holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The step the trigger is currently at: the last item's step, or
    /// [`ModerationStep::Created`] for an empty log.
    pub fn current_step(&self) -> ModerationStep {
        self.items
            .last()
            .map(|item| item.step.clone())
            .unwrap_or(ModerationStep::Created)
    }
}
