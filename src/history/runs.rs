//! Grouping a flat event log into moderation runs.
//!
//! A run is one queue-to-resolution attempt. The reviewer-facing timeline
//! shows the latest run expanded and earlier (superseded) runs collapsed, so
//! the grouping exists purely for display; the underlying log is untouched.

use chrono::{DateTime, Utc};

use crate::models::ModerationHistoryItem;

/// One queue-to-resolution attempt: a contiguous sub-sequence of the log.
///
/// Runs borrow from the log they were grouped from and are recomputed from
/// scratch whenever the log changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModerationRun<'a> {
    items: &'a [ModerationHistoryItem],
}

impl<'a> ModerationRun<'a> {
    /// The run's items in log order. Never empty by construction.
    pub fn items(&self) -> &'a [ModerationHistoryItem] {
        self.items
    }

    /// When the run started: its first item's timestamp.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.items[0].created_at
    }

    /// Number of items in the run.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A run always holds at least one item; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partitions a time-ordered event log into ordered moderation runs.
///
/// A new run begins at any item whose step is in the run-start set (`queued`,
/// `requeued`), except that the log's very first item starts the first run
/// regardless of its step. An empty log yields zero runs; a log with no
/// run-start step yields exactly one run. Deterministic and O(n).
///
/// The last run in the returned list is the current attempt; all earlier
/// runs are previous attempts.
pub fn group_runs(items: &[ModerationHistoryItem]) -> Vec<ModerationRun<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;

    for (idx, item) in items.iter().enumerate() {
        if item.step.is_run_start() && idx > start {
            runs.push(ModerationRun {
                items: &items[start..idx],
            });
            start = idx;
        }
    }

    if start < items.len() {
        runs.push(ModerationRun {
            items: &items[start..],
        });
    }

    runs
}
