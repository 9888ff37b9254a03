//! The moderation event log and its derived run grouping.
//!
//! [`log::ModerationLog`] holds the authoritative, deduplicated, time-ordered
//! event sequence for one trigger and absorbs incremental appends from the
//! live channel. [`runs::group_runs`] partitions the flat log into queue-to-
//! resolution attempts for display collapsing; it never mutates the log.

pub mod log;
pub mod runs;

pub use log::{MergeOutcome, ModerationLog};
pub use runs::{group_runs, ModerationRun};
