//! Data models for triggers and their moderation history, as reported by the
//! moderation backend.

pub mod history;
pub mod trigger;

pub use history::{HistoryDetails, ModerationHistoryItem, ModerationStep, StepTone};
pub use trigger::{AccessLevel, MatchType, ModerationStatus, Trigger};
