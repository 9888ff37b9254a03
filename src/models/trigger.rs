//! The trigger record: an auto-reply rule submitted by a chat user and
//! subject to moderation before it becomes active.

use serde::{Deserialize, Serialize};

/// How a trigger's key phrase is matched against incoming messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// The message must equal the key phrase.
    Exact,
    /// The message must contain the key phrase.
    Contains,
    /// The key phrase is a regular expression.
    Regexp,
}

/// Who is allowed to fire the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Any chat member.
    All,
    /// Chat administrators only.
    Admins,
    /// The chat owner only.
    Owner,
}

/// The moderation verdict currently attached to a trigger.
///
/// The backend's vocabulary is expected to grow; values this client does not
/// recognize are carried verbatim in [`ModerationStatus::Other`] so an
/// unknown status renders as an inert badge instead of failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModerationStatus {
    /// Awaiting automated or manual review.
    Pending,
    /// Cleared for use.
    Safe,
    /// Flagged by the automated pipeline for human review.
    Flagged,
    /// The owning chat was banned over this trigger.
    Banned,
    /// A status string this client does not recognize.
    Other(String),
}

impl ModerationStatus {
    /// The wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Safe => "safe",
            ModerationStatus::Flagged => "flagged",
            ModerationStatus::Banned => "banned",
            ModerationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ModerationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => ModerationStatus::Pending,
            "safe" => ModerationStatus::Safe,
            "flagged" => ModerationStatus::Flagged,
            "banned" => ModerationStatus::Banned,
            _ => ModerationStatus::Other(raw),
        }
    }
}

impl From<ModerationStatus> for String {
    fn from(status: ModerationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// An auto-reply rule pending or subject to moderation.
///
/// The record is authoritative on the backend; this client only ever replaces
/// its local copy wholesale with what the backend returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Unique, immutable identifier.
    pub id: i64,
    /// The chat that owns the trigger.
    pub chat_id: i64,
    /// The phrase that fires the trigger.
    pub key_phrase: String,
    /// The reply payload. Polymorphic (text, photo, video, sticker, ...);
    /// kept opaque because rendering it is a presentation concern.
    pub content: serde_json::Value,
    /// How the key phrase is matched.
    pub match_type: MatchType,
    /// Whether matching is case sensitive.
    #[serde(default)]
    pub is_case_sensitive: bool,
    /// Who may fire the trigger.
    pub access_level: AccessLevel,
    /// How many times the trigger has fired.
    #[serde(default)]
    pub usage_count: i64,
    /// The user who submitted the trigger.
    pub created_by: Option<i64>,
    /// The current moderation verdict.
    pub moderation_status: ModerationStatus,
    /// Free-text justification, present only when the status requires one.
    pub moderation_reason: Option<String>,
    /// Whether the trigger is a shared template rather than a chat-local rule.
    #[serde(default)]
    pub is_template: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trigger_json(status: &str) -> serde_json::Value {
        json!({
            "id": 7,
            "chat_id": -100123,
            "key_phrase": "hello",
            "content": { "text": "hi there" },
            "match_type": "exact",
            "is_case_sensitive": false,
            "access_level": "all",
            "usage_count": 3,
            "created_by": 42,
            "moderation_status": status,
            "moderation_reason": null,
            "is_template": false
        })
    }

    #[test]
    fn deserializes_known_status() {
        let trigger: Trigger = serde_json::from_value(trigger_json("flagged")).unwrap();
        assert_eq!(trigger.moderation_status, ModerationStatus::Flagged);
        assert_eq!(trigger.match_type, MatchType::Exact);
    }

    #[test]
    fn unknown_status_is_carried_verbatim() {
        let trigger: Trigger = serde_json::from_value(trigger_json("quarantined")).unwrap();
        assert_eq!(
            trigger.moderation_status,
            ModerationStatus::Other("quarantined".to_string())
        );
        assert_eq!(trigger.moderation_status.as_str(), "quarantined");
    }

    #[test]
    fn status_round_trips_through_wire_format() {
        for raw in ["pending", "safe", "flagged", "banned", "future_status"] {
            let status = ModerationStatus::from(raw.to_string());
            assert_eq!(String::from(status), raw);
        }
    }
}
