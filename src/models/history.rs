//! Moderation history events: one timestamped record per pipeline step a
//! trigger passes through.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stage or outcome in the moderation pipeline.
///
/// The vocabulary grows server-side without coordinated client releases, so
/// unrecognized step strings deserialize into [`ModerationStep::Other`] and
/// render with a generic fallback label instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModerationStep {
    /// The trigger was submitted.
    Created,
    /// The trigger entered the moderation queue.
    Queued,
    /// A worker picked the trigger up.
    ProcessingStarted,
    /// Media payload download/conversion started.
    MediaProcessing,
    /// Media payload download/conversion finished.
    MediaProcessed,
    /// Vision model analysis started.
    VisionAnalyzing,
    /// Vision model analysis finished.
    VisionCompleted,
    /// Text classification started.
    TextAnalyzing,
    /// Text classification finished.
    TextCompleted,
    /// Automated phase verdict: cleared.
    AutoApproved,
    /// Automated phase verdict: needs human review.
    AutoFlagged,
    /// Automated phase failed.
    AutoError,
    /// A reviewer was alerted.
    AlertSent,
    /// Human phase verdict: cleared.
    ManualApproved,
    /// Human phase verdict: trigger removed.
    ManualDeleted,
    /// Human phase verdict: owning chat banned.
    ManualBanned,
    /// A reviewer sent the trigger back through the pipeline.
    Requeued,
    /// A step string this client does not recognize.
    Other(String),
}

/// Visual tone attached to a step for presentation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTone {
    /// Informational lifecycle event.
    Info,
    /// Waiting for the pipeline.
    Pending,
    /// Work in progress.
    Progress,
    /// A positive outcome.
    Success,
    /// Needs attention.
    Warning,
    /// A negative or destructive outcome.
    Danger,
    /// Unrecognized step.
    Neutral,
}

impl ModerationStep {
    /// The wire representation of the step.
    pub fn as_str(&self) -> &str {
        match self {
            ModerationStep::Created => "created",
            ModerationStep::Queued => "queued",
            ModerationStep::ProcessingStarted => "processing_started",
            ModerationStep::MediaProcessing => "media_processing",
            ModerationStep::MediaProcessed => "media_processed",
            ModerationStep::VisionAnalyzing => "vision_analyzing",
            ModerationStep::VisionCompleted => "vision_completed",
            ModerationStep::TextAnalyzing => "text_analyzing",
            ModerationStep::TextCompleted => "text_completed",
            ModerationStep::AutoApproved => "auto_approved",
            ModerationStep::AutoFlagged => "auto_flagged",
            ModerationStep::AutoError => "auto_error",
            ModerationStep::AlertSent => "alert_sent",
            ModerationStep::ManualApproved => "manual_approved",
            ModerationStep::ManualDeleted => "manual_deleted",
            ModerationStep::ManualBanned => "manual_banned",
            ModerationStep::Requeued => "requeued",
            ModerationStep::Other(raw) => raw,
        }
    }

    /// Whether this step opens a new moderation run.
    pub fn is_run_start(&self) -> bool {
        matches!(self, ModerationStep::Queued | ModerationStep::Requeued)
    }

    /// Human-readable label. Unrecognized steps fall back to the raw string.
    pub fn label(&self) -> &str {
        match self {
            ModerationStep::Created => "Trigger created",
            ModerationStep::Queued => "Entered moderation queue",
            ModerationStep::ProcessingStarted => "Processing started",
            ModerationStep::MediaProcessing => "Processing media",
            ModerationStep::MediaProcessed => "Media processed",
            ModerationStep::VisionAnalyzing => "Vision analysis running",
            ModerationStep::VisionCompleted => "Vision analysis finished",
            ModerationStep::TextAnalyzing => "Classifying text",
            ModerationStep::TextCompleted => "Classification finished",
            ModerationStep::AutoApproved => "Approved automatically",
            ModerationStep::AutoFlagged => "Flagged for review",
            ModerationStep::AutoError => "Processing failed",
            ModerationStep::AlertSent => "Reviewer alerted",
            ModerationStep::ManualApproved => "Approved by reviewer",
            ModerationStep::ManualDeleted => "Deleted by reviewer",
            ModerationStep::ManualBanned => "Chat banned",
            ModerationStep::Requeued => "Sent back for re-check",
            ModerationStep::Other(raw) => raw,
        }
    }

    /// Visual tone for presentation.
    pub fn tone(&self) -> StepTone {
        match self {
            ModerationStep::Created | ModerationStep::ProcessingStarted | ModerationStep::Requeued => {
                StepTone::Info
            }
            ModerationStep::Queued => StepTone::Pending,
            ModerationStep::MediaProcessing
            | ModerationStep::VisionAnalyzing
            | ModerationStep::TextAnalyzing => StepTone::Progress,
            ModerationStep::MediaProcessed
            | ModerationStep::VisionCompleted
            | ModerationStep::TextCompleted
            | ModerationStep::AutoApproved
            | ModerationStep::ManualApproved => StepTone::Success,
            ModerationStep::AutoFlagged | ModerationStep::AlertSent => StepTone::Warning,
            ModerationStep::AutoError
            | ModerationStep::ManualDeleted
            | ModerationStep::ManualBanned => StepTone::Danger,
            ModerationStep::Other(_) => StepTone::Neutral,
        }
    }
}

impl From<String> for ModerationStep {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "created" => ModerationStep::Created,
            "queued" => ModerationStep::Queued,
            "processing_started" => ModerationStep::ProcessingStarted,
            "media_processing" => ModerationStep::MediaProcessing,
            "media_processed" => ModerationStep::MediaProcessed,
            "vision_analyzing" => ModerationStep::VisionAnalyzing,
            "vision_completed" => ModerationStep::VisionCompleted,
            "text_analyzing" => ModerationStep::TextAnalyzing,
            "text_completed" => ModerationStep::TextCompleted,
            "auto_approved" => ModerationStep::AutoApproved,
            "auto_flagged" => ModerationStep::AutoFlagged,
            "auto_error" => ModerationStep::AutoError,
            "alert_sent" => ModerationStep::AlertSent,
            "manual_approved" => ModerationStep::ManualApproved,
            "manual_deleted" => ModerationStep::ManualDeleted,
            "manual_banned" => ModerationStep::ManualBanned,
            "requeued" => ModerationStep::Requeued,
            _ => ModerationStep::Other(raw),
        }
    }
}

impl From<ModerationStep> for String {
    fn from(step: ModerationStep) -> Self {
        step.as_str().to_string()
    }
}

/// The open detail payload attached to a history event.
///
/// Every recognized key is independently optional; keys this client does not
/// recognize are preserved in `extra` rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryDetails {
    /// Classifier or reviewer justification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Classifier category (e.g. "Scam").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Classifier confidence in `[0.0, 1.0]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Who marked the trigger in a manual approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_by: Option<serde_json::Value>,
    /// Who deleted the trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<serde_json::Value>,
    /// Who banned the owning chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned_by: Option<serde_json::Value>,
    /// Failure description for error steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Keys this client does not recognize, carried verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HistoryDetails {
    /// Whether no detail key is present at all.
    pub fn is_empty(&self) -> bool {
        self.reasoning.is_none()
            && self.category.is_none()
            && self.confidence.is_none()
            && self.marked_by.is_none()
            && self.deleted_by.is_none()
            && self.banned_by.is_none()
            && self.error.is_none()
            && self.extra.is_empty()
    }
}

/// One event in a trigger's moderation history.
///
/// Created server-side exactly once per step transition; this client never
/// creates, edits, or deletes items, it only appends newly observed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationHistoryItem {
    /// Unique within the trigger's log; monotonically non-decreasing but not
    /// necessarily contiguous.
    pub id: i64,
    /// The trigger this event belongs to.
    pub trigger_id: i64,
    /// The pipeline stage or outcome this event records.
    pub step: ModerationStep,
    /// Optional open detail payload.
    #[serde(default)]
    pub details: Option<HistoryDetails>,
    /// The user that caused the event, where applicable.
    #[serde(default)]
    pub actor_id: Option<i64>,
    /// Authoritative ordering key.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_step_deserializes_and_labels_itself() {
        let item: ModerationHistoryItem = serde_json::from_value(json!({
            "id": 1,
            "trigger_id": 9,
            "step": "some_future_step",
            "details": null,
            "created_at": "2026-08-26T10:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(item.step, ModerationStep::Other("some_future_step".to_string()));
        assert_eq!(item.step.label(), "some_future_step");
        assert_eq!(item.step.tone(), StepTone::Neutral);
        assert!(!item.step.is_run_start());
    }

    #[test]
    fn run_start_set_is_queued_and_requeued() {
        assert!(ModerationStep::Queued.is_run_start());
        assert!(ModerationStep::Requeued.is_run_start());
        assert!(!ModerationStep::Created.is_run_start());
        assert!(!ModerationStep::AutoApproved.is_run_start());
    }

    #[test]
    fn details_preserve_unrecognized_keys() {
        let details: HistoryDetails = serde_json::from_value(json!({
            "reasoning": "spam",
            "confidence": 0.93,
            "model_version": "v2"
        }))
        .unwrap();
        assert_eq!(details.reasoning.as_deref(), Some("spam"));
        assert_eq!(details.confidence, Some(0.93));
        assert_eq!(details.extra.get("model_version"), Some(&json!("v2")));
        assert!(!details.is_empty());
    }

    #[test]
    fn step_round_trips_through_wire_format() {
        for raw in ["created", "queued", "auto_flagged", "manual_banned", "mystery"] {
            let step = ModerationStep::from(raw.to_string());
            assert_eq!(step.as_str(), raw);
        }
    }
}
