//! Terminal rendering of a moderation log grouped into runs.
//!
//! Rendering is pure string building over an immutable snapshot: the watch
//! loop re-renders after every merge rather than patching previous output.
//! Previous runs collapse to a single summary line unless expansion is
//! requested; the current (last) run is always expanded.

use chrono::{DateTime, Utc};

use crate::history::{group_runs, ModerationLog, ModerationRun};
use crate::models::{HistoryDetails, ModerationHistoryItem, ModerationStep, StepTone};

/// Shown when the log holds no items at all. An empty log is a normal state
/// for a freshly created trigger, not an error.
const EMPTY_STATE: &str = "No moderation history yet.";

/// Renders the whole log: previous runs as collapsed one-liners (or expanded
/// when `expand_previous` is set), followed by the current run in full.
pub fn render_timeline(log: &ModerationLog, expand_previous: bool) -> String {
    let runs = group_runs(log.items());
    if runs.is_empty() {
        return format!("{EMPTY_STATE}\n");
    }

    let mut out = String::new();
    let last = runs.len() - 1;
    for (idx, run) in runs.iter().enumerate() {
        if idx < last && !expand_previous {
            out.push_str(&collapsed_run_line(run));
            out.push('\n');
        } else {
            if idx < last {
                out.push_str(&format!("Previous run ({})\n", format_date(run.started_at())));
            } else if idx > 0 {
                out.push_str(&format!("Current run ({})\n", format_date(run.started_at())));
            }
            for item in run.items() {
                render_item(&mut out, item);
            }
        }
    }
    out
}

/// One-line summary of a superseded run: start time plus step count.
fn collapsed_run_line(run: &ModerationRun<'_>) -> String {
    let steps = if run.len() == 1 { "step" } else { "steps" };
    format!(
        "Previous run ({}) — {} {}",
        format_date(run.started_at()),
        run.len(),
        steps
    )
}

fn render_item(out: &mut String, item: &ModerationHistoryItem) {
    out.push_str(&format!(
        "  {} {} {}\n",
        item.created_at.format("%H:%M:%S"),
        tone_glyph(item.step.tone()),
        item.step.label()
    ));
    if let Some(details) = &item.details {
        render_details(out, &item.step, details);
    }
}

/// Renders every recognized detail key that is present, one indented line
/// each. `reasoning` is suppressed for automatic approvals: the classifier's
/// justification for a clean verdict is noise in the reviewer timeline.
fn render_details(out: &mut String, step: &ModerationStep, details: &HistoryDetails) {
    if let Some(category) = &details.category {
        out.push_str(&format!("      category: {category}\n"));
    }
    if let Some(confidence) = details.confidence {
        out.push_str(&format!("      confidence: {:.0}%\n", confidence * 100.0));
    }
    if *step != ModerationStep::AutoApproved {
        if let Some(reasoning) = &details.reasoning {
            out.push_str(&format!("      reasoning: {reasoning}\n"));
        }
    }
    if let Some(actor) = &details.marked_by {
        out.push_str(&format!("      marked by: {}\n", actor_display(actor)));
    }
    if let Some(actor) = &details.deleted_by {
        out.push_str(&format!("      deleted by: {}\n", actor_display(actor)));
    }
    if let Some(actor) = &details.banned_by {
        out.push_str(&format!("      banned by: {}\n", actor_display(actor)));
    }
    if let Some(error) = &details.error {
        out.push_str(&format!("      error: {error}\n"));
    }
}

/// Actor fields arrive as free-form JSON (a username string or a user
/// object). Pick the most human-readable field available.
fn actor_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(name) => name.clone(),
        serde_json::Value::Object(map) => map
            .get("username")
            .or_else(|| map.get("first_name"))
            .or_else(|| map.get("id"))
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn tone_glyph(tone: StepTone) -> char {
    match tone {
        StepTone::Info => '·',
        StepTone::Pending => '…',
        StepTone::Progress => '⟳',
        StepTone::Success => '✔',
        StepTone::Warning => '!',
        StepTone::Danger => '✖',
        StepTone::Neutral => '?',
    }
}
