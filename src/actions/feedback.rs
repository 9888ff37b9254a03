//! Reviewer-facing feedback seams for the action controller.
//!
//! Both are constructor-injected dependencies rather than ambient globals:
//! embedders decide how notices surface (terminal line, toast, test
//! recorder) and how destructive actions are confirmed.

use std::sync::Mutex;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// An action completed.
    Success,
    /// An action failed; local state was left unchanged.
    Error,
}

/// Sink for transient, dismissible user-facing notices.
pub trait NotificationSink: Send + Sync {
    /// Delivers one notice.
    fn notify(&self, severity: Severity, message: &str);
}

/// Gate consulted before destructive actions are sent to the backend.
pub trait ConfirmationGate: Send + Sync {
    /// Whether the reviewer confirmed the described action.
    fn confirm(&self, prompt: &str) -> bool;
}

/// A sink that writes notices to the terminal.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => println!("{message}"),
            Severity::Success => println!("✔ {message}"),
            Severity::Error => eprintln!("✖ {message}"),
        }
    }
}

/// A gate that approves every action without prompting. For `--yes` flows
/// and tests.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// A gate that declines every action. For tests and read-only embeddings.
#[derive(Debug, Default)]
pub struct NeverConfirm;

impl ConfirmationGate for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// A sink that records every notice. Test double.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<(Severity, String)>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, severity: Severity, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((severity, message.to_string()));
    }
}
