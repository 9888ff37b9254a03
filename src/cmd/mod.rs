//! CLI command implementations.
//!
//! Each command loads configuration, builds the shared HTTP stack, and runs
//! one operation against the moderation backend.

pub mod approve;
pub mod delete;
pub mod requeue;
pub mod show;
pub mod status;
pub mod watch;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::actions::ConfirmationGate;
use crate::client::{ApiClient, CredentialProvider, StaticCredential};
use crate::config::AppConfig;
use crate::http_client::build_default_client;

/// Builds the API client from loaded configuration: retrying HTTP stack plus
/// the configured credential.
pub(crate) fn build_api(config: &AppConfig) -> Result<Arc<ApiClient>, Box<dyn std::error::Error>> {
    let http = build_default_client(&config.http_retry)?;
    let credentials: Arc<dyn CredentialProvider> = match &config.credential {
        Some(value) => Arc::new(StaticCredential::new(value.clone())),
        None => Arc::new(StaticCredential::anonymous()),
    };
    Ok(Arc::new(ApiClient::new(
        http,
        config.api_base_url.clone(),
        credentials,
    )))
}

/// A confirmation gate that prompts on the terminal and reads one line from
/// stdin. Anything other than `y`/`yes` declines.
#[derive(Debug, Default)]
pub struct StdinGate;

impl ConfirmationGate for StdinGate {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
