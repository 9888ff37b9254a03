//! Sends a trigger back through the automated pipeline.

use std::sync::Arc;

use clap::Parser;

use crate::actions::{AlwaysConfirm, TerminalSink, TriggerActionController, TriggerRoster};
use crate::config::AppConfig;
use crate::stream::ChannelRegistry;

/// Arguments for the `requeue` command.
#[derive(Parser, Debug)]
pub struct RequeueArgs {
    /// The trigger to requeue.
    pub trigger_id: i64,
}

/// Requests re-entry into the automated pipeline.
pub async fn execute(
    args: RequeueArgs,
    config_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_file)?;
    let api = super::build_api(&config)?;

    let controller = TriggerActionController::new(
        api,
        TriggerRoster::new(),
        ChannelRegistry::new(),
        Arc::new(TerminalSink),
        Arc::new(AlwaysConfirm),
    );
    let updated = controller.requeue(args.trigger_id).await?;
    tracing::debug!(
        trigger_id = updated.id,
        status = updated.moderation_status.as_str(),
        "requeue completed"
    );
    Ok(())
}
