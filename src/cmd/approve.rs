//! Marks a trigger as safe.

use std::sync::Arc;

use clap::Parser;

use crate::actions::{AlwaysConfirm, TerminalSink, TriggerActionController, TriggerRoster};
use crate::config::AppConfig;
use crate::stream::ChannelRegistry;

/// Arguments for the `approve` command.
#[derive(Parser, Debug)]
pub struct ApproveArgs {
    /// The trigger to approve.
    pub trigger_id: i64,
}

/// Requests the safe transition for the trigger.
pub async fn execute(
    args: ApproveArgs,
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
    let updated = controller.approve(args.trigger_id).await?;
    tracing::debug!(
        trigger_id = updated.id,
        status = updated.moderation_status.as_str(),
        "approve completed"
    );
    Ok(())
}
