//! Permanently removes a trigger.

use std::sync::Arc;

use clap::Parser;

use crate::actions::{
    ActionError, AlwaysConfirm, ConfirmationGate, TerminalSink, TriggerActionController,
    TriggerRoster,
};
use crate::config::AppConfig;
use crate::stream::ChannelRegistry;

use super::StdinGate;

/// Arguments for the `delete` command.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// The trigger to delete.
    pub trigger_id: i64,
    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}

/// Deletes the trigger after confirmation.
pub async fn execute(
    args: DeleteArgs,
    config_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_file)?;
    let api = super::build_api(&config)?;

    let gate: Arc<dyn ConfirmationGate> = if args.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinGate)
    };
    let controller = TriggerActionController::new(
        api,
        TriggerRoster::new(),
        ChannelRegistry::new(),
        Arc::new(TerminalSink),
        gate,
    );

    match controller.delete(args.trigger_id).await {
        Ok(()) => Ok(()),
        // A declined prompt is a normal exit, not a failure.
        Err(ActionError::Unconfirmed) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
