//! Point-in-time processing-queue check for a trigger.

use clap::Parser;

use crate::config::AppConfig;
use crate::probe::QueueStatusProbe;

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// The trigger to check.
    pub trigger_id: i64,
}

/// Prints whether the trigger is currently being processed.
pub async fn execute(
    args: StatusArgs,
    config_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_file)?;
    let api = super::build_api(&config)?;

    let probe = QueueStatusProbe::new(api);
    if probe.check(args.trigger_id).await {
        println!("Trigger {} is being processed.", args.trigger_id);
    } else {
        println!("Trigger {} is not in the processing queue.", args.trigger_id);
    }
    Ok(())
}
