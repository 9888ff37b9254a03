//! One-shot view of a trigger and its moderation timeline.

use clap::Parser;

use crate::config::AppConfig;
use crate::history::ModerationLog;
use crate::timeline::render_timeline;

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// The trigger to show.
    pub trigger_id: i64,
    /// Expand previous runs instead of collapsing them.
    #[arg(long)]
    pub all: bool,
}

/// Fetches the trigger and its history once and prints the timeline.
pub async fn execute(
    args: ShowArgs,
    config_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_file)?;
    let api = super::build_api(&config)?;

    let trigger = api.trigger(args.trigger_id).await?;
    let history = api.moderation_history(args.trigger_id).await?;
    let log = ModerationLog::from_items(history.items);

    println!(
        "Trigger {} — \"{}\" [{}]",
        trigger.id,
        trigger.key_phrase,
        trigger.moderation_status.as_str()
    );
    if let Some(reason) = &trigger.moderation_reason {
        println!("Reason: {reason}");
    }
    println!("Current step: {}", log.current_step().label());
    println!();
    print!("{}", render_timeline(&log, args.all));

    Ok(())
}
