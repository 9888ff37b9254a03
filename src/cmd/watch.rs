//! Live view of a trigger's moderation timeline.
//!
//! Bulk-loads the history, opens the live channel, and re-renders the
//! timeline whenever new items merge in. The processing queue is probed at
//! the configured interval as a liveness indicator. Ends on Ctrl-C or when
//! the server closes the stream.

use std::time::Duration;

use clap::Parser;

use crate::config::AppConfig;
use crate::probe::QueueStatusProbe;
use crate::session::SessionManager;
use crate::stream::ChannelRegistry;
use crate::timeline::render_timeline;

/// How often the render loop checks the log for newly merged items.
const RENDER_POLL: Duration = Duration::from_millis(500);

/// Arguments for the `watch` command.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// The trigger to watch.
    pub trigger_id: i64,
    /// Expand previous runs instead of collapsing them.
    #[arg(long)]
    pub all: bool,
}

/// Opens a viewing session and re-renders the timeline until interrupted.
pub async fn execute(
    args: WatchArgs,
    config_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_file)?;
    let api = super::build_api(&config)?;

    let registry = ChannelRegistry::new();
    let probe = QueueStatusProbe::new(api.clone());
    let mut manager = SessionManager::new(api, registry);

    manager.view(args.trigger_id).await?;
    let session = manager
        .take_active()
        .ok_or("viewing session closed before it started")?;

    let mut render_tick = tokio::time::interval(RENDER_POLL);
    let mut probe_tick = tokio::time::interval(config.probe_interval);
    let mut rendered_len: Option<usize> = None;
    let mut was_processing: Option<bool> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(trigger_id = args.trigger_id, "watch interrupted");
                break;
            }
            _ = render_tick.tick() => {
                let snapshot = session.log_snapshot();
                if rendered_len != Some(snapshot.len()) {
                    rendered_len = Some(snapshot.len());
                    println!();
                    print!("{}", render_timeline(&snapshot, args.all));
                    println!("Current step: {}", snapshot.current_step().label());
                }
                if !session.is_live() {
                    println!("Live stream ended.");
                    break;
                }
            }
            _ = probe_tick.tick() => {
                let processing = probe.check(args.trigger_id).await;
                if was_processing != Some(processing) {
                    was_processing = Some(processing);
                    if processing {
                        println!("Automated evaluation is running…");
                    }
                }
            }
        }
    }

    session.close();
    Ok(())
}
