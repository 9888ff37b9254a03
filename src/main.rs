use clap::{Parser, Subcommand};
use modwatch::cmd::{approve, delete, requeue, show, status, watch};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file. Environment variables with the
    /// `MODWATCH__` prefix override it.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints a trigger's moderation timeline once.
    Show(show::ShowArgs),
    /// Follows a trigger's moderation timeline live.
    Watch(watch::WatchArgs),
    /// Marks a trigger as safe.
    Approve(approve::ApproveArgs),
    /// Sends a trigger back through the automated pipeline.
    Requeue(requeue::RequeueArgs),
    /// Permanently deletes a trigger.
    Delete(delete::DeleteArgs),
    /// Checks whether a trigger is in the processing queue.
    Status(status::StatusArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Show(args) => show::execute(args, config_file).await?,
        Commands::Watch(args) => watch::execute(args, config_file).await?,
        Commands::Approve(args) => approve::execute(args, config_file).await?,
        Commands::Requeue(args) => requeue::execute(args, config_file).await?,
        Commands::Delete(args) => delete::execute(args, config_file).await?,
        Commands::Status(args) => status::execute(args, config_file).await?,
    }

    Ok(())
}
