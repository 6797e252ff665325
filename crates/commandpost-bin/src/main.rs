//! Commandpost daemon: command auditing and email digests for game servers.

mod app;
mod ipc;

use clap::{Parser, Subcommand};
use commandpost_config::{init_logging, Config, Paths};
use std::path::PathBuf;

/// Command-line interface for the Commandpost daemon.
#[derive(Parser)]
#[command(name = "commandpost-daemon")]
#[command(about = "Command auditing and email digest daemon for game servers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Base directory for daemon files (defaults to ~/.commandpost)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daemon
    Start {
        /// Run in the foreground (do not daemonize)
        #[arg(short, long)]
        foreground: bool,
    },
    /// Stop the daemon
    Stop,
    /// Show daemon status
    Status,
    /// Send all pending digests now
    FlushNow,
    /// Reload configuration from disk
    Reload,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };

    match cli.command {
        Some(Commands::Start { foreground }) => {
            let config = Config::load(&paths)?;
            app::run_daemon(config, paths, foreground).await?;
        }
        None => {
            // No subcommand: run in the foreground
            let config = Config::load(&paths)?;
            app::run_daemon(config, paths, true).await?;
        }
        Some(Commands::Stop) => app::stop_daemon(&paths).await?,
        Some(Commands::Status) => app::check_status(&paths).await?,
        Some(Commands::FlushNow) => app::flush_now(&paths).await?,
        Some(Commands::Reload) => app::reload_config(&paths).await?,
    }

    Ok(())
}
