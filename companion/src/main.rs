//! Headless D&D character sheet and combat tracker.
//!
//! Reads `#command` lines from stdin against a JSON document directory.
//!
//! ```bash
//! cargo run -p companion -- --data-dir ./table --poll-secs 5
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod command;
mod headless;

use clap::Parser;
use companion_core::CompanionConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "companion", about = "Character sheet and combat tracker", version)]
struct Cli {
    /// Directory holding character and profile documents
    /// (overrides COMPANION_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seconds between refreshes of the active view
    /// (overrides COMPANION_POLL_SECS)
    #[arg(long)]
    poll_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Loads .env before reading the environment
    let mut config = CompanionConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("companion=info,companion_core=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(secs) = cli.poll_secs.filter(|s| *s > 0) {
        config = config.with_poll_interval(Duration::from_secs(secs));
    }

    headless::run_headless(config).await
}
