//! Kanban CLI binary.

use anyhow::Result;
use kanban::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the kanban CLI.
///
/// Uses tokio's current_thread runtime; the only I/O is reading config and
/// seed files at startup.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=kanban=debug,kanban_kv=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kanban=info,kanban_kv=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting kanban CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Kanban CLI completed successfully");
    Ok(())
}
