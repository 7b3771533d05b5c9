//! Packing Server
//!
//! HTTP API and command-line client for pack breakdown calculations:
//! - `POST /api/v1/calculate` computes the packs that ship an order
//! - `GET|PUT /api/v1/pack-sizes` reads and replaces the stored pack sizes
//! - `/health`, `/version` and `/metrics` for operations
//!
//! Run `packing-server --help` for the CLI.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod middleware;
mod pack_size_commands;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use packing_types::{LogConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_app_config(&cli)?;
    init_tracing(&config.log)?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::handle_serve(config, port).await,
        Commands::Calculate { amount, sizes, json } => {
            commands::handle_calculate(config, amount, sizes, json).await
        },
        Commands::PackSizes(cmd) => commands::handle_pack_size_command(config, cmd).await,
        Commands::Migrate => commands::handle_migrate(config).await,
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&log.level)
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {e}", log.level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    match log.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
}
