use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};

use packing_core::modules::config as core_config;
use packing_core::{
    prometheus, CalculateService, InMemoryPackConfigRepository, PackConfigRepository,
    PostgresPackConfigRepository,
};
use packing_types::{
    models::{total_packs, total_shipped},
    AppConfig, PackBreakdown, StorageBackend,
};

use crate::cli::{Cli, PackSizeCommands};
use crate::router::build_router;
use crate::server_utils::{create_listener, shutdown_signal};
use crate::state::AppState;

mod pack_size_commands_impl {
    pub use crate::pack_size_commands::*;
}

/// Merge the config file, environment and global CLI flags.
pub fn load_app_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = core_config::load_config(cli.config.as_deref())?;

    if let Some(level) = &cli.log_level {
        config.log.level.clone_from(level);
    }
    if let Some(url) = &cli.database_url {
        config.storage.database_url = Some(url.clone());
    }
    if let Some(backend) = cli.storage {
        config.storage.backend = backend;
    }
    Ok(config)
}

/// Open the configured store, applying migrations when enabled.
pub async fn open_repository(config: &AppConfig) -> Result<Arc<dyn PackConfigRepository>> {
    core_config::validate_config(config)?;

    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; pack sizes are lost on restart");
            Ok(Arc::new(InMemoryPackConfigRepository::new()))
        },
        StorageBackend::Postgres => {
            let repo = connect_postgres(config).await?;
            if config.storage.run_migrations {
                repo.run_migrations().await.context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");
            }
            Ok(Arc::new(repo))
        },
    }
}

async fn connect_postgres(config: &AppConfig) -> Result<PostgresPackConfigRepository> {
    let url = config
        .storage
        .database_url
        .as_deref()
        .context("storage.database_url is required for the postgres backend")?;
    let repo = PostgresPackConfigRepository::connect(url, &config.storage)
        .await
        .context("Failed to connect to PostgreSQL")?;
    tracing::info!(max_connections = config.storage.max_connections, "Connected to PostgreSQL");
    Ok(repo)
}

pub async fn handle_serve(mut config: AppConfig, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    prometheus::init_metrics().context("Failed to install Prometheus recorder")?;

    let repository = open_repository(&config).await?;
    let server_config = config.server.clone();
    let state = AppState::new(repository, config);

    let app = build_router(state);
    let listener = create_listener(&server_config).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        version = option_env!("GIT_VERSION").unwrap_or("dev"),
        "Packing server listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

pub async fn handle_calculate(
    config: AppConfig,
    amount: i64,
    sizes: Option<Vec<i64>>,
    json: bool,
) -> Result<()> {
    let breakdown = match sizes {
        Some(sizes) => {
            let offline = CalculateService::new(
                Arc::new(InMemoryPackConfigRepository::new()),
                &config.limits,
            );
            offline.calculate_with_sizes(amount, &sizes).await?
        },
        None => {
            let repository = open_repository(&config).await?;
            CalculateService::new(repository, &config.limits).calculate(amount).await?
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print_breakdown(amount, &breakdown);
    }
    Ok(())
}

fn print_breakdown(amount: i64, breakdown: &[PackBreakdown]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Pack size", "Count", "Items"]);

    for line in breakdown {
        table.add_row(vec![
            Cell::new(line.size).set_alignment(CellAlignment::Right),
            Cell::new(line.count).set_alignment(CellAlignment::Right),
            Cell::new(line.shipped()).set_alignment(CellAlignment::Right),
        ]);
    }

    let shipped = total_shipped(breakdown);
    println!("{table}");
    println!(
        "\n{} ordered, {} shipped in {} packs ({} over)",
        amount,
        shipped.to_string().green().bold(),
        total_packs(breakdown),
        shipped - amount
    );
}

pub async fn handle_pack_size_command(config: AppConfig, cmd: PackSizeCommands) -> Result<()> {
    let repository = open_repository(&config).await?;
    match cmd {
        PackSizeCommands::Show { json } => {
            pack_size_commands_impl::show_pack_sizes(repository, json).await
        },
        PackSizeCommands::Set { sizes, retries } => {
            pack_size_commands_impl::set_pack_sizes(repository, &sizes, retries).await
        },
    }
}

pub async fn handle_migrate(config: AppConfig) -> Result<()> {
    if config.storage.backend != StorageBackend::Postgres {
        anyhow::bail!("Migrations only apply to the postgres backend");
    }
    core_config::validate_config(&config)?;

    let repo = connect_postgres(&config).await?;
    repo.run_migrations().await.context("Failed to run database migrations")?;

    println!("{} Database schema is up to date", "✓".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_config;

    #[tokio::test]
    async fn test_open_repository_validates_before_connecting() {
        let mut config = test_config();
        config.server.port = 0;

        let err = open_repository(&config).await.err().map(|e| e.to_string()).unwrap_or_default();

        assert!(err.contains("server.port"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_open_repository_memory_backend_starts_empty() {
        let repository = open_repository(&test_config()).await.unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(repository.backend_name(), "memory");
        assert_eq!(repository.get().await.unwrap_or_else(|e| panic!("{e}")), None);
    }
}
