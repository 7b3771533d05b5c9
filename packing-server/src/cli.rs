use clap::{Parser, Subcommand};
use std::path::PathBuf;

use packing_types::StorageBackend;

#[derive(Parser)]
#[command(
    name = "packing-server",
    about = "Pack calculation service - HTTP API and command-line client",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, env = "PACKING_CONFIG", help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        env = "RUST_LOG",
        help = "Log filter, e.g. 'info' or 'packing_core=debug'"
    )]
    pub log_level: Option<String>,

    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, global = true, env = "PACKING_STORAGE", help = "Store backend: postgres or memory")]
    pub storage: Option<StorageBackend>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve {
        #[arg(short, long, help = "Port to listen on (overrides config and PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Calculate the pack breakdown for an amount")]
    Calculate {
        #[arg(allow_negative_numbers = true, help = "Number of items ordered")]
        amount: i64,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Pack sizes to use instead of the stored ones, e.g. 23,31,53"
        )]
        sizes: Option<Vec<i64>>,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(subcommand, about = "View and replace the stored pack sizes")]
    PackSizes(PackSizeCommands),

    #[command(about = "Apply pending PostgreSQL migrations")]
    Migrate,
}

#[derive(Subcommand)]
pub enum PackSizeCommands {
    #[command(about = "Show the current pack sizes")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Replace the pack sizes")]
    Set {
        #[arg(required = true, value_delimiter = ',', help = "New pack sizes, e.g. 250,500,1000")]
        sizes: Vec<i64>,

        #[arg(
            short,
            long,
            default_value_t = 0,
            help = "Re-read and retry this many times when another writer wins"
        )]
        retries: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_calculate_with_sizes() {
        let cli = Cli::try_parse_from(["packing-server", "calculate", "501", "--sizes", "250,500"])
            .unwrap_or_else(|e| panic!("{e}"));

        match cli.command {
            Some(Commands::Calculate { amount, sizes, json }) => {
                assert_eq!(amount, 501);
                assert_eq!(sizes, Some(vec![250, 500]));
                assert!(!json);
            },
            _ => panic!("expected calculate"),
        }
    }

    #[test]
    fn test_parses_pack_sizes_set_with_retries() {
        let cli = Cli::try_parse_from([
            "packing-server",
            "--storage",
            "memory",
            "pack-sizes",
            "set",
            "23",
            "31,53",
            "--retries",
            "3",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(cli.storage, Some(StorageBackend::Memory));
        match cli.command {
            Some(Commands::PackSizes(PackSizeCommands::Set { sizes, retries })) => {
                assert_eq!(sizes, vec![23, 31, 53]);
                assert_eq!(retries, 3);
            },
            _ => panic!("expected pack-sizes set"),
        }
    }
}
