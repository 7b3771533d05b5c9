//! Core domain models for the packing service.

pub mod config;
mod pack;

pub use config::{
    AppConfig, LimitsConfig, LogConfig, LogFormat, ServerConfig, StorageBackend, StorageConfig,
};
pub use pack::{normalize_pack_sizes, total_packs, total_shipped, PackBreakdown, PackConfig};
