//! Application configuration models.

mod app;
mod enums;
mod server;
mod storage;

pub use app::{AppConfig, LogConfig};
pub use enums::{LogFormat, StorageBackend};
pub use server::{LimitsConfig, ServerConfig};
pub use storage::StorageConfig;
