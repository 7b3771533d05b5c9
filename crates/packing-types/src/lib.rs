//! # Packing Types
//!
//! Core types, models, and error definitions for the packing service.
//!
//! - **`error`** - Typed errors for pack calculation, pack-size configuration
//!   and process configuration
//! - **`models`** - Domain models (`PackConfig`, `PackBreakdown`) and the
//!   application configuration tree
//!
//! ## Architecture Role
//!
//! `packing-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        packing-types (this crate)
//!               │
//!               ▼
//!         packing-core
//!               │
//!               ▼
//!        packing-server
//! ```
//!
//! All types are serializable via serde so the HTTP layer can return them
//! as-is, and `Clone` so services can hand out snapshots of stored state.

pub mod error;
pub mod models;

pub use error::{ConfigError, PackingError};

pub use models::{
    normalize_pack_sizes, AppConfig, LimitsConfig, LogConfig, LogFormat, PackBreakdown,
    PackConfig, ServerConfig, StorageBackend, StorageConfig,
};
