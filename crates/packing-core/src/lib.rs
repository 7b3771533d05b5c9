//! # Packing Core
//!
//! Pack breakdown optimizer and the versioned pack configuration store.
//!
//! ## Architecture
//!
//! ```text
//! packing-core/src/
//! ├── optimizer/     # unbounded-knapsack search over [amount, amount + max size]
//! ├── modules/       # store trait, PostgreSQL and in-memory backends, config loading
//! ├── service/       # CalculateService and PackConfigService
//! └── prometheus.rs  # metrics recorder and helpers
//! ```
//!
//! The store is the only source of truth for pack sizes. Writers never update
//! it in place; they swap in a successor gated on the version they read, and
//! losers of that race get a conflict instead of a retry.

#![allow(
    clippy::significant_drop_tightening,
    reason = "Mutex guards in the in-memory store are held for the whole compare-and-write"
)]
#![allow(clippy::map_err_ignore, reason = "Error context is provided in the replacement message")]
// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::needless_collect,
        clippy::assertions_on_result_states
    )
)]

pub mod modules;
pub mod optimizer;
pub mod prometheus;
pub mod service;

// Re-export commonly used types
pub use modules::pack_config_memory::InMemoryPackConfigRepository;
pub use modules::pack_config_pg::PostgresPackConfigRepository;
pub use modules::repository::{PackConfigRepository, RepoResult, RepositoryError};
pub use optimizer::optimize;
pub use service::{CalculateService, PackConfigService};
