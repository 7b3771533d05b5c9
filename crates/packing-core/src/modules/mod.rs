//! Pack configuration storage and process configuration modules.

pub mod config;
pub mod pack_config_memory;
pub mod pack_config_pg;
pub(crate) mod pack_config_pg_helpers;
pub mod repository;
