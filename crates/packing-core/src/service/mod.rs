//! Orchestration on top of the configuration store and the optimizer.
//!
//! Both services are cheap to clone and hold no state of their own beyond a
//! shared handle to the store; every consistency guarantee comes from the
//! store's gated writes.

mod calculate;
mod pack_config;

pub use calculate::CalculateService;
pub use pack_config::PackConfigService;
