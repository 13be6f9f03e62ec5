//! Configuration loading.
//!
//! A single optional TOML file; every field has a default so a missing or
//! partial file is valid. CLI flags are merged on top in `cli`.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, PollingConfig, RequestDefaults, ServiceConfig};
