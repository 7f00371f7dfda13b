//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `BuildConfig` - The pipeline configuration (platforms and sources)
//! - `BuildState` - The config realized by the last successful run

mod build_config;
mod build_state;

pub use build_config::{BuildConfig, PlatformConfig, PlatformFile, DEFAULT_CONFIG_FILE};
pub use build_state::BuildState;
