//! tokenpad - a design-token playground
//!
//! A project directory holds a pipeline config (`sd.config.json`) and token
//! source files. tokenpad builds them into platform outputs, partitions the
//! project into inputs and outputs, and rebuilds only when an input changes.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod watcher;

// Re-exports for convenience
pub use application::{
    ObservedChange, PlaygroundSession, RebuildDecision, RebuildReason, RebuildStrategy,
    SessionEvent,
};
pub use config::Settings;
pub use domain::entities::{BuildConfig, BuildState, DEFAULT_CONFIG_FILE};
pub use domain::services::{
    compute_output_prefixes, partition, should_rebuild, BuildSetTracker, Partition,
};
pub use domain::value_objects::FilePath;
pub use error::{PadError, PadResult};
pub use infrastructure::{BasicPipeline, LocalFs, MemoryFs};
pub use watcher::{watch, WatchOptions};
