//! File watcher for `tokenpad watch`
//!
//! - Debouncing (100ms by default, configurable)
//! - Content hashing to drop editor auto-save noise
//! - Events under the build paths are ignored
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod sync;

pub use event::{WatchOptions, DEBOUNCE_MS};
pub use sync::watch;
