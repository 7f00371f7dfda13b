//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Virtual filesystem implementations (Memory, Local)
//! - `pipeline/` - Token pipeline implementations (Basic)

pub mod fs;
pub mod pipeline;

// Re-export for convenience
pub use fs::{LocalFs, MemoryFs};
pub use pipeline::{BasicPipeline, TokenFormat};
