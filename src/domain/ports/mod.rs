//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod pipeline;
pub mod virtual_fs;

pub use pipeline::{BuildReport, TokenPipeline};
pub use virtual_fs::{FsError, FsResult, VirtualFs};
