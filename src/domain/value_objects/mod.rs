//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod file_path;
mod source_globs;

pub use file_path::{FilePath, PathError};
pub use source_globs::SourceGlobs;
