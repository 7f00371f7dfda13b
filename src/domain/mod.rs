//! Domain Layer
//!
//! This is the core of tokenpad - pure business logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Build configuration and build state
//! - `value_objects/` - Immutable value types (FilePath, SourceGlobs)
//! - `services/` - Domain services (build set partitioning, token flattening)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
