//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PlaygroundSession` - Tracks the build state, judges changes, rebuilds
//! - `project` - Starter project, snapshot export and import

pub mod decision;
pub mod event;
pub mod project;
pub mod session;

pub use decision::{ObservedChange, RebuildDecision, RebuildReason, RebuildStrategy};
pub use event::SessionEvent;
pub use project::{export_snapshot, import_snapshot, write_default_project};
pub use session::PlaygroundSession;
