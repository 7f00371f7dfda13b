//! File System Implementations
//!
//! Concrete implementations of the VirtualFs port.

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;
