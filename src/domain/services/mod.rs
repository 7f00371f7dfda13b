//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod build_set;
mod tokens;

pub use build_set::{
    compute_output_prefixes, partition, should_rebuild, BuildSetTracker, Partition,
};
pub use tokens::{flatten_tokens, merge_documents, Token};
