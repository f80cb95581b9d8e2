//! SLURM integration for nodewatch.
//!
//! Expand compact node-list notation and read allocation context from
//! the environment.

pub mod alloc;
pub mod expand;

pub use alloc::AllocationContext;
pub use expand::{FALLBACK_HOST, expand};
