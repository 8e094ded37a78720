//! Test infrastructure for device drivers
//!
//! Provides:
//! - Snapshot builders for recorded agent answers
//! - Client status table row builders for NAC scenarios
//! - Query wrappers that record or fail every request
//! - Verification helpers for NAC sessions and processor readings

pub mod fixtures;
mod verification;

pub use fixtures::*;
pub use verification::*;
