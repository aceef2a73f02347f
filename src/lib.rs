//! Run configuration resolver for browser end-to-end test runs
//!
//! This library reads declarative run configuration, validates it, fills
//! defaults and produces the immutable configuration an external test
//! engine consumes.

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use config::{resolve, Profile, RawSource, Resolver, RunConfiguration, SupportFile};
