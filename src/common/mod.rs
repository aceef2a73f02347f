//! Common utilities shared between the library and the CLI

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{BoxError, Error, Result};
