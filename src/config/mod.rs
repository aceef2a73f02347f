//! Run configuration resolution
//!
//! Sources are layered as built-in defaults, then the configuration file,
//! then environment overrides, then the setup hook.

pub mod defaults;
pub mod env;
pub mod hooks;
pub mod model;
pub mod pattern;
pub mod raw;
pub mod resolver;
pub mod source;

pub use defaults::{BuiltInDefaults, Profile};
pub use hooks::{EventRegistry, LifecycleEvent, Listener, SetupHook};
pub use model::{ReporterOptions, RunConfiguration, SupportFile};
pub use raw::RawSource;
pub use resolver::{resolve, Resolution, Resolver};
