//! CLI command definitions
//!
//! Defines the clap commands for the runconf CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the project's configuration and print it as JSON
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the built-in default profiles
    Profiles,

    /// Expand the resolved spec patterns and list matching files
    Specs {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Options selecting and interpreting the configuration source
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Configuration file (default: nearest runconf.{toml,json,yaml,yml})
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Default profile to resolve against (standalone, bundled)
    #[arg(long, short)]
    pub profile: Option<String>,

    /// Reject unrecognized options instead of ignoring them
    #[arg(long)]
    pub strict: bool,

    /// Ignore RUNCONF_* environment overrides
    #[arg(long)]
    pub no_env: bool,
}
