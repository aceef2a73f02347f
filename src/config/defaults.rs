//! Built-in default profiles
//!
//! Two complete default sets are in use and neither supersedes the other,
//! so both are exposed as named profiles.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde_json::Map;

use super::model::{ReporterOptions, RunConfiguration, SupportFile};
use crate::common::Error;

/// A complete configuration providing a value for every field
pub type BuiltInDefaults = RunConfiguration;

pub const DEFAULT_SPEC_PATTERN: &str = "cypress/integration/**/*.spec.js";
pub const DEFAULT_REPORTER: &str = "junit";
pub const DEFAULT_MOCHA_FILE: &str = "results/cypress_result.xml";

/// Named built-in default set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Results under `results/`, no support file
    #[default]
    Standalone,
    /// Results under `cypress/results/`, support file at `cypress/support/index.js`
    Bundled,
}

impl Profile {
    pub const ALL: &'static [Profile] = &[Profile::Standalone, Profile::Bundled];

    pub fn name(&self) -> &'static str {
        match self {
            Profile::Standalone => "standalone",
            Profile::Bundled => "bundled",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Profile::Standalone => "results in results/, support file disabled",
            Profile::Bundled => "results in cypress/results/, support file cypress/support/index.js",
        }
    }

    /// The full default configuration for this profile
    pub fn defaults(&self) -> BuiltInDefaults {
        let (results_folder, support_file) = match self {
            Profile::Standalone => ("results", SupportFile::Disabled),
            Profile::Bundled => (
                "cypress/results",
                SupportFile::Path(PathBuf::from("cypress/support/index.js")),
            ),
        };

        RunConfiguration {
            project_root: PathBuf::new(),
            spec_pattern: vec![DEFAULT_SPEC_PATTERN.to_string()],
            results_folder: PathBuf::from(results_folder),
            videos_folder: PathBuf::from("cypress/videos"),
            screenshots_folder: PathBuf::from("cypress/screenshots"),
            fixtures_folder: PathBuf::from("cypress/fixtures"),
            support_file,
            reporter_name: DEFAULT_REPORTER.to_string(),
            reporter_options: ReporterOptions {
                mocha_file: PathBuf::from(DEFAULT_MOCHA_FILE),
                to_console: true,
                extra: Map::new(),
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = Profile::ALL.iter().map(|p| p.name()).collect();
                Error::validation(
                    "profile",
                    format!("unknown profile '{}'. Known: {}", s, known.join(", ")),
                )
            })
    }
}
