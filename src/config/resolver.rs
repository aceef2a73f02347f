//! Configuration resolution
//!
//! Merges a raw source over built-in defaults, checks every recognized field,
//! runs the setup hook once and freezes the result. Resolution never touches
//! the filesystem.

use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

use super::defaults::{BuiltInDefaults, Profile};
use super::hooks::{EventRegistry, SetupHook};
use super::model::{ReporterOptions, RunConfiguration, SupportFile};
use super::raw::{RawSource, TESTING_TYPE_SECTION};
use crate::common::{BoxError, Error, Result};

/// Outcome of a successful resolution
#[derive(Debug)]
pub struct Resolution {
    /// The frozen configuration handed to the engine
    pub config: Arc<RunConfiguration>,
    /// Listeners the setup hook registered
    pub events: EventRegistry,
}

/// Builder for a single resolution
#[derive(Default)]
pub struct Resolver {
    defaults: Option<BuiltInDefaults>,
    strict: bool,
    project_root: Option<PathBuf>,
    hook: Option<SetupHook>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit default set instead of a profile
    pub fn with_defaults(mut self, defaults: BuiltInDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Use a named profile's defaults
    ///
    /// Without this, the source's `profile` key picks the profile, falling
    /// back to [`Profile::default`].
    pub fn with_profile(self, profile: Profile) -> Self {
        self.with_defaults(profile.defaults())
    }

    /// Reject unrecognized keys instead of ignoring them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Root that path fields are resolved against
    ///
    /// Overrides the root carried by the defaults; without either, paths are
    /// left relative.
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Register the setup hook, run once before the configuration is frozen
    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut EventRegistry, &mut RunConfiguration) -> std::result::Result<(), BoxError>
            + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Resolve `raw` into a frozen configuration
    pub fn resolve(self, raw: RawSource) -> Result<Resolution> {
        let raw = raw.flatten_section(TESTING_TYPE_SECTION)?;

        let unknown: Vec<&str> = raw.unrecognized_keys().collect();
        if let Some(first) = unknown.first() {
            if self.strict {
                return Err(Error::validation(first, "unrecognized option"));
            }
            tracing::debug!("Ignoring unrecognized options: {}", unknown.join(", "));
        }

        let defaults = match self.defaults {
            Some(defaults) => defaults,
            None => select_profile(&raw)?.defaults(),
        };

        let mut config = merge(&raw, defaults)?;
        if let Some(root) = self.project_root {
            config.project_root = root;
        }
        config.validate()?;

        let mut events = EventRegistry::new();
        if let Some(hook) = self.hook {
            tracing::debug!("Running setup hook");
            hook(&mut events, &mut config).map_err(Error::Hook)?;
            config.validate()?;
        }

        config.anchor_paths();
        tracing::debug!(
            "Resolved configuration with {} spec pattern(s), {} listener(s)",
            config.spec_pattern.len(),
            events.len()
        );

        Ok(Resolution {
            config: Arc::new(config),
            events,
        })
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("defaults", &self.defaults)
            .field("strict", &self.strict)
            .field("project_root", &self.project_root)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Resolve `raw` over `defaults` with no hook and no project root
pub fn resolve(raw: RawSource, defaults: &BuiltInDefaults) -> Result<Arc<RunConfiguration>> {
    Resolver::new()
        .with_defaults(defaults.clone())
        .resolve(raw)
        .map(|resolution| resolution.config)
}

fn select_profile(raw: &RawSource) -> Result<Profile> {
    match raw.get("profile") {
        None => Ok(Profile::default()),
        Some(Value::String(name)) => name.parse(),
        Some(other) => Err(Error::wrong_type("profile", "a profile name", other)),
    }
}

fn merge(raw: &RawSource, defaults: BuiltInDefaults) -> Result<RunConfiguration> {
    Ok(RunConfiguration {
        project_root: defaults.project_root,
        spec_pattern: spec_pattern(raw.get("specPattern"), defaults.spec_pattern)?,
        results_folder: path_field(raw, "resultsFolder", defaults.results_folder)?,
        videos_folder: path_field(raw, "videosFolder", defaults.videos_folder)?,
        screenshots_folder: path_field(raw, "screenshotsFolder", defaults.screenshots_folder)?,
        fixtures_folder: path_field(raw, "fixturesFolder", defaults.fixtures_folder)?,
        support_file: support_file(raw.get("supportFile"), defaults.support_file)?,
        reporter_name: match raw.get("reporterName") {
            None => defaults.reporter_name,
            Some(Value::String(name)) => name.clone(),
            Some(other) => return Err(Error::wrong_type("reporterName", "a string", other)),
        },
        reporter_options: reporter_options(raw.get("reporterOptions"), defaults.reporter_options)?,
    })
}

/// A single string is accepted as a one-element sequence
fn spec_pattern(value: Option<&Value>, default: Vec<String>) -> Result<Vec<String>> {
    match value {
        None => Ok(default),
        Some(Value::String(pattern)) => Ok(vec![pattern.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(pattern) => Ok(pattern.clone()),
                other => Err(Error::wrong_type(&format!("specPattern[{}]", i), "a string", other)),
            })
            .collect(),
        Some(other) => Err(Error::wrong_type(
            "specPattern",
            "a string or sequence of strings",
            other,
        )),
    }
}

fn path_field(raw: &RawSource, field: &str, default: PathBuf) -> Result<PathBuf> {
    path_value(raw.get(field), field, default)
}

fn path_value(value: Option<&Value>, field: &str, default: PathBuf) -> Result<PathBuf> {
    match value {
        None => Ok(default),
        Some(Value::String(path)) => Ok(PathBuf::from(path)),
        Some(other) => Err(Error::wrong_type(field, "a path string", other)),
    }
}

fn support_file(value: Option<&Value>, default: SupportFile) -> Result<SupportFile> {
    match value {
        None => Ok(default),
        Some(Value::Bool(false)) => Ok(SupportFile::Disabled),
        Some(Value::String(path)) => Ok(SupportFile::Path(PathBuf::from(path))),
        Some(other) => Err(Error::wrong_type("supportFile", "a path string or false", other)),
    }
}

/// Recognized options are type-checked; the rest pass through
fn reporter_options(value: Option<&Value>, default: ReporterOptions) -> Result<ReporterOptions> {
    let map: &Map<String, Value> = match value {
        None => return Ok(default),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(Error::wrong_type("reporterOptions", "a mapping", other)),
    };

    let mut options = default;
    for (key, value) in map {
        match (key.as_str(), value) {
            (_, Value::Null) => {}
            ("mochaFile", _) => {
                options.mocha_file =
                    path_value(Some(value), "reporterOptions.mochaFile", options.mocha_file)?;
            }
            ("toConsole", Value::Bool(flag)) => options.to_console = *flag,
            ("toConsole", other) => {
                return Err(Error::wrong_type("reporterOptions.toConsole", "a boolean", other));
            }
            _ => {
                options.extra.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(options)
}
