//! Environment variable overrides
//!
//! `RUNCONF_*` variables become a [`RawSource`] layered over the file source.

use serde_json::{json, Value};
use std::ffi::OsString;

use super::raw::RawSource;
use crate::common::{Error, Result};

/// Prefix shared by every override variable
pub const ENV_PREFIX: &str = "RUNCONF_";

/// Build an override source from `(name, value)` pairs
///
/// Pure: callers pass a fixed list or go through [`os_env_overrides`]. Unknown
/// `RUNCONF_*` names are ignored.
pub fn env_overrides<I, K, V>(vars: I) -> Result<RawSource>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut raw = RawSource::new();
    let mut reporter_options = serde_json::Map::new();

    for (name, value) in vars {
        let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let value = value.as_ref();

        match key {
            "SPEC_PATTERN" => {
                let patterns: Vec<Value> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(|p| json!(p))
                    .collect();
                raw.set("specPattern", Value::Array(patterns));
            }
            "RESULTS_FOLDER" => raw.set("resultsFolder", json!(value)),
            "VIDEOS_FOLDER" => raw.set("videosFolder", json!(value)),
            "SCREENSHOTS_FOLDER" => raw.set("screenshotsFolder", json!(value)),
            "FIXTURES_FOLDER" => raw.set("fixturesFolder", json!(value)),
            "SUPPORT_FILE" => {
                let support = if value.eq_ignore_ascii_case("false") {
                    json!(false)
                } else {
                    json!(value)
                };
                raw.set("supportFile", support);
            }
            "REPORTER" => raw.set("reporterName", json!(value)),
            "PROFILE" => raw.set("profile", json!(value)),
            "MOCHA_FILE" => {
                reporter_options.insert("mochaFile".to_string(), json!(value));
            }
            "TO_CONSOLE" => {
                let flag = parse_flag(value).ok_or_else(|| {
                    Error::validation(
                        "RUNCONF_TO_CONSOLE",
                        format!("expected true/false/1/0, found '{}'", value),
                    )
                })?;
                reporter_options.insert("toConsole".to_string(), json!(flag));
            }
            other => tracing::debug!("Ignoring unknown override {}{}", ENV_PREFIX, other),
        }
    }

    if !reporter_options.is_empty() {
        raw.set("reporterOptions", Value::Object(reporter_options));
    }

    Ok(raw)
}

/// Overrides from the current process environment
pub fn from_process_env() -> Result<RawSource> {
    os_env_overrides(std::env::vars_os())
}

/// Build an override source from raw OS environment pairs
///
/// Variables outside the `RUNCONF_` namespace are skipped whatever their
/// encoding. A `RUNCONF_*` value that is not valid UTF-8 is an error.
pub fn os_env_overrides<I>(vars: I) -> Result<RawSource>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut utf8 = Vec::new();
    for (name, value) in vars {
        let Ok(name) = name.into_string() else {
            continue;
        };
        if !name.starts_with(ENV_PREFIX) {
            continue;
        }
        let value = value
            .into_string()
            .map_err(|_| Error::validation(&name, "value is not valid UTF-8"))?;
        utf8.push((name, value));
    }
    env_overrides(utf8)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
