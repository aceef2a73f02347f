//! Configuration file loading
//!
//! Files are parsed by extension into a [`RawSource`]. Loading never
//! validates field types; the resolver does.

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::raw::RawSource;
use crate::common::paths::{find_source, project_root_of};
use crate::common::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Json,
    Yaml,
}

impl SourceFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Ok(SourceFormat::Toml),
            Some("json") => Ok(SourceFormat::Json),
            Some("yaml") | Some("yml") => Ok(SourceFormat::Yaml),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse configuration text in the given format
///
/// `origin` names the source in error messages.
pub fn parse_source(content: &str, format: SourceFormat, origin: &str) -> Result<RawSource> {
    let value: Value = match format {
        SourceFormat::Toml => {
            toml::from_str(content).map_err(|e| Error::config_parse(origin, e))?
        }
        SourceFormat::Json => {
            serde_json::from_str(content).map_err(|e| Error::config_parse(origin, e))?
        }
        SourceFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| Error::config_parse(origin, e))?
        }
    };
    RawSource::from_value(value)
}

/// Read and parse a configuration file
pub fn load_source(path: &Path) -> Result<RawSource> {
    let format = SourceFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| Error::SourceNotFound {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    tracing::debug!("Loaded configuration source {}", path.display());
    parse_source(&content, format, &path.display().to_string())
}

/// A located configuration source and the project root it defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSource {
    /// The source file, if one was given or found
    pub path: Option<PathBuf>,
    pub project_root: PathBuf,
}

/// Locate the configuration source for a run
///
/// An explicit path is used as-is (and must exist when loaded). Otherwise
/// the nearest `runconf.*` file above `cwd` is used; with none found the
/// project root is `cwd` and only defaults apply.
pub fn locate(explicit: Option<&Path>, cwd: &Path) -> LocatedSource {
    match explicit {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            LocatedSource {
                project_root: project_root_of(&path),
                path: Some(path),
            }
        }
        None => match find_source(cwd) {
            Some(path) => LocatedSource {
                project_root: project_root_of(&path),
                path: Some(path),
            },
            None => {
                tracing::info!(
                    "No configuration file found above {}, using defaults",
                    cwd.display()
                );
                LocatedSource {
                    path: None,
                    project_root: cwd.to_path_buf(),
                }
            }
        },
    }
}

impl LocatedSource {
    /// Load the located file, or an empty source when there is none
    pub fn load(&self) -> Result<RawSource> {
        match &self.path {
            Some(path) => load_source(path),
            None => Ok(RawSource::new()),
        }
    }
}
