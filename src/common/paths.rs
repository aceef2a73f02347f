//! Project root and configuration file locations
//!
//! A project root is the directory holding the configuration source. Every
//! path field of a resolved configuration is relative to it.

use std::path::{Path, PathBuf};

/// Configuration file names, in lookup order within one directory
pub const SOURCE_FILE_NAMES: &[&str] = &[
    "runconf.toml",
    "runconf.json",
    "runconf.yaml",
    "runconf.yml",
];

/// Find the configuration source by walking up from `start`
///
/// Returns the first file from [`SOURCE_FILE_NAMES`] found in `start` or any
/// of its ancestors.
pub fn find_source(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        SOURCE_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Project root for a configuration source: the directory containing it
pub fn project_root_of(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Resolve `path` against `root`
///
/// Absolute paths are returned unchanged. An empty root leaves relative
/// paths untouched. Pure path manipulation; nothing is touched on disk.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || root.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
