//! Resolved run configuration types

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::pattern;
use crate::common::paths::resolve_against;
use crate::common::{Error, Result};

/// Support file loaded once before any test runs
///
/// Persisted as either a path string or `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportFile {
    /// No support file; nothing is located or loaded
    Disabled,
    /// Load this file before the first test
    Path(PathBuf),
}

impl SupportFile {
    /// Path of the support file, if enabled
    pub fn path(&self) -> Option<&Path> {
        match self {
            SupportFile::Disabled => None,
            SupportFile::Path(path) => Some(path),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, SupportFile::Disabled)
    }
}

impl Serialize for SupportFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SupportFile::Disabled => serializer.serialize_bool(false),
            SupportFile::Path(path) => path.serialize(serializer),
        }
    }
}

/// Options handed to the reporter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterOptions {
    /// Where the JUnit-style XML report is written
    pub mocha_file: PathBuf,

    /// Mirror report output to the console
    pub to_console: bool,

    /// Reporter-specific options passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fully resolved, validated run configuration
///
/// Produced once per resolution and shared read-only with the execution
/// engine afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    /// Root every path field is resolved against
    #[serde(skip_serializing_if = "is_empty_path")]
    pub project_root: PathBuf,

    /// Globs selecting the spec files of the run, relative to the root
    pub spec_pattern: Vec<String>,

    pub results_folder: PathBuf,
    pub videos_folder: PathBuf,
    pub screenshots_folder: PathBuf,
    pub fixtures_folder: PathBuf,

    pub support_file: SupportFile,

    /// Output report format, e.g. `junit`
    pub reporter_name: String,

    pub reporter_options: ReporterOptions,
}

fn is_empty_path(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

impl RunConfiguration {
    /// Check the invariants every resolved configuration must hold
    pub fn validate(&self) -> Result<()> {
        if self.spec_pattern.is_empty() {
            return Err(Error::validation(
                "specPattern",
                "must contain at least one pattern",
            ));
        }

        for (i, spec) in self.spec_pattern.iter().enumerate() {
            let field = format!("specPattern[{}]", i);
            if spec.trim().is_empty() {
                return Err(Error::validation(&field, "pattern must not be empty"));
            }
            pattern::check(spec)
                .map_err(|e| Error::validation(&field, format!("invalid glob '{}': {}", spec, e)))?;
        }

        for (field, path) in [
            ("resultsFolder", &self.results_folder),
            ("videosFolder", &self.videos_folder),
            ("screenshotsFolder", &self.screenshots_folder),
            ("fixturesFolder", &self.fixtures_folder),
            ("reporterOptions.mochaFile", &self.reporter_options.mocha_file),
        ] {
            if is_empty_path(path) {
                return Err(Error::validation(field, "path must not be empty"));
            }
        }

        if let SupportFile::Path(path) = &self.support_file {
            if is_empty_path(path) {
                return Err(Error::validation(
                    "supportFile",
                    "path must not be empty; use false to disable",
                ));
            }
        }

        if self.reporter_name.trim().is_empty() {
            return Err(Error::validation("reporterName", "must not be empty"));
        }

        Ok(())
    }

    /// Join every path field onto the project root
    pub(crate) fn anchor_paths(&mut self) {
        let root = self.project_root.clone();
        for path in [
            &mut self.results_folder,
            &mut self.videos_folder,
            &mut self.screenshots_folder,
            &mut self.fixtures_folder,
            &mut self.reporter_options.mocha_file,
        ] {
            *path = resolve_against(&root, path);
        }
        if let SupportFile::Path(path) = &mut self.support_file {
            *path = resolve_against(&root, path);
        }
    }

    /// Expand the spec patterns against the project root
    ///
    /// Touches the filesystem, so it is never called during resolution.
    /// Matches are de-duplicated and sorted.
    pub fn expand_specs(&self) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();
        for (i, spec) in self.spec_pattern.iter().enumerate() {
            for alt in pattern::alternatives(spec) {
                let full = pattern::anchor(&self.project_root, &alt);
                let entries = glob::glob(&full).map_err(|e| {
                    Error::validation(&format!("specPattern[{}]", i), e.to_string())
                })?;
                for entry in entries {
                    match entry {
                        Ok(path) if path.is_file() => {
                            files.insert(path);
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Skipping unreadable spec path: {}", e),
                    }
                }
            }
        }
        Ok(files.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;

    #[test]
    fn test_support_file_serializes_disabled_as_false() {
        let json = serde_json::to_value(SupportFile::Disabled).unwrap();
        assert_eq!(json, Value::Bool(false));

        let json = serde_json::to_value(SupportFile::Path("cypress/support/index.js".into())).unwrap();
        assert_eq!(json, Value::String("cypress/support/index.js".to_string()));
    }

    #[test]
    fn test_serialized_layout_uses_camel_case() {
        let json = serde_json::to_value(Profile::Standalone.defaults()).unwrap();
        assert_eq!(json["specPattern"][0], "cypress/integration/**/*.spec.js");
        assert_eq!(json["reporterName"], "junit");
        assert_eq!(json["reporterOptions"]["mochaFile"], "results/cypress_result.xml");
        assert_eq!(json["reporterOptions"]["toConsole"], true);
        assert_eq!(json["supportFile"], false);
        assert!(json.get("projectRoot").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let mut config = Profile::Standalone.defaults();
        config.spec_pattern = vec!["cypress/[".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("specPattern[0]"));
    }

    #[test]
    fn test_validate_rejects_empty_support_path() {
        let mut config = Profile::Bundled.defaults();
        config.support_file = SupportFile::Path(PathBuf::new());
        assert!(config.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_anchor_paths_leaves_disabled_support() {
        let mut config = Profile::Standalone.defaults();
        config.project_root = PathBuf::from("/proj");
        config.anchor_paths();
        assert_eq!(config.results_folder, PathBuf::from("/proj/results"));
        assert_eq!(
            config.reporter_options.mocha_file,
            PathBuf::from("/proj/results/cypress_result.xml")
        );
        assert!(config.support_file.is_disabled());
    }

    #[test]
    fn test_expand_specs_matches_files() {
        let dir = tempfile::tempdir().unwrap();
        let specs = dir.path().join("cypress").join("integration").join("login");
        std::fs::create_dir_all(&specs).unwrap();
        std::fs::write(specs.join("form.spec.js"), "").unwrap();
        std::fs::write(specs.join("helper.js"), "").unwrap();

        let mut config = Profile::Standalone.defaults();
        config.project_root = dir.path().to_path_buf();

        let files = config.expand_specs().unwrap();
        assert_eq!(files, vec![specs.join("form.spec.js")]);
    }

    #[test]
    fn test_expand_specs_under_root_with_glob_characters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj[1]");
        let specs = root.join("cypress").join("integration");
        std::fs::create_dir_all(&specs).unwrap();
        std::fs::write(specs.join("a.spec.js"), "").unwrap();
        // Would match "proj1" if the brackets were read as a character class
        let decoy = dir.path().join("proj1").join("cypress").join("integration");
        std::fs::create_dir_all(&decoy).unwrap();
        std::fs::write(decoy.join("b.spec.js"), "").unwrap();

        let mut config = Profile::Standalone.defaults();
        config.project_root = root;

        let files = config.expand_specs().unwrap();
        assert_eq!(files, vec![specs.join("a.spec.js")]);
    }

    #[test]
    fn test_expand_specs_with_braces_and_inline_globstar() {
        let dir = tempfile::tempdir().unwrap();
        let e2e = dir.path().join("cypress").join("e2e");
        std::fs::create_dir_all(&e2e).unwrap();
        std::fs::write(e2e.join("login.cy.js"), "").unwrap();
        std::fs::write(e2e.join("cart.cy.ts"), "").unwrap();

        let mut config = Profile::Standalone.defaults();
        config.project_root = dir.path().to_path_buf();
        config.spec_pattern = vec![
            "cypress/e2e/*.cy.{js,ts}".to_string(),
            "cypress/e2e/**.cy.js".to_string(),
        ];
        config.validate().unwrap();

        let files = config.expand_specs().unwrap();
        assert_eq!(files, vec![e2e.join("cart.cy.ts"), e2e.join("login.cy.js")]);
    }
}
