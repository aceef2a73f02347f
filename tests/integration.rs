//! End-to-end tests for the runconf CLI
//!
//! These tests write a project layout into a scratch directory, run the
//! built binary against it and check what it prints.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

/// Scratch project with its own configuration file
struct TestContext {
    /// Keeps the scratch directory alive until the test ends
    _dir: tempfile::TempDir,
    /// Canonical project root, matching what the binary sees as its cwd
    root: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path().canonicalize().expect("Failed to canonicalize temp dir");
        Self { _dir: dir, root }
    }

    fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file relative to the project root
    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Run runconf from the project root with a clean override environment
    fn run(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        self.run_in(self.root(), args, env)
    }

    fn run_in(&self, cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = self.command(cwd, args);
        for (name, value) in env {
            cmd.env(name, value);
        }
        cmd.output().expect("Failed to run runconf")
    }

    /// Command for runconf with every inherited RUNCONF_* variable removed
    fn command(&self, cwd: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_runconf"));
        cmd.args(args).current_dir(cwd).env("RUST_LOG", "off");
        for (name, _) in std::env::vars_os() {
            if name.to_string_lossy().starts_with("RUNCONF_") {
                cmd.env_remove(name);
            }
        }
        cmd
    }

    /// Run and parse stdout as JSON, asserting success
    fn run_json(&self, args: &[&str], env: &[(&str, &str)]) -> Value {
        let output = self.run(args, env);
        assert!(
            output.status.success(),
            "runconf failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
    }
}

const PERSISTED_TOML: &str = r#"
reporter = "junit"

[e2e]
specPattern = "cypress/integration/**/*.spec.js"
resultsFolder = "results"
videosFolder = "cypress/videos"
screenshotsFolder = "cypress/screenshots"
fixturesFolder = "cypress/fixtures"
supportFile = false

[reporterOptions]
mochaFile = "results/cypress_result.xml"
toConsole = true
"#;

#[test]
fn test_resolve_prints_anchored_configuration() {
    let ctx = TestContext::new();
    ctx.write("runconf.toml", PERSISTED_TOML);
    let root = ctx.root().to_path_buf();

    let json = ctx.run_json(&["resolve"], &[]);

    assert_eq!(json["specPattern"][0], "cypress/integration/**/*.spec.js");
    assert_eq!(json["supportFile"], false);
    assert_eq!(json["reporterName"], "junit");
    assert_eq!(
        json["resultsFolder"].as_str().map(PathBuf::from),
        Some(root.join("results"))
    );
    assert_eq!(
        json["reporterOptions"]["mochaFile"].as_str().map(PathBuf::from),
        Some(root.join("results/cypress_result.xml"))
    );
    assert_eq!(json["reporterOptions"]["toConsole"], true);
}

#[test]
fn test_resolve_finds_config_in_parent_directory() {
    let ctx = TestContext::new();
    ctx.write("runconf.json", r#"{ "specPattern": "e2e/*.cy.js" }"#);
    let nested = ctx.root().join("cypress").join("integration");
    fs::create_dir_all(&nested).unwrap();

    let output = ctx.run_in(&nested, &["resolve"], &[]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["specPattern"][0], "e2e/*.cy.js");
}

#[test]
fn test_profile_flag_selects_bundled_defaults() {
    let ctx = TestContext::new();
    ctx.write("runconf.yaml", "specPattern: a/*.js\n");

    let json = ctx.run_json(&["resolve", "--profile", "bundled"], &[]);
    assert_eq!(
        json["supportFile"].as_str().map(PathBuf::from),
        Some(ctx.root().join("cypress/support/index.js"))
    );
}

#[test]
fn test_env_overrides_apply_unless_disabled() {
    let ctx = TestContext::new();
    ctx.write("runconf.toml", PERSISTED_TOML);
    let env = [("RUNCONF_TO_CONSOLE", "false"), ("RUNCONF_SPEC_PATTERN", "smoke/*.js")];

    let json = ctx.run_json(&["resolve"], &env);
    assert_eq!(json["reporterOptions"]["toConsole"], false);
    assert_eq!(json["specPattern"], serde_json::json!(["smoke/*.js"]));

    let json = ctx.run_json(&["resolve", "--no-env"], &env);
    assert_eq!(json["reporterOptions"]["toConsole"], true);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let ctx = TestContext::new();
    ctx.write("runconf.toml", PERSISTED_TOML);

    let output = ctx
        .command(ctx.root(), &["resolve"])
        .env("UNRELATED", OsStr::from_bytes(b"\xff\xfe"))
        .output()
        .expect("Failed to run runconf");
    assert!(
        output.status.success(),
        "runconf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = ctx
        .command(ctx.root(), &["resolve"])
        .env("RUNCONF_VIDEOS_FOLDER", OsStr::from_bytes(b"\xff\xfe"))
        .output()
        .expect("Failed to run runconf");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("RUNCONF_VIDEOS_FOLDER"));
}

#[test]
fn test_empty_spec_pattern_exits_non_zero() {
    let ctx = TestContext::new();
    ctx.write("runconf.json", r#"{ "specPattern": [] }"#);

    let output = ctx.run(&["resolve"], &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Invalid value for 'specPattern'"), "{}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_strict_flag_rejects_unknown_option() {
    let ctx = TestContext::new();
    ctx.write("runconf.json", r#"{ "viewportWidth": 1280 }"#);

    assert!(ctx.run(&["resolve"], &[]).status.success());

    let output = ctx.run(&["resolve", "--strict"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("viewportWidth"));
}

#[test]
fn test_missing_explicit_config_is_reported() {
    let ctx = TestContext::new();

    let output = ctx.run(&["resolve", "--config", "nope.toml"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found or unreadable"));
}

#[test]
fn test_specs_lists_matching_files() {
    let ctx = TestContext::new();
    ctx.write("runconf.toml", PERSISTED_TOML);
    let login = ctx.write("cypress/integration/login.spec.js", "");
    let cart = ctx.write("cypress/integration/shop/cart.spec.js", "");
    ctx.write("cypress/integration/shop/utils.js", "");

    let output = ctx.run(&["specs"], &[]);
    assert!(output.status.success());

    let listed: Vec<PathBuf> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(PathBuf::from)
        .collect();
    let mut expected = vec![login, cart];
    expected.sort();
    assert_eq!(listed, expected);
}

#[test]
fn test_profiles_lists_both() {
    let ctx = TestContext::new();
    let output = ctx.run(&["profiles"], &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("standalone"));
    assert!(stdout.contains("bundled"));
    assert!(stdout.contains("cypress/support/index.js"));
}
