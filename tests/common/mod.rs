//! Common test utilities for tokenpad CLI tests.
//!
//! `TestEnv` is an isolated project directory plus an isolated user config
//! directory, with a helper to run the tokenpad binary against it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a tokenpad CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as JSON
    pub fn ndjson(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

/// Isolated project and config directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            config_home: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with the starter config and tokens
    pub fn seeded() -> Self {
        let env = Self::new();
        let result = env.run(&["init"]);
        assert!(result.success, "init failed: {}", result.combined_output());
        env
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.project_path(relative)).unwrap()
    }

    /// Run tokenpad with `--root` pointing at the project
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_tokenpad"))
            .arg("--root")
            .arg(self.root())
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("TOKENPAD_CONFIG_FILE")
            .env_remove("TOKENPAD_DEBOUNCE_MS")
            .env_remove("TOKENPAD_STRATEGY")
            .env_remove("TOKENPAD_VERBOSITY")
            .output()
            .unwrap();

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
