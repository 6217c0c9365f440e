//! [`TestHome`]: a temporary configuration directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding `config.json` (and optionally `settings.toml`).
pub struct TestHome {
    temp_dir: TempDir,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the configuration file (it may not exist yet).
    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.json")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root().join("settings.toml")
    }

    /// Write `config.json` with the given package entries (each a JSON value).
    pub fn write_packages(&self, packages: serde_json::Value) {
        let doc = serde_json::json!({ "packages": packages });
        fs::write(self.config_path(), serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    }

    /// Parsed `config.json`.
    pub fn read_config(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.config_path())
            .unwrap_or_else(|_| panic!("Could not read {}", self.config_path().display()));
        serde_json::from_str(&content).unwrap()
    }

    /// The `packages` array of `config.json`.
    pub fn read_packages(&self) -> Vec<serde_json::Value> {
        self.read_config()["packages"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_settings(&self, content: &str) {
        fs::write(self.settings_path(), content).unwrap();
    }
}
