//! Repository configuration
//!
//! Stored at `.commithub/config.toml`. Every section falls back to its
//! defaults, so a partial or missing file is fine.

use crate::error::{Error, Result};
use crate::store::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";

/// Per-repository configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub store: StoreConfig,
    pub log: LogConfig,
    pub diff: DiffConfig,
    pub ui: UiConfig,
}

/// Object store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Re-hash objects on read and fail on mismatch (default: true)
    pub verify_objects: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            verify_objects: true,
        }
    }
}

/// `log` command defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum commits to show, 0 = unlimited
    pub limit: usize,
}

/// `diff` command defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Print the full file content before the line diff (default: true)
    pub show_content: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { show_content: true }
    }
}

/// Console output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Colored output (default: true)
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl RepoConfig {
    /// Load from `<repo_dir>/config.toml`, defaults if the file is absent
    pub fn load(repo_dir: &Path) -> Result<Self> {
        let path = repo_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::io(&path, e)),
        };

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::malformed("config", e))
    }

    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).map_err(|e| Error::malformed("config", e))?;
        Ok(format!("# commithub repository configuration\n\n{}", body))
    }

    /// Write to `<repo_dir>/config.toml` atomically
    pub fn save(&self, repo_dir: &Path) -> Result<()> {
        let content = self.to_toml()?;
        atomic_write(
            &repo_dir.join("tmp"),
            &repo_dir.join(CONFIG_FILE),
            content.as_bytes(),
        )
    }
}
