use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub smoke: SmokeConfig,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct ScanConfig {
    /// Directory names never descended into
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct SmokeConfig {
    /// Base URL of the running application
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Redirects followed before a request is considered failed
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        ".venv".into(),
        "venv".into(),
        "__pycache__".into(),
        "node_modules".into(),
        ".git".into(),
    ]
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

impl Config {
    /// Load config from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to render config")
    }

    /// Write the default config to `path`, refusing to replace an existing
    /// file unless `r#override` is set
    pub fn init(path: &Path, r#override: bool) -> anyhow::Result<()> {
        if path.exists() && !r#override {
            bail!(
                "Config file {} already exists, pass --override to replace it",
                path.display()
            );
        }
        fs::write(path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
