use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::OpenMode;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_browser_path")]
    pub browser_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub vim_mode: bool,
    /// Where the local host keeps repository definitions
    #[serde(default)]
    pub repositories_file: Option<PathBuf>,
    #[serde(default)]
    pub mode: OpenMode,
}

fn default_base_url() -> String {
    "http://localhost:9051".to_string()
}

fn default_browser_path() -> String {
    "/cxf/browser".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            browser_path: default_browser_path(),
            request_timeout_secs: default_request_timeout_secs(),
            vim_mode: false,
            repositories_file: None,
            mode: OpenMode::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Endpoint root the browser client talks to
    pub fn browser_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.browser_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn repositories_path(&self) -> PathBuf {
        match &self.repositories_file {
            Some(path) => path.clone(),
            None => dirs::config_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("repotui")
                .join("repositories.json"),
        }
    }
}

/// Determine the config file path with fallback logic
///
/// Returns `Ok(None)` when no config exists anywhere, in which case the
/// defaults apply.
pub fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    // If CLI argument provided, it must exist
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    // Try ~/.config/repotui/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("repotui").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.base_url, "http://localhost:9051");
        assert_eq!(config.browser_url(), "http://localhost:9051/cxf/browser");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.mode, OpenMode::Open);
    }

    #[test]
    fn test_browser_url_joins_slashes() {
        let config = Config::from_yaml(
            "base_url: http://pdi:8080/\nbrowser_path: /cxf/browser\nmode: save\n",
        )
        .unwrap();
        assert_eq!(config.browser_url(), "http://pdi:8080/cxf/browser");
        assert_eq!(config.mode, OpenMode::Save);
    }

    #[test]
    fn test_explicit_repositories_file() {
        let config = Config::from_yaml("repositories_file: /tmp/repos.json").unwrap();
        assert_eq!(config.repositories_path(), PathBuf::from("/tmp/repos.json"));
    }

    #[test]
    fn test_missing_cli_config_is_error() {
        let result = get_config_path(Some("/definitely/not/here.yaml".to_string()));
        assert!(result.is_err());
    }
}
