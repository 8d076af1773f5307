//! On-disk configuration: API location, date parsing and the selected repository.
//!
//! ```yaml
//! api_url: https://api.github.com
//! user_agent: gitmycommits/0.1.0
//! date_decoding: iso8601
//! account: mikenowakme
//! repository: GitMyCommits
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::request::DEFAULT_API_URL;
use crate::api::DateDecoding;
use crate::models::{RepositoryCoordinates, DEFAULT_ACCOUNT, DEFAULT_REPOSITORY};

const APP_DIR: &str = "gitmycommits";
const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub user_agent: String,
    pub date_decoding: DateDecoding,
    pub account: String,
    pub repository: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("gitmycommits/", env!("CARGO_PKG_VERSION")).to_string(),
            date_decoding: DateDecoding::default(),
            account: DEFAULT_ACCOUNT.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
        }
    }
}

impl Config {
    /// Resolve the config path.
    ///
    /// Resolution order:
    /// 1. Explicit path (`~` is expanded)
    /// 2. `$XDG_CONFIG_HOME/gitmycommits/config.yml`
    /// 3. `~/.config/gitmycommits/config.yml`
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).as_ref())),
            None => Self::default_path(),
        }
    }

    fn default_path() -> Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return Ok(PathBuf::from(xdg).join(APP_DIR).join(CONFIG_FILE));
            }
        }

        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn coordinates(&self) -> RepositoryCoordinates {
        RepositoryCoordinates::new(&self.account, &self.repository)
    }

    pub fn set_coordinates(&mut self, coordinates: RepositoryCoordinates) {
        self.account = coordinates.account;
        self.repository = coordinates.repository;
    }
}
