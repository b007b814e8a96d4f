//! `study-centre.toml` configuration.
//!
//! ```toml
//! content = "content"
//!
//! [logging]
//! level = "info"
//! file = "study-centre.log"
//!
//! [exam]
//! default_count = 20
//! seed = 42
//!
//! [site]
//! name = "Study Centre"
//! base_url = "https://example.org/study"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "study-centre.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content file or directory.
    pub content: PathBuf,
    pub logging: LoggingConfig,
    pub exam: ExamSettings,
    pub site: SiteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            logging: LoggingConfig::default(),
            exam: ExamSettings::default(),
            site: SiteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Where the terminal UI logs, since it owns stdout.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("study-centre.log"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamSettings {
    /// Questions per attempt when the exam's own count is not wanted.
    pub default_count: Option<usize>,
    /// Fixed seed for repeatable question draws.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    /// Used for canonical links in exported pages.
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Study Centre".to_string(),
            base_url: None,
        }
    }
}

impl Config {
    /// Load `path`, or `study-centre.toml` in the working directory when it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
