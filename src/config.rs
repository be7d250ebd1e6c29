use crate::domain::Scheme;
use crate::error::{Result, VersionerError};
use crate::git::Backend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "versioner.toml";

/// Represents the complete configuration for git-versioner.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub version: VersionConfig,
}

fn default_resolve_detached() -> bool {
    true
}

/// How the repository is read.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_resolve_detached")]
    pub resolve_detached: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            backend: Backend::default(),
            resolve_detached: default_resolve_detached(),
        }
    }
}

/// Default formatting options, overridable from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VersionConfig {
    #[serde(default)]
    pub scheme: Option<Scheme>,

    #[serde(default)]
    pub include_hash: bool,

    #[serde(default)]
    pub docker: bool,
}

/// Per-user configuration file location, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-versioner").join(CONFIG_FILE))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versioner.toml` in current directory
/// 3. `git-versioner/versioner.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE).exists() {
        PathBuf::from(CONFIG_FILE)
    } else {
        match user_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        }
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        VersionerError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    parse_config(&contents)
        .map_err(|e| VersionerError::config(format!("Invalid '{}': {}", path.display(), e)))
}

/// Parse configuration from TOML text.
pub fn parse_config(contents: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(contents)
}
