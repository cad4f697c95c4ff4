use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{Actor, Category, Result, TodoError};

const CONFIG_FILE: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Wallet address used as the current actor when none is given on the command line
    pub address: Option<String>,

    /// Category for new todos when `--category` is omitted
    pub default_category: Category,

    /// Whether new todos are public unless `--private` is passed
    pub default_public: bool,

    /// Colorize text output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: None,
            default_category: Category::Personal,
            default_public: true,
            color: true,
        }
    }
}

impl Config {
    /// Location of the config file in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "todoboard").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Loads the config from `path`, or from the default location.
    ///
    /// A missing file gives the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => {
                    debug!("No config directory available, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse config {}: {}", path.display(), e);
            TodoError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            }
        })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes the config as pretty JSON, replacing the file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create config directory {}: {}", dir.display(), e);
                TodoError::DirectoryError {
                    path: dir.to_path_buf(),
                }
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        write_atomically(path, json.as_bytes())?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Updates one setting from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |expected: &str| TodoError::ConfigError {
            message: format!("Invalid value '{}' for {}, expected {}", value, key, expected),
        };

        match key.trim() {
            "address" => {
                self.address = Some(value.to_string()).filter(|v| !v.is_empty());
            }
            "default_category" => {
                self.default_category = value
                    .parse()
                    .map_err(|_| invalid("work, personal, health or learning"))?;
            }
            "default_public" => {
                self.default_public = value.trim().parse().map_err(|_| invalid("true or false"))?;
            }
            "color" => {
                self.color = value.trim().parse().map_err(|_| invalid("true or false"))?;
            }
            other => {
                return Err(TodoError::ConfigError {
                    message: format!("Unknown setting '{}'", other),
                })
            }
        }

        debug!("Config {} set to {}", key, value);
        Ok(())
    }

    /// The actor for this session: an explicit address wins over the configured one
    pub fn actor(&self, address: Option<String>) -> Actor {
        let explicit = Actor::new(address);
        if explicit.address().is_some() {
            return explicit;
        }
        Actor::new(self.address.clone())
    }
}

/// Writes `bytes` to a temporary file next to `path`, then moves it into place
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file in {}: {}", dir.display(), e);
        TodoError::Io(e)
    })?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        TodoError::Io(e.error)
    })?;

    Ok(())
}
