//! # Configuration Module
//!
//! Connection settings for the player's control API and the name of the
//! folder kept files are moved into. Values are fixed at process start.
//!
//! ## Layering
//!
//! 1. Built-in defaults (`localhost:42339`, empty password, folder `good`)
//! 2. A JSON config file, if one exists
//! 3. Command-line flags and `CURATOR_*` environment variables
//!
//! The config file is looked up in the platform config directory unless a
//! path is given explicitly:
//! - Linux: `~/.config/curator/config.json`
//! - macOS: `~/Library/Application Support/curator/config.json`
//! - Windows: `%APPDATA%\curator\config.json`
//!
//! ```json
//! { "port": 42339, "password": "hunter2", "good_folder": "good" }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 42339;
pub const DEFAULT_GOOD_FOLDER: &str = "good";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host the player's HTTP interface listens on
    pub host: String,
    pub port: u16,
    /// Password of the player's HTTP interface
    pub password: String,
    /// Subfolder, next to the played file, that kept files are moved into
    pub good_folder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: String::new(),
            good_folder: DEFAULT_GOOD_FOLDER.to_string(),
        }
    }
}

/// Values given on the command line or via environment; `None` keeps
/// whatever the lower layers set.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub password: Option<String>,
    pub good_folder: Option<String>,
}

impl Config {
    /// Resolve the final configuration.
    ///
    /// A missing file at the default location is fine; a missing file the
    /// user pointed at explicitly is not.
    pub fn load(explicit_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let base = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading config file {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read config file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("invalid config file {}: {e}", path.display()))
        })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        if let Some(good_folder) = overrides.good_folder {
            self.good_folder = good_folder;
        }
        self
    }

    /// The destination folder must be one plain path component, otherwise
    /// "move next to the file" could escape the file's directory.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::configuration("host must not be empty"));
        }

        let mut components = Path::new(&self.good_folder).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(Error::configuration(format!(
                "good folder '{}' must be a single folder name",
                self.good_folder
            ))),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}/requests", self.host, self.port)
    }
}

/// Platform config file location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("curator").join("config.json"))
}
