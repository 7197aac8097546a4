//! TOML configuration file loading
//!
//! A config file uses the kebab-case field names of [`Config`]:
//!
//! ```toml
//! driver-exec-path = "/usr/local/bin/terraform"
//! previous-plugin-exec-path = "/opt/builds/terraform-provider-example_v1"
//! keep-on-failure = true
//! ```

use std::path::{Path, PathBuf};

use super::{Config, ConfigError, ConfigResult};

const CONFIG_DIR_NAME: &str = "plugintest";
const CONFIG_FILE_NAME: &str = "plugintest.toml";

impl Config {
    /// Parse a config from TOML text; `origin` is only used in error messages
    pub fn from_toml_str(contents: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::FileParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a config file that the caller named explicitly; it must exist
    pub fn from_toml_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded helper configuration from {}", path.display());
        Self::from_toml_str(&contents, path)
    }
}

/// Per-user config file location, whether or not it exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
