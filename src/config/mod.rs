//! Helper Configuration
//!
//! A [`Config`] names the plugin under test, the driver executable and the
//! plugin builds to bind. It is usually produced by [`discover_config`], but
//! callers with unusual requirements can build one by hand.

pub mod discovery;
pub mod error;
pub mod file;


pub use discovery::discover_config;
pub use error::{ConfigError, ConfigResult};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the plugin builds and the driver executable live
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Executable name the driver expects to find in a plugin directory
    pub plugin_name: String,
    /// Driver CLI executable used by tests
    pub driver_exec_path: PathBuf,
    /// Plugin build under test (required by [`Helper::init`](crate::helper::Helper::init))
    pub current_plugin_exec_path: Option<PathBuf>,
    /// Prior plugin build for upgrade tests
    pub previous_plugin_exec_path: Option<PathBuf>,
    /// Parent directory for the helper's temporary tree (defaults to the system temp dir)
    pub temp_root: Option<PathBuf>,
    /// Leave the temporary tree behind when initialization fails
    pub keep_on_failure: bool,
}

impl Config {
    pub fn new(
        plugin_name: impl Into<String>,
        driver_exec_path: impl Into<PathBuf>,
        current_plugin_exec_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            driver_exec_path: driver_exec_path.into(),
            current_plugin_exec_path: Some(current_plugin_exec_path.into()),
            ..Default::default()
        }
    }

    pub fn with_previous_plugin(mut self, path: impl Into<PathBuf>) -> Self {
        self.previous_plugin_exec_path = Some(path.into());
        self
    }

    pub fn with_temp_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(path.into());
        self
    }

    pub fn keep_on_failure(mut self) -> Self {
        self.keep_on_failure = true;
        self
    }

    /// Current plugin path, treating an empty path as unset
    pub fn current_plugin_exec(&self) -> Option<&Path> {
        non_empty(self.current_plugin_exec_path.as_deref())
    }

    /// Previous plugin path, treating an empty path as unset
    pub fn previous_plugin_exec(&self) -> Option<&Path> {
        non_empty(self.previous_plugin_exec_path.as_deref())
    }

    /// Check that `plugin_name` can be used as a directory entry name
    pub fn validate_plugin_name(&self) -> ConfigResult<()> {
        validate_plugin_name(&self.plugin_name)
    }
}

pub(crate) fn validate_plugin_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::EmptyPluginName);
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(single)), None) if single == name => Ok(()),
        _ => Err(ConfigError::InvalidPluginName {
            name: name.to_string(),
        }),
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
