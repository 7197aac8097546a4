//! Configuration discovery
//!
//! Builds a [`Config`] from an optional TOML file and the `TF_ACC_*`
//! environment variables. Environment values win over file values, and
//! relative executable paths are made absolute against the current directory.

use std::path::{Path, PathBuf};

use super::file::default_config_path;
use super::{validate_plugin_name, Config, ConfigError, ConfigResult};

pub const TERRAFORM_PATH_VAR: &str = "TF_ACC_TERRAFORM_PATH";
pub const CURRENT_EXEC_VAR: &str = "TF_ACC_CURRENT_EXEC";
pub const PREVIOUS_EXEC_VAR: &str = "TF_ACC_PREVIOUS_EXEC";
pub const KEEP_TEMP_VAR: &str = "TF_ACC_KEEP_TEMP";
pub const CONFIG_FILE_VAR: &str = "TF_ACC_CONFIG_FILE";

const DEFAULT_DRIVER_NAME: &str = "terraform";
const PATH_VAR: &str = "PATH";

/// Discover a configuration for `plugin_name` from the process environment
///
/// The current plugin defaults to the running executable, matching test
/// binaries that serve the plugin themselves.
pub fn discover_config(plugin_name: &str) -> ConfigResult<Config> {
    discover_from(
        plugin_name,
        |key| std::env::var(key).ok(),
        default_config_path(),
    )
}

pub(crate) fn discover_from(
    plugin_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
    default_file: Option<PathBuf>,
) -> ConfigResult<Config> {
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    validate_plugin_name(plugin_name)?;

    let mut config = match var(CONFIG_FILE_VAR) {
        Some(path) => Config::from_toml_file(Path::new(&path))?,
        None => match default_file {
            Some(path) if path.exists() => Config::from_toml_file(&path)?,
            _ => Config::default(),
        },
    };
    config.plugin_name = plugin_name.to_string();

    if let Some(path) = var(TERRAFORM_PATH_VAR) {
        config.driver_exec_path = PathBuf::from(path);
    }
    if config.driver_exec_path.as_os_str().is_empty() {
        config.driver_exec_path =
            find_driver(lookup(PATH_VAR)).ok_or(ConfigError::DriverNotFound)?;
    } else if config.driver_exec_path.components().count() > 1 {
        config.driver_exec_path = absolute_exec(&config.driver_exec_path)?;
    }

    if let Some(path) = var(CURRENT_EXEC_VAR) {
        config.current_plugin_exec_path = Some(PathBuf::from(path));
    }
    config.current_plugin_exec_path = match config.current_plugin_exec() {
        Some(path) => Some(absolute_exec(path)?),
        None => Some(std::env::current_exe().map_err(ConfigError::CurrentExec)?),
    };

    if let Some(path) = var(PREVIOUS_EXEC_VAR) {
        config.previous_plugin_exec_path = Some(PathBuf::from(path));
    }
    config.previous_plugin_exec_path = match config.previous_plugin_exec() {
        Some(path) => Some(absolute_exec(path)?),
        None => None,
    };
    if let Some(prev) = config.previous_plugin_exec() {
        check_previous_exec(prev)?;
    }

    if let Some(value) = var(KEEP_TEMP_VAR) {
        config.keep_on_failure = parse_flag(&value);
    }

    log::debug!(
        "Discovered config for {}: driver={}, previous version {}",
        config.plugin_name,
        config.driver_exec_path.display(),
        if config.previous_plugin_exec().is_some() {
            "available"
        } else {
            "not available"
        }
    );

    Ok(config)
}

fn find_driver(search_path: Option<String>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    which::which_in(DEFAULT_DRIVER_NAME, search_path, cwd).ok()
}

// Plugin links and driver commands are resolved from other directories than
// the one discovery ran in.
fn absolute_exec(path: &Path) -> ConfigResult<PathBuf> {
    std::path::absolute(path).map_err(|source| ConfigError::ExecPath {
        path: path.to_path_buf(),
        source,
    })
}

fn check_previous_exec(path: &Path) -> ConfigResult<()> {
    let meta = std::fs::metadata(path).map_err(|source| ConfigError::PreviousExecUnusable {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(ConfigError::PreviousExecNotRegular {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
