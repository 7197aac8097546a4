//! Configuration Error Types

use std::path::PathBuf;

use super::discovery::PREVIOUS_EXEC_VAR;

const DRIVER_NOT_FOUND: &str = "unable to find 'terraform' executable for testing; \
either place it in PATH or set TF_ACC_TERRAFORM_PATH explicitly to a direct executable path";

const EMPTY_PLUGIN_NAME: &str = "plugin name must not be empty";

/// Errors raised while discovering or loading a [`Config`](super::Config)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}", EMPTY_PLUGIN_NAME)]
    EmptyPluginName,

    #[error("plugin name '{name}' must be a single file name")]
    InvalidPluginName { name: String },

    #[error("{}", DRIVER_NOT_FOUND)]
    DriverNotFound,

    #[error("cannot determine the current plugin executable: {0}")]
    CurrentExec(#[source] std::io::Error),

    #[error("cannot resolve executable path {}: {source}", .path.display())]
    ExecPath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} of {} cannot be used: {source}", PREVIOUS_EXEC_VAR, .path.display())]
    PreviousExecUnusable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} of {} is not a regular file", PREVIOUS_EXEC_VAR, .path.display())]
    PreviousExecNotRegular { path: PathBuf },

    #[error("the specified configuration file does not exist: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("error reading configuration file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error parsing configuration file {}: {message}", .path.display())]
    FileParse { path: PathBuf, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            ConfigError::EmptyPluginName | ConfigError::DriverNotFound
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::EmptyPluginName => Some(EMPTY_PLUGIN_NAME),
            ConfigError::DriverNotFound => Some(DRIVER_NOT_FOUND),
            _ => None,
        }
    }
}
