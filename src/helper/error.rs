//! Helper Error Types

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::core::error_handling::ContextualError;

/// Errors raised while setting up, using or tearing down a [`Helper`](super::Helper)
#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    /// The configuration handed to `Helper::init` is unusable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Discovery could not produce a configuration
    #[error(transparent)]
    Discovery(#[from] ConfigError),

    #[error("failed to create temporary directory for {purpose} in {}: {source}", .parent.display())]
    TempDir {
        purpose: &'static str,
        parent: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create plugin link at {} to {}: {source}", .link.display(), .target.display())]
    Binding {
        link: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove helper directory {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A previous-version operation was used although no previous version is bound
    #[error("no previous plugin version is available; check has_previous_version() first")]
    NoPreviousVersion,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type HelperResult<T> = Result<T, HelperError>;

impl HelperError {
    /// True for misuse of the helper API rather than an environment problem
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, HelperError::NoPreviousVersion)
    }
}

impl ContextualError for HelperError {
    fn is_user_actionable(&self) -> bool {
        match self {
            HelperError::Configuration { .. } => true,
            HelperError::Discovery(err) => err.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            HelperError::Configuration { message } => Some(message),
            HelperError::Discovery(err) => err.user_message(),
            _ => None,
        }
    }
}
