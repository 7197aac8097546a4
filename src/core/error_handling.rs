//! Generic error handling utilities
//!
//! Lets the helper report any of its error types the same way when a test
//! process has to give up: a single fatal line, with the detail at debug level.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// A test author can fix a user-actionable error themselves (a missing
/// environment variable, an empty plugin name). System errors are filesystem
/// failures the author can only retry or investigate.
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message worth showing verbatim
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// # Arguments
/// * `error` - The error to handle (must implement ContextualError)
/// * `operation_context` - Human-readable description of the operation that failed
///
/// # Examples
/// ```rust
/// # use plugintest::core::error_handling::log_error_with_context;
/// # use plugintest::config::ConfigError;
/// let err = ConfigError::EmptyPluginName;
/// log_error_with_context(&err, "Test helper initialization");
/// // Logs: "FATAL: plugin name must not be empty"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
