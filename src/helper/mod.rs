//! Test Helper Module
//!
//! Sets up the current (and optionally previous) plugin builds so a driver
//! CLI can be pointed at either one, and provisions isolated working
//! directories for individual tests.

pub mod api;
pub mod binding;
pub mod control;
pub mod error;
pub mod manager;
pub mod working_dir;

#[cfg(test)]
mod tests;

pub use api::{auto_init_helper, auto_init_provider_helper, provider_plugin_name};
pub use binding::{PluginVersion, VersionBinding};
pub use control::{PanicControl, TestControl};
pub use error::{HelperError, HelperResult};
pub use manager::Helper;
pub use working_dir::WorkingDir;
