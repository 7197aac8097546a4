//! Run a plugin executable through a driver CLI from tests, against the
//! current build and optionally a previous one.
//!
//! ```no_run
//! use plugintest::{Config, Helper, PanicControl};
//!
//! let config = Config::new(
//!     "terraform-provider-example",
//!     "/usr/local/bin/terraform",
//!     "/build/terraform-provider-example",
//! );
//! let helper = Helper::init(&config)?;
//!
//! let wd = helper.require_new_working_dir(&PanicControl);
//! let status = wd.init_command().status()?;
//! assert!(status.success());
//! drop(wd);
//!
//! helper.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod helper;

pub use config::{discover_config, Config, ConfigError, ConfigResult};
pub use helper::{
    auto_init_helper, auto_init_provider_helper, Helper, HelperError, HelperResult, PanicControl,
    PluginVersion, TestControl, VersionBinding, WorkingDir,
};
