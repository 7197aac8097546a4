//! Helper entry points
//!
//! Most test binaries only need [`auto_init_provider_helper`]: it discovers
//! the configuration from the environment and gives up on the whole process
//! if the tests cannot run.

use super::error::HelperResult;
use super::manager::Helper;
use crate::config::discover_config;
use crate::core::error_handling::log_error_with_context;

pub const PROVIDER_PREFIX: &str = "terraform-provider-";

/// Discover a configuration for `plugin_name` and initialize a helper with it
pub fn auto_init_helper(plugin_name: &str) -> HelperResult<Helper> {
    let config = discover_config(plugin_name)?;
    Helper::init(&config)
}

/// Initialize a helper for the provider called `name` (without the
/// `terraform-provider-` prefix), exiting the process on failure
pub fn auto_init_provider_helper(name: &str) -> Helper {
    match auto_init_helper(&provider_plugin_name(name)) {
        Ok(helper) => helper,
        Err(err) => {
            log_error_with_context(&err, "Test helper initialization");
            eprintln!("cannot run Terraform provider tests: {}", err);
            std::process::exit(1);
        }
    }
}

pub fn provider_plugin_name(name: &str) -> String {
    format!("{}{}", PROVIDER_PREFIX, name)
}
