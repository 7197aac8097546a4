//! Environment based initialization

use crate::common::fixtures::{fake_driver, fake_plugin, stdout_of, EnvGuard, PLUGIN_NAME};
use plugintest::config::discovery::{
    CONFIG_FILE_VAR, CURRENT_EXEC_VAR, PREVIOUS_EXEC_VAR, TERRAFORM_PATH_VAR,
};
use plugintest::{auto_init_helper, auto_init_provider_helper, ConfigError, HelperError};
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn test_auto_init_with_both_versions() {
    let scratch = TempDir::new().unwrap();
    let driver = fake_driver(scratch.path());
    let current = fake_plugin(scratch.path(), "v2");
    let previous = fake_plugin(scratch.path(), "v1");
    let _env = EnvGuard::isolated(scratch.path(), &[
        (TERRAFORM_PATH_VAR, &driver),
        (CURRENT_EXEC_VAR, &current),
        (PREVIOUS_EXEC_VAR, &previous),
    ]);

    let helper = auto_init_helper(PLUGIN_NAME).unwrap();

    assert!(helper.has_previous_version());
    assert_eq!(helper.terraform_exec_path(), driver);
    let wd = helper.new_working_dir().unwrap();
    assert!(stdout_of(wd.init_command()).starts_with("v2 "));

    drop(wd);
    helper.close().unwrap();
}

#[test]
#[serial]
fn test_auto_init_without_previous_version() {
    let scratch = TempDir::new().unwrap();
    let driver = fake_driver(scratch.path());
    let current = fake_plugin(scratch.path(), "v2");
    let _env = EnvGuard::isolated(
        scratch.path(),
        &[(TERRAFORM_PATH_VAR, &driver), (CURRENT_EXEC_VAR, &current)],
    );

    let helper = auto_init_helper(PLUGIN_NAME).unwrap();

    assert!(!helper.has_previous_version());
    helper.close().unwrap();
}

#[test]
#[serial]
fn test_auto_init_reports_unusable_previous_version() {
    let scratch = TempDir::new().unwrap();
    let driver = fake_driver(scratch.path());
    let missing = scratch.path().join("plugin-v0");
    let _env = EnvGuard::isolated(
        scratch.path(),
        &[(TERRAFORM_PATH_VAR, &driver), (PREVIOUS_EXEC_VAR, &missing)],
    );

    let err = auto_init_helper(PLUGIN_NAME).unwrap_err();

    assert!(matches!(
        err,
        HelperError::Discovery(ConfigError::PreviousExecUnusable { .. })
    ));
    assert!(err.to_string().contains("TF_ACC_PREVIOUS_EXEC"));
}

#[test]
#[serial]
fn test_auto_init_provider_helper_prefixes_name() {
    let scratch = TempDir::new().unwrap();
    let driver = fake_driver(scratch.path());
    let current = fake_plugin(scratch.path(), "v2");
    let _env = EnvGuard::isolated(
        scratch.path(),
        &[(TERRAFORM_PATH_VAR, &driver), (CURRENT_EXEC_VAR, &current)],
    );

    let helper = auto_init_provider_helper("example");

    assert_eq!(helper.plugin_name(), PLUGIN_NAME);
    assert!(helper.plugin_dir().join(PLUGIN_NAME).exists());
    helper.close().unwrap();
}

#[test]
#[serial]
fn test_auto_init_ignores_outer_environment() {
    let host = (
        std::env::var_os(PREVIOUS_EXEC_VAR),
        std::env::var_os(CONFIG_FILE_VAR),
    );
    let outer = TempDir::new().unwrap();
    let outer_previous = fake_plugin(outer.path(), "v0");
    let outer_config = outer.path().join("outer.toml");
    std::fs::write(
        &outer_config,
        format!("previous-plugin-exec-path = {:?}\n", outer_previous.display().to_string()),
    )
    .unwrap();
    std::env::set_var(PREVIOUS_EXEC_VAR, &outer_previous);
    std::env::set_var(CONFIG_FILE_VAR, &outer_config);

    {
        let scratch = TempDir::new().unwrap();
        let driver = fake_driver(scratch.path());
        let current = fake_plugin(scratch.path(), "v2");
        let _env = EnvGuard::isolated(
            scratch.path(),
            &[(TERRAFORM_PATH_VAR, &driver), (CURRENT_EXEC_VAR, &current)],
        );

        let helper = auto_init_helper(PLUGIN_NAME).unwrap();
        assert!(!helper.has_previous_version());
        helper.close().unwrap();
    }

    assert_eq!(
        std::env::var_os(PREVIOUS_EXEC_VAR),
        Some(outer_previous.clone().into_os_string())
    );
    assert_eq!(
        std::env::var_os(CONFIG_FILE_VAR),
        Some(outer_config.clone().into_os_string())
    );

    for (key, value) in [(PREVIOUS_EXEC_VAR, host.0), (CONFIG_FILE_VAR, host.1)] {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
