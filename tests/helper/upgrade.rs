//! Running driver commands against the current and previous plugin builds

use crate::common::fixtures::{fake_driver, fake_plugin, stdout_of, PLUGIN_NAME};
use plugintest::{Config, Helper, PanicControl, PluginVersion};
use serial_test::serial;
use tempfile::TempDir;

fn upgrade_config(scratch: &TempDir) -> Config {
    let driver = fake_driver(scratch.path());
    let current = fake_plugin(scratch.path(), "v2");
    let previous = fake_plugin(scratch.path(), "v1");
    Config::new(PLUGIN_NAME, driver, current).with_previous_plugin(previous)
}

/// Splits "<version> <cwd>" as printed by the fake plugins
fn version_and_dir(output: &str) -> (&str, &str) {
    output.split_once(' ').unwrap()
}

#[test]
#[serial]
fn test_driver_loads_current_plugin_in_working_dir() {
    let scratch = TempDir::new().unwrap();
    let config = upgrade_config(&scratch);
    let helper = Helper::init(&config).unwrap();
    let wd = helper.require_new_working_dir(&PanicControl);

    let output = stdout_of(wd.init_command());
    let (version, dir) = version_and_dir(&output);

    assert_eq!(version, "v2");
    assert_eq!(
        std::fs::canonicalize(dir).unwrap(),
        std::fs::canonicalize(wd.path()).unwrap()
    );

    wd.close().unwrap();
    helper.close().unwrap();
}

#[test]
#[serial]
fn test_upgrade_from_previous_to_current() {
    let scratch = TempDir::new().unwrap();
    let helper = Helper::init(&upgrade_config(&scratch)).unwrap();
    assert!(helper.has_previous_version());

    let mut wd = helper.require_new_working_dir(&PanicControl);
    std::fs::write(wd.path().join("main.tf"), "# shared between both runs").unwrap();

    wd.set_plugin_version(PluginVersion::Previous).unwrap();
    let before = stdout_of(wd.init_command());
    wd.set_plugin_version(PluginVersion::Current).unwrap();
    let after = stdout_of(wd.init_command());

    assert_eq!(version_and_dir(&before).0, "v1");
    assert_eq!(version_and_dir(&after).0, "v2");
    assert!(wd.path().join("main.tf").exists());

    drop(wd);
    helper.close().unwrap();
}

#[test]
#[serial]
fn test_working_dirs_run_in_isolation() {
    let scratch = TempDir::new().unwrap();
    let helper = Helper::init(&upgrade_config(&scratch)).unwrap();

    let a = helper.new_working_dir().unwrap();
    let b = helper.new_working_dir().unwrap();
    let out_a = stdout_of(a.init_command());
    let out_b = stdout_of(b.init_command());

    assert_ne!(version_and_dir(&out_a).1, version_and_dir(&out_b).1);

    let root = helper.root_dir().to_path_buf();
    drop((a, b));
    helper.close().unwrap();
    assert!(!root.exists());
}

#[test]
#[serial]
fn test_driver_without_plugin_dir_flag_fails() {
    let scratch = TempDir::new().unwrap();
    let helper = Helper::init(&upgrade_config(&scratch)).unwrap();
    let wd = helper.new_working_dir().unwrap();

    let status = wd.driver_command(["version"]).status().unwrap();
    assert_eq!(status.code(), Some(2));
}
