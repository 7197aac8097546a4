//! Helper test suite
//!
//! Every test builds its helper below its own scratch directory so tests can
//! run in parallel and inspect what was left behind.


use crate::config::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(super) const PLUGIN_NAME: &str = "terraform-provider-example";

/// Write a stand-in plugin executable into `dir`
pub(super) fn fake_plugin(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, b"#!/bin/sh\nexit 0\n").unwrap();
    path
}

/// Config rooted in `scratch` with only a current plugin build
pub(super) fn current_only_config(scratch: &TempDir) -> Config {
    let current = fake_plugin(scratch.path(), "plugin-v2");
    Config::new(PLUGIN_NAME, "/usr/local/bin/terraform", current)
        .with_temp_root(scratch.path().join("tmp"))
}

/// Config rooted in `scratch` with current and previous builds
pub(super) fn two_version_config(scratch: &TempDir) -> Config {
    let previous = fake_plugin(scratch.path(), "plugin-v1");
    current_only_config(scratch).with_previous_plugin(previous)
}

/// Scratch directory with the `tmp/` parent the configs above point at
pub(super) fn scratch() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("tmp")).unwrap();
    dir
}

pub(super) fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// `path` spelled relative to the current directory
#[cfg(unix)]
pub(super) fn relative_from_cwd(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap();
    let mut relative = PathBuf::new();
    for _ in cwd.components().skip(1) {
        relative.push("..");
    }
    relative.join(path.strip_prefix("/").unwrap())
}
