//! Per-test working directories

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::binding::PluginVersion;
use super::error::{HelperError, HelperResult};
use super::manager::Helper;

/// An isolated directory for one test to run the driver in
///
/// Borrows the [`Helper`] that created it, so the helper cannot be closed
/// while the working directory is alive. Dropping the working directory
/// removes it (best effort); anything left behind is reclaimed when the
/// helper closes.
#[derive(Debug)]
pub struct WorkingDir<'h> {
    helper: &'h Helper,
    dir: TempDir,
    version: PluginVersion,
}

impl<'h> WorkingDir<'h> {
    pub(crate) fn new(helper: &'h Helper, dir: TempDir) -> Self {
        Self {
            helper,
            dir,
            version: PluginVersion::Current,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn helper(&self) -> &'h Helper {
        self.helper
    }

    pub fn plugin_version(&self) -> PluginVersion {
        self.version
    }

    /// Switch which plugin build later driver commands use
    pub fn set_plugin_version(&mut self, version: PluginVersion) -> HelperResult<()> {
        if version == PluginVersion::Previous && !self.helper.has_previous_version() {
            return Err(HelperError::NoPreviousVersion);
        }
        self.version = version;
        Ok(())
    }

    /// Plugin directory for the selected version
    pub fn plugin_dir(&self) -> &'h Path {
        match self.version {
            PluginVersion::Current => self.helper.plugin_dir(),
            PluginVersion::Previous => self.helper.previous_plugin_dir(),
        }
    }

    /// A driver invocation that runs inside this directory
    pub fn driver_command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(self.helper.terraform_exec_path());
        cmd.current_dir(self.path()).args(args);
        cmd
    }

    /// `init` pointed at the selected plugin version
    pub fn init_command(&self) -> Command {
        let mut plugin_dir_flag = std::ffi::OsString::from("-plugin-dir=");
        plugin_dir_flag.push(self.plugin_dir());
        self.driver_command([OsStr::new("init"), plugin_dir_flag.as_os_str()])
    }

    /// Remove the directory now, reporting failures
    pub fn close(self) -> HelperResult<()> {
        let path = self.path().to_path_buf();
        log::debug!("Closing working directory {}", path.display());
        self.dir
            .close()
            .map_err(|source| HelperError::Cleanup { path, source })
    }

    /// Keep the directory on disk past this handle, e.g. to inspect a failure
    ///
    /// It is still removed when the helper closes.
    pub fn persist(self) -> PathBuf {
        self.dir.keep()
    }
}
