//! Version directory bindings
//!
//! A binding is a directory holding exactly one entry: the plugin executable
//! exposed under its canonical name. Pointing the driver's plugin directory
//! option at a binding pins which build it loads, without the driver knowing
//! anything about versions.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{HelperError, HelperResult};

/// Which plugin build a binding (or a working directory) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluginVersion {
    #[default]
    Current,
    Previous,
}

impl PluginVersion {
    fn dir_prefix(self) -> &'static str {
        match self {
            PluginVersion::Current => "plugins-current",
            PluginVersion::Previous => "plugins-previous",
        }
    }

    fn purpose(self) -> &'static str {
        match self {
            PluginVersion::Current => "the current plugin directory",
            PluginVersion::Previous => "the previous plugin directory",
        }
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginVersion::Current => write!(f, "current"),
            PluginVersion::Previous => write!(f, "previous"),
        }
    }
}

/// A directory exposing one plugin build under the plugin's canonical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBinding {
    version: PluginVersion,
    dir: PathBuf,
    target: PathBuf,
}

impl VersionBinding {
    /// Create a uniquely named binding directory under `root` and link
    /// `exec_path` into it as `plugin_name`
    ///
    /// A relative `exec_path` is taken relative to the current directory, not
    /// to the binding directory the link lives in.
    pub(crate) fn create(
        root: &Path,
        version: PluginVersion,
        plugin_name: &str,
        exec_path: &Path,
    ) -> HelperResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(version.dir_prefix())
            .tempdir_in(root)
            .map_err(|source| HelperError::TempDir {
                purpose: version.purpose(),
                parent: root.to_path_buf(),
                source,
            })?
            .keep();

        let link = dir.join(plugin_name);
        let target = std::path::absolute(exec_path)
            .and_then(|target| link_plugin(&target, &link).map(|()| target))
            .map_err(|source| HelperError::Binding {
                link: link.clone(),
                target: exec_path.to_path_buf(),
                source,
            })?;

        log::debug!(
            "Bound {} plugin {} -> {}",
            version,
            link.display(),
            target.display()
        );

        Ok(Self {
            version,
            dir,
            target,
        })
    }

    pub fn version(&self) -> PluginVersion {
        self.version
    }

    /// Directory to hand to the driver as its plugin directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The executable this binding exposes
    pub fn target(&self) -> &Path {
        &self.target
    }
}

#[cfg(unix)]
fn link_plugin(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

// Creating symlinks on Windows needs a privilege most test machines lack.
#[cfg(windows)]
fn link_plugin(target: &Path, link: &Path) -> std::io::Result<()> {
    match std::os::windows::fs::symlink_file(target, link) {
        Ok(()) => Ok(()),
        Err(err) => {
            log::debug!(
                "Symlink at {} unavailable ({}), copying the plugin instead",
                link.display(),
                err
            );
            std::fs::copy(target, link).map(|_| ())
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn link_plugin(target: &Path, link: &Path) -> std::io::Result<()> {
    std::fs::copy(target, link).map(|_| ())
}
