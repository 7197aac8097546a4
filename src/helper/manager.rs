//! Helper lifecycle
//!
//! One [`Helper`] serves every test in a test binary: it is initialized once,
//! hands out working directories to any number of tests (in parallel, from
//! many threads) and is closed once at the end.
//!
//! Everything the helper creates lives below a single root temporary
//! directory:
//!
//! ```text
//! <root>/
//!   plugins-current<suffix>/<plugin-name>   -> current plugin executable
//!   plugins-previous<suffix>/<plugin-name>  -> previous plugin executable (optional)
//!   work<suffix>/                           one per working directory
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::binding::{PluginVersion, VersionBinding};
use super::control::TestControl;
use super::error::{HelperError, HelperResult};
use super::working_dir::WorkingDir;
use crate::config::Config;

const ROOT_PREFIX: &str = "plugintest-";
const WORK_PREFIX: &str = "work";
// The plugin name only hints at the owner of the root; keep it well below NAME_MAX.
const ROOT_HINT_MAX_CHARS: usize = 64;

/// Owns the temporary tree used to run a plugin through the driver
#[derive(Debug)]
pub struct Helper {
    root: TempDir,
    plugin_name: String,
    driver_exec_path: PathBuf,
    current: VersionBinding,
    previous: Option<VersionBinding>,
}

impl Helper {
    /// Prepare a helper for `config`
    ///
    /// If this fails after the root directory was created, the root is
    /// removed again unless `config.keep_on_failure` is set; then it is left
    /// in place and its path is logged.
    pub fn init(config: &Config) -> HelperResult<Self> {
        config.validate_plugin_name().map_err(|e| HelperError::Configuration {
            message: e.to_string(),
        })?;
        let current_exec = config
            .current_plugin_exec()
            .ok_or_else(|| HelperError::Configuration {
                message: "current plugin executable is not set".to_string(),
            })?;

        let root = create_root(config)?;
        log::debug!(
            "Created helper root {} for {}",
            root.path().display(),
            config.plugin_name
        );

        let bindings = bind_versions(root.path(), config, current_exec);
        let (current, previous) = match bindings {
            Ok(bindings) => bindings,
            Err(err) => {
                if config.keep_on_failure {
                    let kept = root.keep();
                    log::warn!(
                        "Helper initialization failed; leaving {} behind for inspection",
                        kept.display()
                    );
                }
                return Err(err);
            }
        };

        log::info!(
            "Initialized test helper for {} ({})",
            config.plugin_name,
            if previous.is_some() {
                "previous version available"
            } else {
                "no previous version"
            }
        );

        Ok(Self {
            root,
            plugin_name: config.plugin_name.clone(),
            driver_exec_path: config.driver_exec_path.clone(),
            current,
            previous,
        })
    }

    /// Create a fresh working directory for a single test
    ///
    /// Safe to call from many threads at once; every call gets its own
    /// directory. The I/O error is returned as is.
    pub fn new_working_dir(&self) -> HelperResult<WorkingDir<'_>> {
        let dir = tempfile::Builder::new()
            .prefix(WORK_PREFIX)
            .tempdir_in(self.root.path())?;
        log::debug!("Created working directory {}", dir.path().display());
        Ok(WorkingDir::new(self, dir))
    }

    /// Like [`new_working_dir`](Self::new_working_dir), but fails the calling
    /// test through `t` instead of returning an error
    #[track_caller]
    pub fn require_new_working_dir<T: TestControl + ?Sized>(&self, t: &T) -> WorkingDir<'_> {
        t.helper();

        match self.new_working_dir() {
            Ok(wd) => wd,
            Err(err) => t.fatal(format_args!("failed to create new working directory: {}", err)),
        }
    }

    /// Whether a previous plugin build was bound at init
    pub fn has_previous_version(&self) -> bool {
        self.previous.is_some()
    }

    /// Driver executable tests should run
    pub fn terraform_exec_path(&self) -> &Path {
        &self.driver_exec_path
    }

    /// Plugin directory that makes the driver load the current build
    pub fn plugin_dir(&self) -> &Path {
        self.current.dir()
    }

    /// Plugin directory that makes the driver load the previous build
    ///
    /// # Panics
    /// Panics if no previous version is bound. Check
    /// [`has_previous_version`](Self::has_previous_version) first, or use
    /// [`try_previous_plugin_dir`](Self::try_previous_plugin_dir).
    #[track_caller]
    pub fn previous_plugin_dir(&self) -> &Path {
        match self.try_previous_plugin_dir() {
            Ok(dir) => dir,
            Err(err) => panic!("previous_plugin_dir: {}", err),
        }
    }

    /// Plugin directory for the previous build, or `NoPreviousVersion`
    pub fn try_previous_plugin_dir(&self) -> HelperResult<&Path> {
        self.previous
            .as_ref()
            .map(VersionBinding::dir)
            .ok_or(HelperError::NoPreviousVersion)
    }

    /// The binding for `version`, if one was created
    pub fn binding(&self, version: PluginVersion) -> Option<&VersionBinding> {
        match version {
            PluginVersion::Current => Some(&self.current),
            PluginVersion::Previous => self.previous.as_ref(),
        }
    }

    /// Name the plugin executable is exposed under
    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    /// Root of the temporary tree owned by this helper
    pub fn root_dir(&self) -> &Path {
        self.root.path()
    }

    /// Delete the whole temporary tree, including working directories that
    /// were never closed
    ///
    /// A root that is already gone counts as success.
    pub fn close(self) -> HelperResult<()> {
        let path = self.root.keep();

        match std::fs::remove_dir_all(&path) {
            Ok(()) => {
                log::info!("Removed helper directory {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Helper directory {} was already removed", path.display());
                Ok(())
            }
            Err(source) => Err(HelperError::Cleanup { path, source }),
        }
    }
}

fn create_root(config: &Config) -> HelperResult<TempDir> {
    let parent = config
        .temp_root
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let hint: String = config.plugin_name.chars().take(ROOT_HINT_MAX_CHARS).collect();
    let prefix = format!("{}{}", ROOT_PREFIX, hint);

    tempfile::Builder::new()
        .prefix(&prefix)
        .tempdir_in(&parent)
        .map_err(|source| HelperError::TempDir {
            purpose: "the test helper",
            parent,
            source,
        })
}

fn bind_versions(
    root: &Path,
    config: &Config,
    current_exec: &Path,
) -> HelperResult<(VersionBinding, Option<VersionBinding>)> {
    let current = VersionBinding::create(
        root,
        PluginVersion::Current,
        &config.plugin_name,
        current_exec,
    )?;

    let previous = match config.previous_plugin_exec() {
        Some(prev_exec) => Some(VersionBinding::create(
            root,
            PluginVersion::Previous,
            &config.plugin_name,
            prev_exec,
        )?),
        None => None,
    };

    Ok((current, previous))
}
