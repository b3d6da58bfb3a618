//! Locating the secrets file.
//!
//! The desktop build ships `secrets.txt` as an application resource, so the
//! file lives next to the program rather than in a per-user directory:
//! - Windows:  `<install dir>\secrets.txt`
//! - Linux:    `<directory of the executable>/secrets.txt`
//! - macOS:    `<Bundle>.app/Contents/Resources/secrets.txt`
//!
//! On macOS the executable sits in `Contents/MacOS`, so the resource
//! directory is found by walking up to the bundle's `Contents` directory.
//!
//! The file adapter only sees the [`ConfigPathResolver`] trait; everything
//! platform-specific stays in this module.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::StorageError;

/// Environment variable that overrides the resource directory.
pub const RESOURCE_DIR_ENV: &str = "BIT_CONFIG_RESOURCE_DIR";

/// File name of the secrets file inside the resource directory.
pub const DEFAULT_SECRETS_FILE_NAME: &str = "secrets.txt";

/// Resolves the absolute path of the secrets file.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigPathResolver: Send + Sync {
    fn resolve_config_path(&self) -> Result<PathBuf, StorageError>;
}

/// A path that is already known (command-line override, tests).
#[derive(Debug, Clone)]
pub struct FixedPathResolver {
    path: PathBuf,
}

impl FixedPathResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPathResolver for FixedPathResolver {
    fn resolve_config_path(&self) -> Result<PathBuf, StorageError> {
        Ok(self.path.clone())
    }
}

/// `<application resource directory>/<file_name>`.
#[derive(Debug, Clone)]
pub struct ResourceDirResolver {
    file_name: String,
}

impl ResourceDirResolver {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Determines the resource directory, honouring [`RESOURCE_DIR_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoResourceDir`] when the executable path is
    /// unavailable and no override is set.
    pub fn resource_dir(&self) -> Result<PathBuf, StorageError> {
        if let Some(dir) = std::env::var_os(RESOURCE_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let exe = std::env::current_exe().map_err(|_| StorageError::NoResourceDir)?;
        platform_resource_dir(&exe).ok_or(StorageError::NoResourceDir)
    }
}

impl Default for ResourceDirResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_FILE_NAME)
    }
}

impl ConfigPathResolver for ResourceDirResolver {
    fn resolve_config_path(&self) -> Result<PathBuf, StorageError> {
        let path = self.resource_dir()?.join(&self.file_name);
        debug!(path = %path.display(), "resolved secrets path");
        Ok(path)
    }
}

/// Finds the `Resources` directory of the `.app` bundle containing `exe`.
///
/// Returns `None` when `exe` is not inside `<name>.app/Contents/...`.
pub fn bundle_resources_dir(exe: &Path) -> Option<PathBuf> {
    exe.ancestors()
        .find(|dir| {
            dir.file_name() == Some(OsStr::new("Contents"))
                && dir.parent().and_then(Path::extension) == Some(OsStr::new("app"))
        })
        .map(|contents| contents.join("Resources"))
}

/// Resource directory for the running platform.
fn platform_resource_dir(exe: &Path) -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        // Unbundled builds (cargo run) fall back to the executable directory.
        bundle_resources_dir(exe).or_else(|| exe.parent().map(Path::to_path_buf))
    }

    #[cfg(not(target_os = "macos"))]
    {
        exe.parent().map(Path::to_path_buf)
    }
}
