//! Storage infrastructure: the secrets file and the editor settings.
//!
//! - `path_resolver` finds where the secrets file lives on this platform.
//! - `secrets_file` reads and writes the seven-line file the bit consumes.
//! - `settings` loads the editor's own TOML settings (defaults, file name,
//!   log level, read leniency).

pub mod path_resolver;
pub mod secrets_file;
pub mod settings;

use std::path::PathBuf;

use bit_config_core::FormatError;
use thiserror::Error;

/// Error type for secrets-file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No application resource directory could be determined.
    #[error("could not determine application resource directory")]
    NoResourceDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing secrets at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record cannot be written in the line-per-field format.
    #[error("cannot encode secrets: {0}")]
    Format(#[from] FormatError),
}
