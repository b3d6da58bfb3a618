//! File adapter for `secrets.txt`.
//!
//! Reads the seven-line secrets file into a [`SecretRecord`] and writes a
//! record back, replacing the whole file.  The text layout itself is owned
//! by [`bit_config_core::format`]; this module only deals with the disk.
//!
//! # Missing and unreadable files
//!
//! A file that does not exist reads as zero lines, so every slot takes its
//! default.  Any other read failure (permissions, a directory in the way,
//! bytes that are not UTF-8) is an error, unless lenient reads are enabled,
//! in which case it is logged and the defaults are returned.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bit_config_core::{decode_secrets, encode_secrets, SecretRecord};
use tracing::{debug, info, warn};

use super::path_resolver::ConfigPathResolver;
use super::StorageError;
use crate::application::edit_secrets::SecretsStore;

/// Reads the secrets file at `path`, padding missing lines from `defaults`.
///
/// # Errors
///
/// Returns [`StorageError::Io`] for file-system errors other than "not found".
pub async fn read_secrets(
    path: &Path,
    defaults: &SecretRecord,
) -> Result<SecretRecord, StorageError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            debug!(path = %path.display(), lines = text.lines().count(), "read secrets file");
            Ok(decode_secrets(&text, defaults))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "secrets file not found; using defaults");
            Ok(defaults.clone())
        }
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replaces the secrets file at `path` with `record`.
///
/// Creates the parent directory if it does not exist.  The write is a plain
/// overwrite with no temporary file or rename.
///
/// # Errors
///
/// Returns [`StorageError::Format`] if a value contains a line break, or
/// [`StorageError::Io`] for file-system failures.
pub async fn write_secrets(path: &Path, record: &SecretRecord) -> Result<(), StorageError> {
    let content = encode_secrets(record)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "wrote secrets file");
    Ok(())
}

/// The secrets file, located through an injected [`ConfigPathResolver`].
pub struct SecretsFile {
    resolver: Arc<dyn ConfigPathResolver>,
    lenient_reads: bool,
}

impl SecretsFile {
    pub fn new(resolver: Arc<dyn ConfigPathResolver>) -> Self {
        Self {
            resolver,
            lenient_reads: false,
        }
    }

    /// When `true`, unreadable files fall back to the defaults instead of
    /// failing the load.
    pub fn with_lenient_reads(mut self, lenient_reads: bool) -> Self {
        self.lenient_reads = lenient_reads;
        self
    }

    /// Resolved path of the secrets file.
    pub fn path(&self) -> Result<std::path::PathBuf, StorageError> {
        self.resolver.resolve_config_path()
    }

    pub async fn read(&self, defaults: &SecretRecord) -> Result<SecretRecord, StorageError> {
        let path = self.path()?;
        match read_secrets(&path, defaults).await {
            Err(StorageError::Io { path, source }) if self.lenient_reads => {
                warn!(path = %path.display(), error = %source, "unreadable secrets file; using defaults");
                Ok(defaults.clone())
            }
            other => other,
        }
    }

    pub async fn write(&self, record: &SecretRecord) -> Result<(), StorageError> {
        let path = self.path()?;
        write_secrets(&path, record).await
    }
}

#[async_trait]
impl SecretsStore for SecretsFile {
    async fn load(&self, defaults: &SecretRecord) -> Result<SecretRecord, String> {
        self.read(defaults).await.map_err(|e| e.to_string())
    }

    async fn save(&self, record: &SecretRecord) -> Result<(), String> {
        self.write(record).await.map_err(|e| e.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
