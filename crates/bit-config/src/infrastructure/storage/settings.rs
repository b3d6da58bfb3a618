//! TOML settings for the editor itself.
//!
//! These are not the device secrets; they control how the editor finds and
//! fills the secrets file.  Stored in the platform config directory:
//! - Windows:  `%APPDATA%\BitConfig\settings.toml`
//! - Linux:    `~/.config/bit-config/settings.toml`
//! - macOS:    `~/Library/Application Support/BitConfig/settings.toml`
//!
//! ```toml
//! [secrets]
//! file_name = "secrets.txt"
//!
//! [storage]
//! lenient_reads = false
//!
//! [logging]
//! log_level = "info"
//!
//! [defaults]
//! ssid = "G34"
//! ```
//!
//! Every key is optional.  Fields annotated with `#[serde(default = ...)]`
//! take the factory value when absent, so a missing file and an empty file
//! both give [`EditorSettings::default()`].

use std::path::{Path, PathBuf};

use bit_config_core::SecretRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::path_resolver::DEFAULT_SECRETS_FILE_NAME;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level editor settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditorSettings {
    #[serde(default)]
    pub secrets: SecretsSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub defaults: DefaultValues,
}

/// Where the secrets file lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecretsSettings {
    /// File name inside the resource directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Explicit directory; bypasses resource-directory resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// How read failures are treated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Treat unreadable secrets files like missing ones.
    #[serde(default)]
    pub lenient_reads: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Values written on reset and used to pad short secrets files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultValues {
    #[serde(default = "default_request_rate_sec")]
    pub request_rate_sec: String,
    #[serde(default = "default_ssid")]
    pub ssid: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_io_username")]
    pub io_username: String,
    #[serde(default = "default_io_group")]
    pub io_group: String,
    #[serde(default = "default_io_feed_key")]
    pub io_feed_key: String,
    #[serde(default = "default_io_key")]
    pub io_key: String,
}

impl DefaultValues {
    pub fn to_record(&self) -> SecretRecord {
        SecretRecord {
            request_rate_sec: self.request_rate_sec.clone(),
            ssid: self.ssid.clone(),
            password: self.password.clone(),
            io_username: self.io_username.clone(),
            io_group: self.io_group.clone(),
            io_feed_key: self.io_feed_key.clone(),
            io_key: self.io_key.clone(),
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_file_name() -> String {
    DEFAULT_SECRETS_FILE_NAME.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_request_rate_sec() -> String {
    SecretRecord::default().request_rate_sec
}
fn default_ssid() -> String {
    SecretRecord::default().ssid
}
fn default_password() -> String {
    SecretRecord::default().password
}
fn default_io_username() -> String {
    SecretRecord::default().io_username
}
fn default_io_group() -> String {
    SecretRecord::default().io_group
}
fn default_io_feed_key() -> String {
    SecretRecord::default().io_feed_key
}
fn default_io_key() -> String {
    SecretRecord::default().io_key
}

impl Default for SecretsSettings {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            directory: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DefaultValues {
    fn default() -> Self {
        let record = SecretRecord::default();
        Self {
            request_rate_sec: record.request_rate_sec,
            ssid: record.ssid,
            password: record.password,
            io_username: record.io_username,
            io_group: record.io_group,
            io_feed_key: record.io_feed_key,
            io_key: record.io_key,
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    platform_config_dir()
        .map(|dir| dir.join("settings.toml"))
        .ok_or(SettingsError::NoPlatformConfigDir)
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<EditorSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EditorSettings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads settings from the platform config directory.
pub fn load_settings() -> Result<EditorSettings, SettingsError> {
    load_settings_from(&settings_file_path()?)
}

/// Resolves the platform config base directory for the editor.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("BitConfig"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("bit-config"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("BitConfig")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_use_factory_record() {
        let settings = EditorSettings::default();
        assert_eq!(settings.defaults.to_record(), SecretRecord::default());
        assert_eq!(settings.secrets.file_name, "secrets.txt");
        assert_eq!(settings.secrets.directory, None);
        assert!(!settings.storage.lenient_reads);
        assert_eq!(settings.logging.log_level, "info");
    }

    #[test]
    fn test_empty_toml_equals_defaults() {
        let settings: EditorSettings = toml::from_str("").expect("deserialize empty");
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn test_partial_defaults_override_only_named_values() {
        // Arrange
        let toml_str = r#"
[defaults]
ssid = "Workshop"
io_feed_key = "feed-a"
"#;

        // Act
        let settings: EditorSettings = toml::from_str(toml_str).expect("deserialize partial");
        let record = settings.defaults.to_record();

        // Assert
        assert_eq!(record.ssid, "Workshop");
        assert_eq!(record.io_feed_key, "feed-a");
        // Unspecified fields keep their defaults
        assert_eq!(record.password, "designthinking");
        assert_eq!(record.request_rate_sec, "2");
    }

    #[test]
    fn test_storage_and_secrets_sections_parse() {
        let toml_str = r#"
[secrets]
file_name = "bit.txt"
directory = "/media/CIRCUITPY"

[storage]
lenient_reads = true

[logging]
log_level = "debug"
"#;
        let settings: EditorSettings = toml::from_str(toml_str).expect("deserialize");
        assert_eq!(settings.secrets.file_name, "bit.txt");
        assert_eq!(
            settings.secrets.directory,
            Some(PathBuf::from("/media/CIRCUITPY"))
        );
        assert!(settings.storage.lenient_reads);
        assert_eq!(settings.logging.log_level, "debug");
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let mut settings = EditorSettings::default();
        settings.defaults.io_key = "aio_test".to_string();
        settings.storage.lenient_reads = true;

        let toml_str = toml::to_string_pretty(&settings).expect("serialize");
        let restored: EditorSettings = toml::from_str(&toml_str).expect("deserialize");

        assert_eq!(settings, restored);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        assert!(matches!(
            load_settings_from(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_settings_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn test_settings_file_path_ends_with_settings_toml() {
        if let Ok(path) = settings_file_path() {
            assert!(
                path.ends_with("settings.toml"),
                "settings file must be named settings.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir in a stripped environment is also acceptable.
    }
}
