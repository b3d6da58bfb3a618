//! AoM IoT Bit Config entry point.
//!
//! The desktop window registers the commands in `infrastructure::ui_bridge`
//! with Tauri.  This binary drives the same commands from the command line,
//! which is also how the secrets file is prepared on a machine without a
//! display.
//!
//! # Usage
//!
//! ```text
//! bit-config [--file <PATH>] [--settings <PATH>] <COMMAND>
//!
//! Commands:
//!   show [--json]           Load the secrets file and print the form
//!   set <FIELD=VALUE>...    Load, apply edits, save, print the result
//!   reset                   Write the defaults and reload
//!   path                    Print the resolved secrets-file path
//!   layout                  Print the form sections and help text
//! ```
//!
//! | Variable              | Description                                  |
//! |-----------------------|----------------------------------------------|
//! | `BIT_CONFIG_FILE`     | Secrets file path (same as `--file`)         |
//! | `BIT_CONFIG_SETTINGS` | Editor settings file (same as `--settings`)  |
//! | `BIT_CONFIG_RESOURCE_DIR` | Overrides the application resource dir   |
//! | `RUST_LOG`            | Log filter; wins over `logging.log_level`    |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bit_config::application::form_state::FormField;
use bit_config::infrastructure::storage::settings::{
    load_settings, load_settings_from, EditorSettings, SettingsError,
};
use bit_config::infrastructure::ui_bridge::{self, AppState, CommandResult, SecretsFormDto};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Edit the Wi-Fi, Adafruit IO, and feed settings of an AoM IoT bit.
#[derive(Debug, Parser)]
#[command(name = "bit-config", version)]
struct Cli {
    /// Secrets file to edit, instead of the one in the resource directory.
    #[arg(long, global = true, env = "BIT_CONFIG_FILE")]
    file: Option<PathBuf>,

    /// Editor settings file (TOML).  Defaults to the platform config dir.
    #[arg(long, global = true, env = "BIT_CONFIG_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the secrets file and print the form.
    Show {
        /// Print JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },
    /// Load, apply FIELD=VALUE edits, and save.
    ///
    /// A preset feed letter wins over `io-feed-key`.  To store a custom feed
    /// key when the file holds `feed-<letter>`, clear the selector in the
    /// same call: `set feed-letter= io-feed-key=myFeed`.
    Set {
        /// Edits such as `ssid=HomeNet` or `feed-letter=c`.
        #[arg(required = true, value_parser = parse_edit)]
        edits: Vec<(FormField, String)>,
    },
    /// Overwrite the secrets file with the defaults and reload it.
    Reset,
    /// Print the resolved secrets-file path.
    Path,
    /// Print the form sections with labels and help text.
    Layout,
}

/// Parses `name=value`; the value may be empty or contain `=`.
fn parse_edit(arg: &str) -> Result<(FormField, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{arg}'"))?;
    let field = name.parse::<FormField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, settings_warning) = match &cli.settings {
        Some(path) => (
            load_settings_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None,
        ),
        None => platform_settings(load_settings())?,
    };

    // Logs go to stderr so `show --json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&settings.logging.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = settings_warning {
        warn!("{e}; using built-in settings");
    }
    debug!(
        file_name = %settings.secrets.file_name,
        lenient_reads = settings.storage.lenient_reads,
        "settings loaded"
    );

    let state = AppState::from_settings(&settings, cli.file);

    match cli.command {
        Command::Show { json } => {
            let form = into_data(ui_bridge::load_secrets(Arc::clone(&state)).await)?;
            print_form(&form, json)?;
        }
        Command::Set { edits } => {
            into_data(ui_bridge::load_secrets(Arc::clone(&state)).await)?;
            for (field, value) in edits {
                into_data(
                    ui_bridge::update_field(Arc::clone(&state), field.name().to_string(), value)
                        .await,
                )?;
            }
            let form = into_data(ui_bridge::get_form(Arc::clone(&state)).await)?;
            let committed = into_data(ui_bridge::save_secrets(Arc::clone(&state), form).await)?;
            info!("saved");
            print_form(&committed, false)?;
        }
        Command::Reset => {
            let form = into_data(ui_bridge::reset_secrets(Arc::clone(&state)).await)?;
            print_form(&form, false)?;
        }
        Command::Path => {
            let path = into_data(ui_bridge::get_secrets_path(Arc::clone(&state)).await)?;
            println!("{path}");
        }
        Command::Layout => {
            for section in into_data(ui_bridge::get_form_layout().await)? {
                println!("[{}]", section.title);
                for field in section.fields {
                    println!("  {:<12} {}", field.name, field.label);
                    println!("  {:<12} {}", "", field.description);
                }
            }
        }
    }

    Ok(())
}

/// Accepts a missing platform config dir; a settings file that exists but
/// cannot be read or parsed is an error.
fn platform_settings(
    loaded: Result<EditorSettings, SettingsError>,
) -> anyhow::Result<(EditorSettings, Option<SettingsError>)> {
    match loaded {
        Ok(settings) => Ok((settings, None)),
        Err(e @ SettingsError::NoPlatformConfigDir) => Ok((EditorSettings::default(), Some(e))),
        Err(e) => Err(e).context("loading platform settings"),
    }
}

/// Unwraps a successful command result, or turns its error into an exit.
fn into_data<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<T> {
    match (result.success, result.data) {
        (true, Some(data)) => Ok(data),
        _ => bail!(result
            .error
            .unwrap_or_else(|| "command returned no data".to_string())),
    }
}

fn print_form(form: &SecretsFormDto, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(form)?);
        return Ok(());
    }
    let rows = [
        (FormField::RequestRate, &form.request_rate_sec),
        (FormField::Ssid, &form.ssid),
        (FormField::Password, &form.password),
        (FormField::IoUsername, &form.io_username),
        (FormField::IoGroup, &form.io_group),
        (FormField::IoFeedKey, &form.io_feed_key),
        (FormField::FeedLetter, &form.feed_letter),
        (FormField::IoKey, &form.io_key),
    ];
    for (field, value) in rows {
        println!("{:<12} {}", field.name(), value);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn set_edits(args: &[&str]) -> Vec<(FormField, String)> {
        let mut argv = vec!["bit-config", "set"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Set { edits } => edits,
            other => panic!("expected set, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_edit_splits_name_and_value() {
        assert_eq!(
            parse_edit("ssid=HomeNet"),
            Ok((FormField::Ssid, "HomeNet".to_string()))
        );
    }

    #[test]
    fn test_parse_edit_accepts_empty_value() {
        assert_eq!(
            parse_edit("feed-letter="),
            Ok((FormField::FeedLetter, String::new()))
        );
    }

    #[test]
    fn test_parse_edit_keeps_equals_signs_in_value() {
        assert_eq!(
            parse_edit("password=a=b=c"),
            Ok((FormField::Password, "a=b=c".to_string()))
        );
    }

    #[test]
    fn test_parse_edit_rejects_missing_equals() {
        let err = parse_edit("ssid").unwrap_err();
        assert!(err.contains("expected FIELD=VALUE"), "got: {err}");
    }

    #[test]
    fn test_parse_edit_rejects_unknown_field() {
        let err = parse_edit("colour=red").unwrap_err();
        assert!(err.contains("colour"), "got: {err}");
    }

    #[test]
    fn test_cli_set_collects_edits_in_order() {
        // Arrange / Act
        let edits = set_edits(&["feed-letter=", "io-feed-key=myFeed"]);

        // Assert
        assert_eq!(
            edits,
            vec![
                (FormField::FeedLetter, String::new()),
                (FormField::IoFeedKey, "myFeed".to_string()),
            ]
        );
    }

    #[test]
    fn test_cli_set_requires_at_least_one_edit() {
        assert!(Cli::try_parse_from(["bit-config", "set"]).is_err());
    }

    #[test]
    fn test_cli_set_rejects_bad_edit() {
        assert!(Cli::try_parse_from(["bit-config", "set", "colour=red"]).is_err());
    }

    #[test]
    fn test_cli_show_json_flag() {
        let cli = Cli::try_parse_from(["bit-config", "show", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Show { json: true }));
    }

    #[test]
    fn test_cli_global_file_after_subcommand() {
        let cli = Cli::try_parse_from(["bit-config", "path", "--file", "/tmp/s.txt"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/s.txt")));
        assert!(matches!(cli.command, Command::Path));
    }

    #[test]
    fn test_into_data_returns_data_on_success() {
        assert_eq!(into_data(CommandResult::ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_into_data_turns_failure_into_error() {
        let err = into_data(CommandResult::<i32>::err("disk full")).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_platform_settings_falls_back_without_config_dir() {
        let (settings, warning) =
            platform_settings(Err(SettingsError::NoPlatformConfigDir)).unwrap();
        assert_eq!(settings, EditorSettings::default());
        assert!(matches!(warning, Some(SettingsError::NoPlatformConfigDir)));
    }

    #[test]
    fn test_platform_settings_propagates_parse_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[defaults\nssid = ").unwrap();

        // Act
        let result = platform_settings(load_settings_from(&path));

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SettingsError>(),
            Some(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_platform_settings_passes_loaded_values_through() {
        let mut custom = EditorSettings::default();
        custom.defaults.ssid = "Workshop".to_string();

        let (settings, warning) = platform_settings(Ok(custom.clone())).unwrap();

        assert_eq!(settings, custom);
        assert!(warning.is_none());
    }
}
