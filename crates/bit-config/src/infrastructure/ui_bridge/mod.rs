//! Command bridge: exposes the editor's actions to the front-end.
//!
//! Every command here delegates to the shared [`AppState`].  The desktop UI
//! calls them through Tauri (`invoke("load_secrets")`); the `bit-config`
//! binary calls the same functions directly.  The Application layer must NOT
//! import this module.
//!
//! # Data Transfer Objects (DTOs)
//!
//! [`SecretsFormDto`] is the JSON shape of the form.  It mirrors the inputs
//! on screen, including the feed-letter selector which has no slot of its
//! own in the secrets file.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>` so each
//! response has the same shape: `{ success: bool, data: T | null, error:
//! string | null }`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::{
    edit_secrets::{EditSecretsUseCase, SecretsStore},
    form_state::{FormField, FormState},
};
use crate::infrastructure::storage::{
    path_resolver::{ConfigPathResolver, FixedPathResolver, ResourceDirResolver},
    secrets_file::SecretsFile,
    settings::EditorSettings,
};

// ── Shared application state ──────────────────────────────────────────────────

/// State shared between commands.
///
/// `form` is the in-memory copy the user is editing.  It is replaced on every
/// load, save, and reset; the file on disk only changes on save and reset.
pub struct AppState {
    pub form: Mutex<FormState>,
    pub editor: EditSecretsUseCase,
    resolver: Arc<dyn ConfigPathResolver>,
}

impl AppState {
    /// Wires the file-backed store from `settings`.
    ///
    /// `file_override` takes precedence over `secrets.directory`, which takes
    /// precedence over the application resource directory.
    pub fn from_settings(settings: &EditorSettings, file_override: Option<PathBuf>) -> Arc<Self> {
        let resolver: Arc<dyn ConfigPathResolver> = match (file_override, &settings.secrets.directory)
        {
            (Some(path), _) => Arc::new(FixedPathResolver::new(path)),
            (None, Some(dir)) => Arc::new(FixedPathResolver::new(
                dir.join(&settings.secrets.file_name),
            )),
            (None, None) => Arc::new(ResourceDirResolver::new(
                settings.secrets.file_name.clone(),
            )),
        };
        let store = SecretsFile::new(Arc::clone(&resolver))
            .with_lenient_reads(settings.storage.lenient_reads);
        Self::new(Arc::new(store), settings.defaults.to_record(), resolver)
    }

    pub fn new(
        store: Arc<dyn SecretsStore>,
        defaults: bit_config_core::SecretRecord,
        resolver: Arc<dyn ConfigPathResolver>,
    ) -> Arc<Self> {
        Arc::new(Self {
            form: Mutex::new(FormState::default()),
            editor: EditSecretsUseCase::new(store, defaults),
            resolver,
        })
    }
}

// ── Data Transfer Objects (Presentation layer) ────────────────────────────────

/// JSON shape of the configuration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretsFormDto {
    pub request_rate_sec: String,
    pub ssid: String,
    pub password: String,
    pub io_username: String,
    pub io_group: String,
    pub io_feed_key: String,
    /// Preset feed selector, `"a"`..`"f"`, or blank for a custom key.
    pub feed_letter: String,
    pub io_key: String,
}

impl From<&FormState> for SecretsFormDto {
    fn from(form: &FormState) -> Self {
        Self {
            request_rate_sec: form.request_rate_sec().to_string(),
            ssid: form.ssid().to_string(),
            password: form.password().to_string(),
            io_username: form.io_username().to_string(),
            io_group: form.io_group().to_string(),
            io_feed_key: form.io_feed_key().to_string(),
            feed_letter: form.feed_letter().to_string(),
            io_key: form.io_key().to_string(),
        }
    }
}

impl From<SecretsFormDto> for FormState {
    fn from(dto: SecretsFormDto) -> Self {
        let mut form = FormState::default();
        form.set_request_rate_sec(dto.request_rate_sec);
        form.set_ssid(dto.ssid);
        form.set_password(dto.password);
        form.set_io_username(dto.io_username);
        form.set_io_group(dto.io_group);
        form.set_io_feed_key(dto.io_feed_key);
        form.set_feed_letter(dto.feed_letter);
        form.set_io_key(dto.io_key);
        form
    }
}

/// One input on the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldDto {
    /// Kebab-case name accepted by `update_field`.
    pub name: String,
    pub label: String,
    pub description: String,
}

/// A collapsible group of inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSectionDto {
    pub title: String,
    /// Sections start collapsed.
    pub hidden: bool,
    pub fields: Vec<FormFieldDto>,
}

/// Unified response wrapper used by commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Form layout ───────────────────────────────────────────────────────────────

fn field(name: FormField, label: &str, description: &str) -> FormFieldDto {
    FormFieldDto {
        name: name.name().to_string(),
        label: label.to_string(),
        description: description.to_string(),
    }
}

/// Sections of the form in display order.
pub fn form_layout() -> Vec<FormSectionDto> {
    vec![
        FormSectionDto {
            title: "Adafruit IO".to_string(),
            hidden: true,
            fields: vec![
                field(
                    FormField::FeedLetter,
                    "AoM Cloud Feed",
                    "The feed the bit will GET data from or POST data to - feed X",
                ),
                field(
                    FormField::RequestRate,
                    "Request Rate (seconds)",
                    "Determines how often the IoT bit will try to download data, e.g. the bit \
                     will request feed data every 2 seconds with a value of 2",
                ),
            ],
        },
        FormSectionDto {
            title: "Advanced Adafruit IO".to_string(),
            hidden: true,
            fields: vec![
                field(
                    FormField::IoUsername,
                    "Adafruit IO Username",
                    "The Adafruit IO username of the AoM Cloud - aom_cloud",
                ),
                field(
                    FormField::IoGroup,
                    "Adafruit IO Group",
                    "Name of the group with the feed the bit should access - cloud",
                ),
                field(
                    FormField::IoFeedKey,
                    "Adafruit IO Feed Key",
                    "Key for the feed the bit will GET data from or POST data to - feed X",
                ),
                field(
                    FormField::IoKey,
                    "Adafruit IO Key",
                    "Key used to connect to Adafruit IO services, usually is 32 characters and \
                     begins with 'aio_'",
                ),
            ],
        },
        FormSectionDto {
            title: "Wifi".to_string(),
            hidden: true,
            fields: vec![
                field(
                    FormField::Ssid,
                    "Wifi SSID",
                    "(Case-sensitive!) Name of the Wifi network the bit will connect to. The \
                     SSID of G34 WiFi is G34. If you are using a phone as a mobile hotspot, it \
                     will be the name of your phone.",
                ),
                field(
                    FormField::Password,
                    "Wifi Password",
                    "(Case-sensitive!) Password of the Wifi network the bit will connect to. \
                     The Password of G34 WiFi is designthinking. Keep the SSID and password a \
                     secret!",
                ),
            ],
        },
    ]
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the form as currently edited (not re-read from disk).
pub async fn get_form(state: Arc<AppState>) -> CommandResult<SecretsFormDto> {
    let form = state.form.lock().await;
    CommandResult::ok(SecretsFormDto::from(&*form))
}

/// "Load Existing Data": replaces the form with the file contents.
pub async fn load_secrets(state: Arc<AppState>) -> CommandResult<SecretsFormDto> {
    let mut form = state.form.lock().await;
    match state.editor.load().await {
        Ok(loaded) => {
            *form = loaded;
            CommandResult::ok(SecretsFormDto::from(&*form))
        }
        Err(e) => {
            warn!("load failed: {e}");
            CommandResult::err(format!("failed to load secrets: {e}"))
        }
    }
}

/// "Save": writes `dto` to the file and makes the committed form current.
pub async fn save_secrets(
    state: Arc<AppState>,
    dto: SecretsFormDto,
) -> CommandResult<SecretsFormDto> {
    let mut form = state.form.lock().await;
    match state.editor.save(&FormState::from(dto)).await {
        Ok(committed) => {
            *form = committed;
            CommandResult::ok(SecretsFormDto::from(&*form))
        }
        Err(e) => {
            warn!("save failed: {e}");
            CommandResult::err(format!("failed to save secrets: {e}"))
        }
    }
}

/// "Reset": overwrites the file with the defaults and reloads it.
pub async fn reset_secrets(state: Arc<AppState>) -> CommandResult<SecretsFormDto> {
    let mut form = state.form.lock().await;
    match state.editor.reset().await {
        Ok(reloaded) => {
            *form = reloaded;
            CommandResult::ok(SecretsFormDto::from(&*form))
        }
        Err(e) => {
            warn!("reset failed: {e}");
            CommandResult::err(format!("failed to reset secrets: {e}"))
        }
    }
}

/// Edits one input of the in-memory form.  Nothing is written until save.
pub async fn update_field(
    state: Arc<AppState>,
    name: String,
    value: String,
) -> CommandResult<SecretsFormDto> {
    let field: FormField = match name.parse() {
        Ok(field) => field,
        Err(e) => return CommandResult::err(format!("{e}")),
    };
    let mut form = state.form.lock().await;
    form.set(field, value);
    CommandResult::ok(SecretsFormDto::from(&*form))
}

/// Returns the grouped sections with their labels and help text.
pub async fn get_form_layout() -> CommandResult<Vec<FormSectionDto>> {
    CommandResult::ok(form_layout())
}

/// Returns the resolved path of the secrets file.
pub async fn get_secrets_path(state: Arc<AppState>) -> CommandResult<String> {
    match state.resolver.resolve_config_path() {
        Ok(path) => {
            info!(path = %path.display(), "secrets path requested");
            CommandResult::ok(path.display().to_string())
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
