//! FormState: the editable view of a [`SecretRecord`].
//!
//! The form holds the seven record values plus one extra input, the feed
//! letter selector.  The selector is a shortcut for the feed-key slot:
//!
//! ```text
//! save:  selector "c"         ──►  io_feed_key = "feed-c"
//! load:  io_feed_key "feed-c" ──►  selector    = "c"
//! load:  io_feed_key "myFeed" ──►  selector    = ""   (custom key, kept verbatim)
//! ```
//!
//! A form is built from a record on every load or reset, edited through its
//! setters, and turned back into a record on save.

use std::fmt;
use std::str::FromStr;

use bit_config_core::{FeedLetter, SecretField, SecretRecord};
use thiserror::Error;

/// Returned when a field name does not match any [`FormField`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field '{0}' (expected one of: request-rate, ssid, password, io-username, io-group, io-feed-key, feed-letter, io-key)")]
pub struct FormFieldError(pub String);

/// Every input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    RequestRate,
    Ssid,
    Password,
    IoUsername,
    IoGroup,
    IoFeedKey,
    FeedLetter,
    IoKey,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::RequestRate,
        FormField::Ssid,
        FormField::Password,
        FormField::IoUsername,
        FormField::IoGroup,
        FormField::IoFeedKey,
        FormField::FeedLetter,
        FormField::IoKey,
    ];

    /// Kebab-case name used on the command line and by the UI bridge.
    pub fn name(self) -> &'static str {
        match self {
            FormField::RequestRate => "request-rate",
            FormField::Ssid => "ssid",
            FormField::Password => "password",
            FormField::IoUsername => "io-username",
            FormField::IoGroup => "io-group",
            FormField::IoFeedKey => "io-feed-key",
            FormField::FeedLetter => "feed-letter",
            FormField::IoKey => "io-key",
        }
    }

    /// The record slot this input edits; `None` for the feed-letter selector.
    pub fn secret_field(self) -> Option<SecretField> {
        match self {
            FormField::RequestRate => Some(SecretField::RequestRateSec),
            FormField::Ssid => Some(SecretField::Ssid),
            FormField::Password => Some(SecretField::Password),
            FormField::IoUsername => Some(SecretField::IoUsername),
            FormField::IoGroup => Some(SecretField::IoGroup),
            FormField::IoFeedKey => Some(SecretField::IoFeedKey),
            FormField::FeedLetter => None,
            FormField::IoKey => Some(SecretField::IoKey),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = FormFieldError;

    /// Accepts the kebab names plus the snake-case keys of the form JSON,
    /// where the request rate is `request_rate_sec`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "request-rate-sec" {
            return Ok(FormField::RequestRate);
        }
        Self::ALL
            .into_iter()
            .find(|field| field.name() == normalized)
            .ok_or_else(|| FormFieldError(s.to_string()))
    }
}

/// Editable state of the configuration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    request_rate_sec: String,
    ssid: String,
    password: String,
    io_username: String,
    io_group: String,
    io_feed_key: String,
    feed_letter: String,
    io_key: String,
}

impl FormState {
    /// Builds the form for a freshly loaded record.
    ///
    /// The selector is set to the matching letter when the stored feed key
    /// is one of the canonical `feed-<letter>` forms, and left blank
    /// otherwise.  The advanced feed-key input always shows the stored text.
    pub fn from_record(record: &SecretRecord) -> Self {
        let mut form = Self::default();
        for field in FormField::ALL {
            if let Some(slot) = field.secret_field() {
                form.set(field, record.get(slot));
            }
        }
        if let Some(letter) = FeedLetter::from_feed_key(&record.io_feed_key) {
            form.feed_letter = letter.as_str().to_string();
        }
        form
    }

    /// Produces the record to write.
    ///
    /// A recognized feed letter overrides whatever is typed in the advanced
    /// feed-key input.
    pub fn to_record(&self) -> SecretRecord {
        let mut record = SecretRecord::default();
        for field in FormField::ALL {
            if let Some(slot) = field.secret_field() {
                record.set(slot, self.get(field));
            }
        }
        record.io_feed_key = self.effective_feed_key();
        record
    }

    /// The feed key that [`to_record`](Self::to_record) will store.
    pub fn effective_feed_key(&self) -> String {
        match self.selected_feed() {
            Some(letter) => letter.feed_key(),
            None => self.io_feed_key.clone(),
        }
    }

    /// The recognized selector letter, if any.
    pub fn selected_feed(&self) -> Option<FeedLetter> {
        FeedLetter::parse(&self.feed_letter)
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::RequestRate => &self.request_rate_sec,
            FormField::Ssid => &self.ssid,
            FormField::Password => &self.password,
            FormField::IoUsername => &self.io_username,
            FormField::IoGroup => &self.io_group,
            FormField::IoFeedKey => &self.io_feed_key,
            FormField::FeedLetter => &self.feed_letter,
            FormField::IoKey => &self.io_key,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::RequestRate => self.request_rate_sec = value,
            FormField::Ssid => self.ssid = value,
            FormField::Password => self.password = value,
            FormField::IoUsername => self.io_username = value,
            FormField::IoGroup => self.io_group = value,
            FormField::IoFeedKey => self.io_feed_key = value,
            FormField::FeedLetter => self.feed_letter = value,
            FormField::IoKey => self.io_key = value,
        }
    }

    pub fn request_rate_sec(&self) -> &str {
        &self.request_rate_sec
    }
    pub fn ssid(&self) -> &str {
        &self.ssid
    }
    pub fn password(&self) -> &str {
        &self.password
    }
    pub fn io_username(&self) -> &str {
        &self.io_username
    }
    pub fn io_group(&self) -> &str {
        &self.io_group
    }
    pub fn io_feed_key(&self) -> &str {
        &self.io_feed_key
    }
    pub fn feed_letter(&self) -> &str {
        &self.feed_letter
    }
    pub fn io_key(&self) -> &str {
        &self.io_key
    }

    pub fn set_request_rate_sec(&mut self, value: impl Into<String>) {
        self.request_rate_sec = value.into();
    }
    pub fn set_ssid(&mut self, value: impl Into<String>) {
        self.ssid = value.into();
    }
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }
    pub fn set_io_username(&mut self, value: impl Into<String>) {
        self.io_username = value.into();
    }
    pub fn set_io_group(&mut self, value: impl Into<String>) {
        self.io_group = value.into();
    }
    pub fn set_io_feed_key(&mut self, value: impl Into<String>) {
        self.io_feed_key = value.into();
    }
    pub fn set_feed_letter(&mut self, value: impl Into<String>) {
        self.feed_letter = value.into();
    }
    pub fn set_io_key(&mut self, value: impl Into<String>) {
        self.io_key = value.into();
    }
}
