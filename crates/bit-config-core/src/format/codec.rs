//! Text codec for the secrets file.
//!
//! File format:
//! ```text
//! <request_rate_sec>\n
//! <ssid>\n
//! <password>\n
//! <io_username>\n
//! <io_group>\n
//! <io_feed_key>\n
//! <io_key>\n
//! ```
//! UTF-8, one value per line, no header, no escaping, no comments.  Every
//! line is terminated, so an empty last value still occupies a line.

use thiserror::Error;

use crate::domain::record::{SecretField, SecretRecord, FIELD_COUNT};

/// Errors that can occur while encoding a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A value contains `\n` or `\r`, which would shift every later slot.
    #[error("field {field:?} (line {}) contains a line break", .field.index() + 1)]
    EmbeddedLineBreak { field: SecretField },
}

/// Decodes secrets-file text into a record.
///
/// Line `i` fills slot `i`; slots with no line take the value from
/// `defaults`.  Lines past the seventh are ignored.  `\r\n` endings are
/// accepted.  An empty line is a present, empty value.
///
/// # Examples
///
/// ```rust
/// use bit_config_core::{decode_secrets, SecretRecord};
///
/// let defaults = SecretRecord::default();
/// let record = decode_secrets("5\nHomeNet\n", &defaults);
/// assert_eq!(record.request_rate_sec, "5");
/// assert_eq!(record.ssid, "HomeNet");
/// assert_eq!(record.password, defaults.password);
/// ```
pub fn decode_secrets(text: &str, defaults: &SecretRecord) -> SecretRecord {
    SecretRecord::from_lines(text.lines(), defaults)
}

/// Encodes a record as secrets-file text.
///
/// # Errors
///
/// Returns [`FormatError::EmbeddedLineBreak`] naming the first value that
/// contains a line break.
pub fn encode_secrets(record: &SecretRecord) -> Result<String, FormatError> {
    let mut out = String::with_capacity(FIELD_COUNT * 16);
    for (field, value) in record.iter() {
        if value.contains(['\n', '\r']) {
            return Err(FormatError::EmbeddedLineBreak { field });
        }
        out.push_str(value);
        out.push('\n');
    }
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
