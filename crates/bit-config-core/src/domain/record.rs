//! The seven-slot configuration record written to the IoT bit.
//!
//! Slot order is load-bearing: the record's position `i` is line `i + 1` of
//! the secrets file, and the file carries no field names.  [`SecretField`]
//! gives every slot a name so callers never need to remember the numbers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slots in a [`SecretRecord`] (and lines in the secrets file).
pub const FIELD_COUNT: usize = 7;

/// Errors raised by positional access to a [`SecretRecord`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A default list did not contain exactly [`FIELD_COUNT`] values.
    #[error("expected 7 values, got {0}")]
    WrongArity(usize),

    /// A slot index past the end of the record.
    #[error("field index {0} out of range (record has 7 fields)")]
    IndexOutOfRange(usize),
}

/// Names of the record slots, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretField {
    /// How often the bit polls its feed, in seconds.
    RequestRateSec,
    /// Wi-Fi network name.
    Ssid,
    /// Wi-Fi password.
    Password,
    /// Adafruit IO username.
    IoUsername,
    /// Adafruit IO group containing the feed.
    IoGroup,
    /// Adafruit IO feed key; either `feed-<letter>` or a literal key.
    IoFeedKey,
    /// Adafruit IO API key.
    IoKey,
}

impl SecretField {
    /// Every field in file order.
    pub const ALL: [SecretField; FIELD_COUNT] = [
        SecretField::RequestRateSec,
        SecretField::Ssid,
        SecretField::Password,
        SecretField::IoUsername,
        SecretField::IoGroup,
        SecretField::IoFeedKey,
        SecretField::IoKey,
    ];

    /// Zero-based slot (and line) index of this field.
    pub fn index(self) -> usize {
        match self {
            SecretField::RequestRateSec => 0,
            SecretField::Ssid => 1,
            SecretField::Password => 2,
            SecretField::IoUsername => 3,
            SecretField::IoGroup => 4,
            SecretField::IoFeedKey => 5,
            SecretField::IoKey => 6,
        }
    }

    /// Field stored at slot `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Seven ordered text values for the IoT bit.
///
/// Values are opaque text: the rate is not parsed as a number, keys are not
/// checked, and empty strings are accepted everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    pub request_rate_sec: String,
    pub ssid: String,
    pub password: String,
    pub io_username: String,
    pub io_group: String,
    pub io_feed_key: String,
    pub io_key: String,
}

impl SecretRecord {
    /// Builds a record whose slots are `defaults`, in file order.
    pub fn from_defaults(defaults: [String; FIELD_COUNT]) -> Self {
        let [request_rate_sec, ssid, password, io_username, io_group, io_feed_key, io_key] =
            defaults;
        Self {
            request_rate_sec,
            ssid,
            password,
            io_username,
            io_group,
            io_feed_key,
            io_key,
        }
    }

    /// Builds a record from `lines`, taking slot `i` from `defaults` when
    /// fewer than `i + 1` lines are available.  Extra lines are ignored.
    pub fn from_lines<I, S>(lines: I, defaults: &SecretRecord) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = defaults.clone();
        for (field, line) in SecretField::ALL.iter().zip(lines) {
            record.set(*field, line);
        }
        record
    }

    /// Arity of the record, for generic iteration.
    pub const fn fields_length() -> usize {
        FIELD_COUNT
    }

    /// Returns the value of `field`.
    pub fn get(&self, field: SecretField) -> &str {
        match field {
            SecretField::RequestRateSec => &self.request_rate_sec,
            SecretField::Ssid => &self.ssid,
            SecretField::Password => &self.password,
            SecretField::IoUsername => &self.io_username,
            SecretField::IoGroup => &self.io_group,
            SecretField::IoFeedKey => &self.io_feed_key,
            SecretField::IoKey => &self.io_key,
        }
    }

    /// Overwrites the value of `field`.
    pub fn set(&mut self, field: SecretField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SecretField::RequestRateSec => self.request_rate_sec = value,
            SecretField::Ssid => self.ssid = value,
            SecretField::Password => self.password = value,
            SecretField::IoUsername => self.io_username = value,
            SecretField::IoGroup => self.io_group = value,
            SecretField::IoFeedKey => self.io_feed_key = value,
            SecretField::IoKey => self.io_key = value,
        }
    }

    /// Returns the value at slot `index`, or `None` past the last slot.
    pub fn get_field(&self, index: usize) -> Option<&str> {
        SecretField::from_index(index).map(|field| self.get(field))
    }

    /// Overwrites the value at slot `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::IndexOutOfRange`] when `index >= FIELD_COUNT`.
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) -> Result<(), RecordError> {
        let field = SecretField::from_index(index).ok_or(RecordError::IndexOutOfRange(index))?;
        self.set(field, value);
        Ok(())
    }

    /// Iterates `(field, value)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (SecretField, &str)> + '_ {
        SecretField::ALL.iter().map(move |field| (*field, self.get(*field)))
    }

    /// Returns the values in file order.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(|(_, value)| value.to_string()).collect()
    }
}

impl Default for SecretRecord {
    /// Factory defaults of the IoT bit.
    ///
    /// | Field            | Default            |
    /// |------------------|--------------------|
    /// | request_rate_sec | `2`                |
    /// | ssid             | `G34`              |
    /// | password         | `designthinking`   |
    /// | io_username      | `aom_cloud`        |
    /// | io_group         | `cloud`            |
    /// | io_feed_key      | (empty)            |
    /// | io_key           | (empty)            |
    fn default() -> Self {
        Self::from_defaults([
            "2".to_string(),
            "G34".to_string(),
            "designthinking".to_string(),
            "aom_cloud".to_string(),
            "cloud".to_string(),
            String::new(),
            String::new(),
        ])
    }
}

impl TryFrom<Vec<String>> for SecretRecord {
    type Error = RecordError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        let len = values.len();
        let defaults: [String; FIELD_COUNT] =
            values.try_into().map_err(|_| RecordError::WrongArity(len))?;
        Ok(Self::from_defaults(defaults))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> SecretRecord {
        SecretRecord::from_defaults(["0", "1", "2", "3", "4", "5", "6"].map(String::from))
    }

    #[test]
    fn test_fields_length_is_seven() {
        assert_eq!(SecretRecord::fields_length(), 7);
        assert_eq!(SecretField::ALL.len(), FIELD_COUNT);
    }

    #[test]
    fn test_field_index_matches_position_in_all() {
        for (i, field) in SecretField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(SecretField::from_index(i), Some(*field));
        }
        assert_eq!(SecretField::from_index(FIELD_COUNT), None);
    }

    #[test]
    fn test_from_defaults_places_values_in_file_order() {
        // Arrange / Act
        let record = numbered();

        // Assert
        assert_eq!(record.request_rate_sec, "0");
        assert_eq!(record.ssid, "1");
        assert_eq!(record.password, "2");
        assert_eq!(record.io_username, "3");
        assert_eq!(record.io_group, "4");
        assert_eq!(record.io_feed_key, "5");
        assert_eq!(record.io_key, "6");
    }

    #[test]
    fn test_get_field_returns_none_past_last_slot() {
        let record = numbered();
        assert_eq!(record.get_field(6), Some("6"));
        assert_eq!(record.get_field(7), None);
    }

    #[test]
    fn test_set_field_overwrites_named_slot() {
        // Arrange
        let mut record = numbered();

        // Act
        record.set_field(1, "HomeNet").unwrap();

        // Assert
        assert_eq!(record.ssid, "HomeNet");
        assert_eq!(record.get(SecretField::Ssid), "HomeNet");
    }

    #[test]
    fn test_set_field_rejects_out_of_range_index() {
        let mut record = numbered();
        assert_eq!(record.set_field(7, "x"), Err(RecordError::IndexOutOfRange(7)));
        assert_eq!(record, numbered());
    }

    #[test]
    fn test_set_accepts_empty_and_odd_values() {
        let mut record = numbered();
        record.set(SecretField::RequestRateSec, "not-a-number");
        record.set(SecretField::IoKey, "");
        assert_eq!(record.request_rate_sec, "not-a-number");
        assert_eq!(record.io_key, "");
    }

    #[test]
    fn test_from_lines_fills_missing_slots_from_defaults() {
        // Arrange
        let defaults = numbered();

        // Act
        let record = SecretRecord::from_lines(["a", "b", "c"], &defaults);

        // Assert
        assert_eq!(record.to_vec(), vec!["a", "b", "c", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_from_lines_with_no_lines_equals_defaults() {
        let defaults = SecretRecord::default();
        let record = SecretRecord::from_lines(Vec::<String>::new(), &defaults);
        assert_eq!(record, defaults);
    }

    #[test]
    fn test_from_lines_ignores_lines_past_the_seventh() {
        let defaults = numbered();
        let record =
            SecretRecord::from_lines(["a", "b", "c", "d", "e", "f", "g", "extra"], &defaults);
        assert_eq!(record.to_vec(), vec!["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_try_from_vec_rejects_wrong_arity() {
        let short = vec!["only".to_string(), "two".to_string()];
        assert_eq!(SecretRecord::try_from(short), Err(RecordError::WrongArity(2)));
    }

    #[test]
    fn test_try_from_vec_accepts_seven_values() {
        let values: Vec<String> = numbered().to_vec();
        assert_eq!(SecretRecord::try_from(values).unwrap(), numbered());
    }

    #[test]
    fn test_default_matches_factory_values() {
        let record = SecretRecord::default();
        assert_eq!(record.request_rate_sec, "2");
        assert_eq!(record.ssid, "G34");
        assert_eq!(record.password, "designthinking");
        assert_eq!(record.io_username, "aom_cloud");
        assert_eq!(record.io_group, "cloud");
        assert!(record.io_feed_key.is_empty());
    }
}
