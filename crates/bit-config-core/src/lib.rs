//! # bit-config-core
//!
//! Shared library for the AoM IoT bit configuration editor containing the
//! field record, the feed-letter alias, and the secrets-file text format.
//!
//! This crate has zero dependencies on the file system, UI frameworks, or
//! platform path conventions.  The editor application (`bit-config`) layers
//! file access and the UI bridge on top of it.
//!
//! # Overview
//!
//! The IoT bit reads its settings from a small text file, `secrets.txt`,
//! with exactly seven lines and no field names.  Position is everything:
//! line 1 is the request rate, line 2 the Wi-Fi SSID, and so on.
//!
//! - **`domain`** – The [`SecretRecord`] (seven ordered text slots, addressed
//!   by [`SecretField`] or by index) and the [`FeedLetter`] alias that turns
//!   the letters `a`..`f` into canonical feed keys such as `feed-c`.
//!
//! - **`format`** – How a record becomes text and back again.  Missing lines
//!   are filled from a defaults record; values containing line breaks are
//!   refused because they would shift every following slot.

pub mod domain;
pub mod format;

pub use domain::feed::{FeedLetter, FEED_KEY_PREFIX};
pub use domain::record::{RecordError, SecretField, SecretRecord, FIELD_COUNT};
pub use format::codec::{decode_secrets, encode_secrets, FormatError};
