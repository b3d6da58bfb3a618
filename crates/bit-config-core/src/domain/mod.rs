//! Domain entities for the IoT bit configuration.
//!
//! This module contains pure data and rules with no infrastructure
//! dependencies: it can be compiled and tested on any platform without
//! touching the disk.

/// The seven-slot configuration record.
///
/// See [`record::SecretRecord`] for the main type.
pub mod record;

/// Single-letter shortcuts for the canonical feed keys.
pub mod feed;
