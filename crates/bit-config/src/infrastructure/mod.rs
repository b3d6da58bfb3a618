//! Infrastructure layer for the editor.
//!
//! Contains OS-facing adapters: the secrets file, platform path resolution,
//! the editor's own settings file, and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bit_config_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
pub mod ui_bridge;
