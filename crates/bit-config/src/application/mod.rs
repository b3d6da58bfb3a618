//! Application layer use cases for the editor.
//!
//! Use cases here orchestrate domain objects from `bit-config-core` to carry
//! out a user action, and depend on traits rather than on the file system.
//!
//! # Sub-modules
//!
//! - **`form_state`**   – The editable form: seven record values plus the
//!   feed-letter selector, and the rules that map it to and from a
//!   [`bit_config_core::SecretRecord`].
//!
//! - **`edit_secrets`** – The Load, Save, and Reset actions over a
//!   [`edit_secrets::SecretsStore`].

pub mod edit_secrets;
pub mod form_state;
