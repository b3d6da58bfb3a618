//! Text format of the secrets file consumed by the device firmware.

pub mod codec;

pub use codec::{decode_secrets, encode_secrets, FormatError};
