//! Values that are encrypted whenever they are serialized.
//!
//! [secret::GenericSecret] is generic over the cipher and the plaintext
//! codec so that the SDK stays free of any key storage concerns. The CLI
//! plugs in AES-256-GCM keyed by a master key from the OS key-ring.

pub mod error;
pub mod secret;
pub mod traits;
