//! Encryption backends.
//!
//! A backend turns plaintext into an opaque ciphertext plus the params needed
//! to reverse it, under a stable name that is written into every encoded
//! secret it produces.
//!
//! ## Backends
//!
//! - **local**: Always available. AES-256-GCM with a key generated on first
//!   use and persisted to disk.
//! - **kms**: Feature-gated (`aws`). Uses AWS Key Management Service.
//! - **plain**: Identity backend for tests and fixtures. Not registered by
//!   default.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Backend` trait
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Feature-gate if appropriate
//! 4. Register it on a `Registry` before the first decrypt

use std::fmt;

use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::Result;

#[cfg(feature = "aws")]
pub mod kms;
mod local;
mod plain;
mod registry;

#[cfg(feature = "aws")]
pub use kms::KmsBackend;
pub use local::LocalBackend;
pub use plain::PlainBackend;
pub use registry::Registry;

/// Capability contract every encryption backend implements.
///
/// `decrypt` must be free of observable side effects: callers never cache
/// plaintext and may call it any number of times with the same inputs.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Stable identifier used in encoded secrets.
    fn name(&self) -> &str;

    /// Encrypt `plaintext`.
    ///
    /// Returns the ciphertext and the params that must accompany it for
    /// decryption. Backends may ignore the input params and return fresh ones.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific error if encryption fails.
    fn encrypt(&self, plaintext: &str, params: DecryptParams) -> Result<(Ciphertext, DecryptParams)>;

    /// Decrypt a ciphertext previously produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns a backend-specific error if decryption fails.
    fn decrypt(&self, ciphertext: &Ciphertext, params: &DecryptParams) -> Result<String>;
}
