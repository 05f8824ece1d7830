//! Local backend.
//!
//! Symmetric AES-256-GCM under a key generated on first encrypt and persisted
//! to a file. Every call reads the key from disk, so backends in the same or
//! different processes pointed at the same location share one key.

use std::sync::Arc;

use tracing::debug;

use super::Backend;
use crate::core::constants::LOCAL_BACKEND;
use crate::core::crypto;
use crate::core::store::{self, DefaultKeyPaths, DirKeyPaths, KeyLocation, KeyPaths};
use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::{CipherError, KeyError, Result};

#[derive(Debug, Clone)]
pub struct LocalBackend {
    paths: Arc<dyn KeyPaths>,
}

impl LocalBackend {
    /// Backend storing its key at the platform default location.
    pub fn new() -> Self {
        Self::with_paths(DefaultKeyPaths)
    }

    /// Backend storing its key wherever `paths` resolves.
    pub fn with_paths(paths: impl KeyPaths + 'static) -> Self {
        Self {
            paths: Arc::new(paths),
        }
    }

    /// Backend storing its key in `dir`.
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::with_paths(DirKeyPaths::new(dir))
    }

    /// Resolved key location.
    pub fn key_location(&self) -> Result<KeyLocation> {
        self.paths.key_location()
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for LocalBackend {
    fn name(&self) -> &str {
        LOCAL_BACKEND
    }

    /// Params are echoed back unchanged; the ciphertext carries its own nonce.
    fn encrypt(&self, plaintext: &str, params: DecryptParams) -> Result<(Ciphertext, DecryptParams)> {
        let location = self.key_location()?;
        debug!(path = %location.file().display(), "local encrypt");

        let key = store::load_or_create(&location)?;
        let ciphertext = crypto::encrypt(&key, plaintext.as_bytes())?;
        Ok((Ciphertext::from(ciphertext), params))
    }

    fn decrypt(&self, ciphertext: &Ciphertext, _params: &DecryptParams) -> Result<String> {
        let location = self.key_location()?;
        debug!(path = %location.file().display(), "local decrypt");

        let key = store::load(&location)?
            .ok_or_else(|| KeyError::Missing(location.file().to_path_buf()))?;
        let plaintext = crypto::decrypt(&key, ciphertext.as_str())?;

        std::str::from_utf8(&plaintext)
            .map(str::to_owned)
            .map_err(|_| CipherError::InvalidUtf8.into())
    }
}
