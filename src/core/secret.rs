//! Secret handles.
//!
//! [`StrictSecret`] is a parsed encoded secret: backend name, params and
//! ciphertext. [`Secret`] holds the raw text and parses it on first use.
//!
//! Neither caches plaintext. Every `decrypt` resolves the backend in the
//! registry and calls it again, so out-of-band rotation is always observed.
//! The backend name is only resolved at decrypt time; parsing a secret for a
//! backend that is not registered succeeds.
//!
//! Both deserialize from a string, so they can sit directly in config structs:
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct DbConfig {
//!     url: String,
//!     password: Secret,
//! }
//!
//! let password = config.password.decrypt(&registry)?;
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::core::backend::{Backend, Registry};
use crate::core::codec::{self, Encoded};
use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::{CodecError, Result};

/// A parsed encoded secret.
///
/// Fields are fixed at construction. The zero value (`StrictSecret::default()`
/// or parsing `""`) means "no secret" and decrypts to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrictSecret {
    backend: String,
    params: DecryptParams,
    ciphertext: Ciphertext,
}

impl StrictSecret {
    /// Build a secret from its parts.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidField` if the parts cannot be encoded.
    pub fn new(
        backend: impl Into<String>,
        params: DecryptParams,
        ciphertext: Ciphertext,
    ) -> std::result::Result<Self, CodecError> {
        let backend = backend.into();
        codec::encode(&backend, &params, &ciphertext)?;
        Ok(Self {
            backend,
            params,
            ciphertext,
        })
    }

    /// Parse an encoded secret string.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Malformed` if the string is not a valid encoding.
    pub fn load(text: &str) -> std::result::Result<Self, CodecError> {
        let Encoded {
            backend,
            params,
            ciphertext,
        } = codec::decode(text)?;
        Ok(Self {
            backend,
            params,
            ciphertext,
        })
    }

    /// Encrypt `plaintext` with `backend` and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if encryption fails, or
    /// `CodecError::InvalidField` if the backend returned params that cannot be
    /// encoded.
    pub fn encrypt(backend: &dyn Backend, plaintext: &str, params: DecryptParams) -> Result<Self> {
        let (ciphertext, params) = backend.encrypt(plaintext, params)?;
        Ok(Self::new(backend.name(), params, ciphertext)?)
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn params(&self) -> &DecryptParams {
        &self.params
    }

    pub fn ciphertext(&self) -> &Ciphertext {
        &self.ciphertext
    }

    /// True for the "no secret" value.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Decrypt through the backend registered under this secret's name.
    ///
    /// The zero value returns `""` without touching the registry.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unknown` if the backend is not registered, or the
    /// backend's own error.
    pub fn decrypt(&self, registry: &Registry) -> Result<String> {
        if self.is_empty() {
            return Ok(String::new());
        }
        trace!(backend = %self.backend, "decrypting secret");
        registry.decrypt(&self.backend, &self.ciphertext, &self.params)
    }

    /// Canonical encoded form.
    pub fn encode(&self) -> String {
        // Every constructor goes through `codec::encode` or `codec::decode`,
        // and anything decode accepts is encodable.
        match codec::encode(&self.backend, &self.params, &self.ciphertext) {
            Ok(text) => text,
            Err(e) => {
                debug_assert!(false, "unencodable secret: {}", e);
                String::new()
            }
        }
    }
}

impl FromStr for StrictSecret {
    type Err = CodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::load(s)
    }
}

impl fmt::Display for StrictSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for StrictSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for StrictSecret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::load(&text).map_err(serde::de::Error::custom)
    }
}

/// An encoded secret that is parsed on first use.
///
/// Only the parse is memoized; `decrypt` always calls the backend.
#[derive(Debug, Clone, Default)]
pub struct Secret {
    raw: String,
    parsed: OnceCell<StrictSecret>,
}

impl Secret {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: OnceCell::new(),
        }
    }

    /// The encoded text as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True for the "no secret" value.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Parse (once) and return the strict form.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Malformed` if the text is not a valid encoding.
    /// Failed parses are not memoized.
    pub fn strict(&self) -> std::result::Result<&StrictSecret, CodecError> {
        self.parsed.get_or_try_init(|| {
            trace!("parsing lazy secret");
            StrictSecret::load(&self.raw)
        })
    }

    /// True once the text has been parsed.
    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Decrypt the secret.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Malformed` for invalid text, otherwise the same
    /// errors as [`StrictSecret::decrypt`].
    pub fn decrypt(&self, registry: &Registry) -> Result<String> {
        if self.is_empty() {
            return Ok(String::new());
        }
        self.strict()?.decrypt(registry)
    }
}

impl From<StrictSecret> for Secret {
    fn from(strict: StrictSecret) -> Self {
        let raw = strict.encode();
        Self {
            raw,
            parsed: OnceCell::with_value(strict),
        }
    }
}

impl From<String> for Secret {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Secret {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Secret {}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
