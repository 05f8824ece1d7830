//! Error types.
//!
//! Each area of the crate has its own error enum; [`Error`] aggregates them so
//! callers can use a single `Result` while still matching on the precise kind.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing or serializing the encoded secret text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed encoded secret: {reason}")]
    Malformed { reason: String },

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Errors from backend resolution and external backends.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("unknown backend: {0}")]
    Unknown(String),

    #[error("{backend} backend failed: {message}")]
    Failed { backend: String, message: String },

    #[error("{backend} backend requires parameter '{param}'")]
    MissingParam { backend: String, param: &'static str },
}

/// Errors from the local backend's key file.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("key file {} is unreadable: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("failed to persist key at {}: {source}", path.display())]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no key file at {}", .0.display())]
    Missing(PathBuf),

    #[error("unable to determine data directory for key storage")]
    NoDataDir,
}

/// Errors from symmetric encryption and decryption.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("integrity check failed: ciphertext was tampered with or encrypted under a different key")]
    Integrity,

    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors from loading `secretcrypt.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
