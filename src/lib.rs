//! Secretcrypt - self-describing encrypted secrets for configuration files.
//!
//! An encoded secret names the backend that produced it, carries the params
//! needed to decrypt it, and then the ciphertext:
//!
//! ```text
//! local::3q2+7w8AAAB...
//! kms:region=us-east-1:AQICAHh...
//! ```
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # Encrypt a value into an encoded secret
//! │   ├── decrypt       # Decrypt an encoded secret
//! │   ├── inspect       # Show the parts of an encoded secret
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── codec         # Encoded secret text format
//!     ├── secret        # StrictSecret and lazily parsed Secret
//!     ├── backend/      # Encryption backends
//!     │   ├── mod       # Backend trait
//!     │   ├── registry  # Name to backend lookup
//!     │   ├── local     # AES-256-GCM with a key on disk
//!     │   ├── plain     # Identity backend for tests
//!     │   └── kms       # AWS KMS (feature `aws`)
//!     ├── store/        # Local key storage
//!     │   ├── mod       # KeyPaths strategy
//!     │   └── fs        # Key file create/load
//!     ├── crypto        # AES-256-GCM primitives
//!     └── config        # secretcrypt.toml management
//! ```
//!
//! # Example
//!
//! ```no_run
//! use secretcrypt::{Config, Registry, Secret};
//!
//! # fn main() -> secretcrypt::error::Result<()> {
//! let registry = Registry::from_config(&Config::load(None)?);
//! let password = Secret::new("local::3q2+7w8AAAB...");
//! let plaintext = password.decrypt(&registry)?;
//! # let _ = plaintext;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::backend::{Backend, LocalBackend, PlainBackend, Registry};
pub use crate::core::config::Config;
pub use crate::core::secret::{Secret, StrictSecret};
pub use crate::core::types::{Ciphertext, DecryptParams};
pub use crate::error::{Error, Result};
