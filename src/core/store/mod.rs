//! Local key storage.
//!
//! Where the local backend keeps its key is decided by a [`KeyPaths`]
//! strategy, so tests and alternate deployments can redirect storage without
//! touching the cryptography.
//!
//! ## Adding a New Location Strategy
//!
//! 1. Implement the `KeyPaths` trait
//! 2. Hand it to `LocalBackend::with_paths`
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Debug)]
//! struct PerService { service: String }
//!
//! impl KeyPaths for PerService {
//!     fn key_location(&self) -> Result<KeyLocation> {
//!         Ok(KeyLocation::in_dir(PathBuf::from("/etc/keys").join(&self.service)))
//!     }
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::constants;
use crate::error::{KeyError, Result};

mod fs;

pub use fs::{create, load, load_or_create};

/// Directory and file holding a local key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLocation {
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl KeyLocation {
    /// Location using the standard key file name inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(constants::KEY_FILE_NAME);
        Self { dir, file }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Strategy resolving where the local key lives.
pub trait KeyPaths: Send + Sync + fmt::Debug {
    /// Resolve the key directory and key file path.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if the location cannot be determined.
    fn key_location(&self) -> Result<KeyLocation>;
}

/// Platform default: `<data_dir>/secretcrypt/key`.
///
/// `$XDG_DATA_HOME` or `~/.local/share` on Linux,
/// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyPaths;

impl KeyPaths for DefaultKeyPaths {
    fn key_location(&self) -> Result<KeyLocation> {
        let base = dirs::data_dir().ok_or(KeyError::NoDataDir)?;
        Ok(KeyLocation::in_dir(base.join(constants::KEY_DIR_NAME)))
    }
}

/// Fixed key directory (config overrides, tests).
#[derive(Debug, Clone)]
pub struct DirKeyPaths {
    dir: PathBuf,
}

impl DirKeyPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl KeyPaths for DirKeyPaths {
    fn key_location(&self) -> Result<KeyLocation> {
        Ok(KeyLocation::in_dir(self.dir.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_key_paths() {
        let paths = DirKeyPaths::new("/tmp/sc");
        let loc = paths.key_location().unwrap();
        assert_eq!(loc.dir(), Path::new("/tmp/sc"));
        assert_eq!(loc.file(), Path::new("/tmp/sc/key"));
    }

    #[test]
    fn test_default_key_paths_ends_with_key_file() {
        // Data dir may be missing in minimal environments.
        if let Ok(loc) = DefaultKeyPaths.key_location() {
            assert!(loc.file().ends_with("secretcrypt/key"));
            assert_eq!(loc.file().parent(), Some(loc.dir()));
        }
    }
}
