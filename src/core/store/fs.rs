//! Filesystem key lifecycle.
//!
//! A key location is either absent, present (exactly `KEY_LEN` raw bytes) or
//! unreadable. Present keys are read from disk on every call; nothing is
//! cached in memory between operations. Unreadable keys are reported, never
//! regenerated, since a new key would orphan everything encrypted before.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::KeyLocation;
use crate::core::constants::KEY_LEN;
use crate::core::crypto;
use crate::error::{KeyError, Result};

/// Read the key at `location`.
///
/// Returns `Ok(None)` if no key file exists.
///
/// # Errors
///
/// Returns `KeyError::Unreadable` if the file exists but cannot be read or
/// does not hold exactly `KEY_LEN` bytes.
pub fn load(location: &KeyLocation) -> Result<Option<Zeroizing<Vec<u8>>>> {
    let path = location.file();

    let key = match fs::read(path) {
        Ok(bytes) => Zeroizing::new(bytes),
        // A path that cannot exist (e.g. a parent is a regular file) is absent;
        // creating it reports the failure.
        Err(e) if e.kind() == ErrorKind::NotFound || fs::symlink_metadata(path).is_err() => {
            return Ok(None)
        }
        Err(e) => {
            return Err(KeyError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into())
        }
    };

    #[cfg(unix)]
    warn_if_insecure(path);

    if key.len() != KEY_LEN {
        return Err(KeyError::Unreadable {
            path: path.to_path_buf(),
            reason: format!("expected {} key bytes, found {}", KEY_LEN, key.len()),
        }
        .into());
    }

    Ok(Some(key))
}

/// Generate a key and persist it at `location` unless one already exists.
///
/// The key is written to a 0600 temporary file in the key directory and then
/// linked into place without replacing an existing file. If another writer
/// got there first, its key is loaded and returned instead, so all callers
/// converge on one key.
///
/// # Errors
///
/// Returns `KeyError::PersistFailed` if the directory or file cannot be
/// created, and `KeyError::Unreadable` if the winning key cannot be read.
pub fn create(location: &KeyLocation) -> Result<Zeroizing<Vec<u8>>> {
    let dir = location.dir();
    let path = location.file();
    debug!(path = %path.display(), "generating new key");

    create_dir(dir)?;

    let persist_failed = |source| KeyError::PersistFailed {
        path: path.to_path_buf(),
        source,
    };

    let key = crypto::generate_key();

    let mut tmp = tempfile::Builder::new()
        .prefix(".key-")
        .tempfile_in(dir)
        .map_err(persist_failed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
            .map_err(persist_failed)?;
    }

    tmp.write_all(&key).map_err(persist_failed)?;
    tmp.as_file().sync_all().map_err(persist_failed)?;

    match tmp.persist_noclobber(path) {
        Ok(_) => {
            debug!(path = %path.display(), "key saved");
            Ok(key)
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "key created concurrently, using existing key");
            load(location)?.ok_or_else(|| KeyError::Missing(path.to_path_buf()).into())
        }
        Err(e) => Err(persist_failed(e.error).into()),
    }
}

/// Load the key at `location`, creating it if absent.
pub fn load_or_create(location: &KeyLocation) -> Result<Zeroizing<Vec<u8>>> {
    match load(location)? {
        Some(key) => Ok(key),
        None => create(location),
    }
}

/// Create the key directory (and parents), owner-only on Unix.
fn create_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir).map_err(|source| {
        KeyError::PersistFailed {
            path: dir.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Warn when a key file is readable by anyone but its owner.
#[cfg(unix)]
fn warn_if_insecure(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode != 0o600 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key file permissions"
            );
        }
    }
}
