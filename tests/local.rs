//! Local backend integration tests.
//!
//! Exercise key creation and sharing through the public API: custom key
//! location strategies, concurrent first use, and registry-driven decrypts.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use secretcrypt::core::store::{KeyLocation, KeyPaths};
use secretcrypt::error::{CipherError, Error, KeyError};
use secretcrypt::{Backend, DecryptParams, LocalBackend, Registry, StrictSecret};
use tempfile::TempDir;

#[derive(Debug)]
struct PerService {
    root: PathBuf,
    service: &'static str,
}

impl KeyPaths for PerService {
    fn key_location(&self) -> secretcrypt::Result<KeyLocation> {
        Ok(KeyLocation::in_dir(self.root.join(self.service)))
    }
}

#[test]
fn test_custom_key_paths() {
    let tmp = TempDir::new().unwrap();
    let local = LocalBackend::with_paths(PerService {
        root: tmp.path().to_path_buf(),
        service: "billing",
    });

    let (ct, params) = local.encrypt("invoice-key", DecryptParams::new()).unwrap();
    assert!(tmp.path().join("billing").join("key").exists());
    assert_eq!(local.decrypt(&ct, &params).unwrap(), "invoice-key");
}

#[test]
fn test_separate_locations_use_separate_keys() {
    let tmp = TempDir::new().unwrap();
    let billing = LocalBackend::with_paths(PerService {
        root: tmp.path().to_path_buf(),
        service: "billing",
    });
    let search = LocalBackend::with_paths(PerService {
        root: tmp.path().to_path_buf(),
        service: "search",
    });

    let (ct, params) = billing.encrypt("x", DecryptParams::new()).unwrap();
    search.encrypt("bootstrap", DecryptParams::new()).unwrap();

    assert!(matches!(
        search.decrypt(&ct, &params),
        Err(Error::Cipher(CipherError::Integrity))
    ));
}

#[test]
fn test_concurrent_first_use_converges_on_one_key() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("keys");

    let secrets: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dir = dir.clone();
                s.spawn(move || {
                    let local = LocalBackend::in_dir(dir);
                    let plaintext = format!("secret-{}", i);
                    let (ct, _) = local.encrypt(&plaintext, DecryptParams::new()).unwrap();
                    (plaintext, ct)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let local = LocalBackend::in_dir(&dir);
    for (plaintext, ct) in secrets {
        assert_eq!(local.decrypt(&ct, &DecryptParams::new()).unwrap(), plaintext);
    }
}

#[test]
fn test_shared_registry_across_threads() {
    let tmp = TempDir::new().unwrap();
    let local = LocalBackend::in_dir(tmp.path());

    let secret = StrictSecret::encrypt(&local, "pooled", DecryptParams::new()).unwrap();
    let encoded = secret.to_string();

    let mut registry = Registry::new();
    registry.register(local);
    let registry = Arc::new(registry);

    thread::scope(|s| {
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            let encoded = encoded.as_str();
            s.spawn(move || {
                let secret: StrictSecret = encoded.parse().unwrap();
                assert_eq!(secret.decrypt(&registry).unwrap(), "pooled");
            });
        }
    });
}

#[test]
fn test_decrypt_after_key_removed() {
    let tmp = TempDir::new().unwrap();
    let local = LocalBackend::in_dir(tmp.path());

    let (ct, params) = local.encrypt("gone", DecryptParams::new()).unwrap();
    std::fs::remove_file(tmp.path().join("key")).unwrap();

    assert!(matches!(
        local.decrypt(&ct, &params),
        Err(Error::Key(KeyError::Missing(_)))
    ));
    assert!(!tmp.path().join("key").exists());
}

#[test]
fn test_key_rotation_is_observed() {
    let tmp = TempDir::new().unwrap();
    let local = LocalBackend::in_dir(tmp.path());
    let (ct, params) = local.encrypt("before", DecryptParams::new()).unwrap();
    assert_eq!(local.decrypt(&ct, &params).unwrap(), "before");

    // Replace the key out of band; the next decrypt must read the new key.
    std::fs::write(tmp.path().join("key"), [7u8; 32]).unwrap();
    assert!(matches!(
        local.decrypt(&ct, &params),
        Err(Error::Cipher(CipherError::Integrity))
    ));
}

#[test]
fn test_corrupt_key_is_not_replaced() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("key"), b"short").unwrap();
    let local = LocalBackend::in_dir(tmp.path());

    assert!(matches!(
        local.encrypt("x", DecryptParams::new()),
        Err(Error::Key(KeyError::Unreadable { .. }))
    ));
    assert_eq!(std::fs::read(tmp.path().join("key")).unwrap(), b"short");
}

#[test]
fn test_unicode_and_empty_plaintext() {
    let tmp = TempDir::new().unwrap();
    let local = LocalBackend::in_dir(tmp.path());

    for plaintext in ["", "こんにちは世界", "🚀🎉", "line1\nline2", "a:b&c=d"] {
        let (ct, params) = local.encrypt(plaintext, DecryptParams::new()).unwrap();
        assert_eq!(local.decrypt(&ct, &params).unwrap(), plaintext);
    }
}

#[test]
fn test_uncreatable_key_dir_is_persist_failure() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("notadir");
    std::fs::write(&blocker, b"file").unwrap();
    let local = LocalBackend::in_dir(blocker.join("sub"));

    assert!(matches!(
        local.encrypt("x", DecryptParams::new()),
        Err(Error::Key(KeyError::PersistFailed { .. }))
    ));
    assert!(matches!(
        local.decrypt(&secretcrypt::Ciphertext::from("AAAA"), &DecryptParams::new()),
        Err(Error::Key(KeyError::Missing(_)))
    ));
}
