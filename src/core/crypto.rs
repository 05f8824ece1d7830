//! Symmetric authenticated encryption for the local backend.
//!
//! AES-256-GCM with a random 96-bit nonce per message. The encoded ciphertext
//! is self-contained:
//!
//! ```text
//! base64( nonce[12] || ciphertext || tag[16] )
//! ```

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Generate a fresh 256-bit key from the OS random source.
pub fn generate_key() -> Zeroizing<Vec<u8>> {
    let key = Aes256Gcm::generate_key(OsRng);
    Zeroizing::new(key.to_vec())
}

/// Encrypt `plaintext` under `key`, returning the base64 ciphertext.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if the key has the wrong length or
/// the cipher rejects the input.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<String> {
    trace!(plaintext_len = plaintext.len(), "encrypting");

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| CipherError::EncryptionFailed("invalid key length".to_string()))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&sealed);

    let encoded = STANDARD.encode(blob);
    trace!(ciphertext_len = encoded.len(), "encrypted");
    Ok(encoded)
}

/// Decrypt a ciphertext produced by [`encrypt`].
///
/// # Errors
///
/// Returns `CipherError::InvalidCiphertext` if the text is not base64 or is
/// too short to hold a nonce and tag, and `CipherError::Integrity` if
/// authentication fails (tampering or a different key).
pub fn decrypt(key: &[u8], ciphertext: &str) -> Result<Zeroizing<Vec<u8>>> {
    trace!(ciphertext_len = ciphertext.len(), "decrypting");

    let blob = STANDARD
        .decode(ciphertext)
        .map_err(|e| CipherError::InvalidCiphertext(format!("invalid base64: {}", e)))?;
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::InvalidCiphertext("ciphertext too short".to_string()).into());
    }

    let (nonce, sealed) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::Integrity)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CipherError::Integrity)?;

    trace!(plaintext_len = plaintext.len(), "decrypted");
    Ok(Zeroizing::new(plaintext))
}
