//! Identity backend.
//!
//! The ciphertext is the plaintext. Useful for fixtures and tests, never for
//! real secrets.

use super::Backend;
use crate::core::constants::PLAIN_BACKEND;
use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBackend;

impl Backend for PlainBackend {
    fn name(&self) -> &str {
        PLAIN_BACKEND
    }

    fn encrypt(&self, plaintext: &str, params: DecryptParams) -> Result<(Ciphertext, DecryptParams)> {
        Ok((Ciphertext::from(plaintext), params))
    }

    fn decrypt(&self, ciphertext: &Ciphertext, _params: &DecryptParams) -> Result<String> {
        Ok(ciphertext.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::params;

    #[test]
    fn test_plain_roundtrip() {
        let (ct, p) = PlainBackend
            .encrypt("my-abc", params([("k1", "v1")]))
            .unwrap();
        assert_eq!(ct.as_str(), "my-abc");
        assert_eq!(p, params([("k1", "v1")]));
        assert_eq!(PlainBackend.decrypt(&ct, &p).unwrap(), "my-abc");
    }
}
