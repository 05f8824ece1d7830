//! AWS KMS backend.
//!
//! Encrypts secrets using AWS Key Management Service.
//! Enable with `--features aws`.
//!
//! ## Params
//!
//! - encrypt: `region` and `key_id` (key ID, ARN or alias)
//! - decrypt: `region` (KMS stores the key reference inside the ciphertext)
//!
//! ```text
//! kms:region=us-east-1:AQICAHh...
//! ```
//!
//! Credentials come from the default AWS provider chain. Transient failures
//! are returned to the caller as-is.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use aws_sdk_kms::config::Region;
use aws_sdk_kms::primitives::Blob;
use tracing::trace;

use super::Backend;
use crate::core::constants::{KMS_BACKEND, KMS_KEY_ID_PARAM, KMS_REGION_PARAM};
use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::{BackendError, CipherError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct KmsBackend;

impl KmsBackend {
    pub fn new() -> Self {
        Self
    }

    fn failed(message: impl std::fmt::Display) -> BackendError {
        BackendError::Failed {
            backend: KMS_BACKEND.to_string(),
            message: message.to_string(),
        }
    }

    fn param<'a>(params: &'a DecryptParams, name: &'static str) -> Result<&'a str> {
        params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| {
                BackendError::MissingParam {
                    backend: KMS_BACKEND.to_string(),
                    param: name,
                }
                .into()
            })
    }

    fn runtime() -> Result<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Self::failed(format!("failed to create runtime: {}", e)).into())
    }

    async fn client(region: &str) -> aws_sdk_kms::Client {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        aws_sdk_kms::Client::new(&config)
    }
}

impl Backend for KmsBackend {
    fn name(&self) -> &str {
        KMS_BACKEND
    }

    fn encrypt(&self, plaintext: &str, params: DecryptParams) -> Result<(Ciphertext, DecryptParams)> {
        let region = Self::param(&params, KMS_REGION_PARAM)?;
        let key_id = Self::param(&params, KMS_KEY_ID_PARAM)?;

        trace!(
            region,
            key_id,
            plaintext_len = plaintext.len(),
            "encrypting with AWS KMS"
        );

        let blob = Self::runtime()?.block_on(async {
            let client = Self::client(region).await;
            let result = client
                .encrypt()
                .key_id(key_id)
                .plaintext(Blob::new(plaintext.as_bytes()))
                .send()
                .await
                .map_err(|e| Self::failed(format!("encrypt failed: {}", e)))?;

            result
                .ciphertext_blob()
                .map(|b| b.as_ref().to_vec())
                .ok_or_else(|| Self::failed("no ciphertext returned"))
        })?;

        let encoded = STANDARD.encode(blob);
        trace!(ciphertext_len = encoded.len(), "encrypted with AWS KMS");

        let mut out = DecryptParams::new();
        out.insert(KMS_REGION_PARAM.to_string(), region.to_string());
        Ok((Ciphertext::from(encoded), out))
    }

    fn decrypt(&self, ciphertext: &Ciphertext, params: &DecryptParams) -> Result<String> {
        let region = Self::param(params, KMS_REGION_PARAM)?;
        trace!(region, ciphertext_len = ciphertext.len(), "decrypting with AWS KMS");

        let blob = STANDARD
            .decode(ciphertext.as_str())
            .map_err(|e| CipherError::InvalidCiphertext(format!("invalid base64: {}", e)))?;

        let plaintext = Self::runtime()?.block_on(async {
            let client = Self::client(region).await;
            let result = client
                .decrypt()
                .ciphertext_blob(Blob::new(blob))
                .send()
                .await
                .map_err(|e| Self::failed(format!("decrypt failed: {}", e)))?;

            result
                .plaintext()
                .map(|b| b.as_ref().to_vec())
                .ok_or_else(|| Self::failed("no plaintext returned"))
        })?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8.into())
    }
}
