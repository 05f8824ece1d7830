//! Encrypt command.
//!
//! Encrypts a value with the chosen backend and prints the encoded secret to
//! stdout, ready to paste into a config file.

use std::path::Path;

use tracing::{debug, info};

use crate::cli::{input, output};
use crate::core::backend::Registry;
use crate::core::config::Config;
use crate::core::constants::KMS_BACKEND;
use crate::core::secret::StrictSecret;
use crate::core::types::DecryptParams;
use crate::error::Result;

/// Encrypt `plaintext` (or prompted/piped input) with `backend`.
pub fn execute(
    config: Option<&Path>,
    backend: &str,
    params: DecryptParams,
    plaintext: Option<String>,
) -> Result<()> {
    let config = Config::load(config)?;
    let registry = Registry::from_config(&config);
    let backend = registry.get(backend)?;

    let params = with_defaults(&config, backend.name(), params);
    debug!(backend = backend.name(), params = params.len(), "encrypt params resolved");

    let plaintext = input::value_or_stdin(plaintext, "Secret value")?;
    let secret = StrictSecret::encrypt(backend.as_ref(), &plaintext, params)?;
    info!(backend = backend.name(), "encrypted secret");

    println!("{}", secret);
    output::success(&format!("encrypted with {}", output::key(backend.name())));
    Ok(())
}

/// Config defaults for `backend`, overridden by explicit params.
fn with_defaults(config: &Config, backend: &str, explicit: DecryptParams) -> DecryptParams {
    let mut params = if backend == KMS_BACKEND {
        config.kms_params()
    } else {
        DecryptParams::new()
    };
    params.extend(explicit);
    params
}
