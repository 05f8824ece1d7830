//! Decrypt command.

use std::path::Path;

use crate::cli::input;
use crate::core::backend::Registry;
use crate::core::config::Config;
use crate::core::secret::StrictSecret;
use crate::error::Result;

/// Decrypt `encoded` (or stdin) and print the plaintext.
pub fn execute(config: Option<&Path>, encoded: Option<String>) -> Result<()> {
    let encoded = input::value_or_stdin(encoded, "Encoded secret")?;
    let secret = StrictSecret::load(encoded.trim_end_matches(['\n', '\r']))?;

    let config = Config::load(config)?;
    let registry = Registry::from_config(&config);

    let plaintext = secret.decrypt(&registry)?;
    println!("{}", plaintext);
    Ok(())
}
