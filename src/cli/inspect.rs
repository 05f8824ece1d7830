//! Inspect command.
//!
//! Shows the backend, params and ciphertext size of an encoded secret. Never
//! touches a backend, so it works for secrets this build cannot decrypt.

use serde_json::json;

use crate::cli::output;
use crate::core::secret::StrictSecret;
use crate::error::Result;

/// Print the parts of `encoded`.
pub fn execute(encoded: &str, json: bool) -> Result<()> {
    let secret = StrictSecret::load(encoded.trim_end_matches(['\n', '\r']))?;

    if json {
        let value = json!({
            "backend": secret.backend(),
            "params": secret.params(),
            "ciphertext_len": secret.ciphertext().len(),
        });
        println!("{}", value);
        return Ok(());
    }

    if secret.is_empty() {
        output::warn("empty secret");
        return Ok(());
    }

    output::kv("backend", output::key(secret.backend()));
    if secret.params().is_empty() {
        output::kv("params", "none");
    } else {
        for (k, v) in secret.params() {
            output::kv("param", format!("{}={}", k, v));
        }
    }
    output::kv("ciphertext", format!("{} chars", secret.ciphertext().len()));
    Ok(())
}
