//! Canonical text form of an encrypted secret.
//!
//! ```text
//! <backend-name>:<key1>=<val1>&<key2>=<val2>:<ciphertext>
//! ```
//!
//! The string is split into at most three fields, so the ciphertext may itself
//! contain `:`. The empty string is the "no secret" value and decodes to an
//! empty [`Encoded`].
//!
//! Params are not escaped. `encode` rejects any name, key or value that would
//! not survive a decode instead of silently producing an ambiguous string.
//! Values may contain `=` since a pair is split on its first `=` only.
//! Anything `decode` accepts can be encoded again.

use tracing::trace;

use crate::core::constants::{FIELD_DELIMITER, PARAM_ASSIGN, PARAM_SEPARATOR};
use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::CodecError;

/// The three fields of an encoded secret, before backend resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub backend: String,
    pub params: DecryptParams,
    pub ciphertext: Ciphertext,
}

impl Encoded {
    pub fn new(backend: impl Into<String>, params: DecryptParams, ciphertext: Ciphertext) -> Self {
        Self {
            backend: backend.into(),
            params,
            ciphertext,
        }
    }

    /// True for the zero value (what the empty string decodes to).
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty() && self.params.is_empty() && self.ciphertext.is_empty()
    }

    /// Serialize to the canonical text form.
    pub fn encode(&self) -> Result<String, CodecError> {
        encode(&self.backend, &self.params, &self.ciphertext)
    }
}

fn malformed(reason: impl Into<String>) -> CodecError {
    CodecError::Malformed {
        reason: reason.into(),
    }
}

/// Parse an encoded secret string.
///
/// # Errors
///
/// Returns `CodecError::Malformed` if the string has fewer than three fields,
/// an empty backend name, or a malformed params field.
pub fn decode(text: &str) -> Result<Encoded, CodecError> {
    if text.is_empty() {
        return Ok(Encoded::default());
    }

    let mut fields = text.splitn(3, FIELD_DELIMITER);
    let backend = fields.next().unwrap_or_default();
    let (Some(params), Some(ciphertext)) = (fields.next(), fields.next()) else {
        return Err(malformed(
            "expected three fields: <backend>:<params>:<ciphertext>",
        ));
    };

    if backend.is_empty() {
        return Err(malformed("empty backend name"));
    }

    let params = decode_params(params)?;
    trace!(backend, params = params.len(), ciphertext_len = ciphertext.len(), "decoded secret");

    Ok(Encoded {
        backend: backend.to_string(),
        params,
        ciphertext: Ciphertext::from(ciphertext),
    })
}

/// Serialize the three fields into the canonical text form.
///
/// The zero value (empty name, no params, empty ciphertext) encodes to `""`.
///
/// # Errors
///
/// Returns `CodecError::InvalidField` if the backend name is empty or
/// contains `:`, if a param key is empty or contains `:`, `&` or `=`, or if a
/// param value contains `:` or `&`.
pub fn encode(
    backend: &str,
    params: &DecryptParams,
    ciphertext: &Ciphertext,
) -> Result<String, CodecError> {
    if backend.is_empty() {
        if params.is_empty() && ciphertext.is_empty() {
            return Ok(String::new());
        }
        return Err(CodecError::InvalidField {
            field: "backend name",
            value: String::new(),
            reason: "must not be empty",
        });
    }
    if backend.contains(FIELD_DELIMITER) {
        return Err(CodecError::InvalidField {
            field: "backend name",
            value: backend.to_string(),
            reason: "must not contain ':'",
        });
    }

    let params = encode_params(params)?;
    let mut out = String::with_capacity(backend.len() + params.len() + ciphertext.len() + 2);
    out.push_str(backend);
    out.push(FIELD_DELIMITER);
    out.push_str(&params);
    out.push(FIELD_DELIMITER);
    out.push_str(ciphertext.as_str());
    Ok(out)
}

/// Parse a `key=value&key=value` params field.
///
/// Empty pieces (`a=1&&b=2`, trailing `&`) are skipped. The value is
/// everything after the first `=`.
///
/// # Errors
///
/// Returns `CodecError::Malformed` for a piece without `=`, an empty key, or a
/// repeated key.
pub fn decode_params(segment: &str) -> Result<DecryptParams, CodecError> {
    let mut params = DecryptParams::new();

    for pair in segment.split(PARAM_SEPARATOR).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once(PARAM_ASSIGN)
            .ok_or_else(|| malformed(format!("param '{}' is not a key=value pair", pair)))?;
        if key.is_empty() {
            return Err(malformed(format!("param '{}' has an empty key", pair)));
        }
        if params.insert(key.to_string(), value.to_string()).is_some() {
            return Err(malformed(format!("param '{}' appears more than once", key)));
        }
    }

    Ok(params)
}

/// Serialize params as `key=value` pairs joined by `&`, in key order.
///
/// # Errors
///
/// Returns `CodecError::InvalidField` for an empty key, or a key or value
/// containing a reserved character.
pub fn encode_params(params: &DecryptParams) -> Result<String, CodecError> {
    let reserved_in_value = |c: char| c == FIELD_DELIMITER || c == PARAM_SEPARATOR;
    let reserved_in_key = |c: char| reserved_in_value(c) || c == PARAM_ASSIGN;

    let mut out = String::new();
    for (key, value) in params {
        if key.is_empty() {
            return Err(CodecError::InvalidField {
                field: "param key",
                value: key.clone(),
                reason: "must not be empty",
            });
        }
        if key.contains(reserved_in_key) {
            return Err(CodecError::InvalidField {
                field: "param key",
                value: key.clone(),
                reason: "must not contain ':', '&' or '='",
            });
        }
        if value.contains(reserved_in_value) {
            return Err(CodecError::InvalidField {
                field: "param value",
                value: value.clone(),
                reason: "must not contain ':' or '&'",
            });
        }
        if !out.is_empty() {
            out.push(PARAM_SEPARATOR);
        }
        out.push_str(key);
        out.push(PARAM_ASSIGN);
        out.push_str(value);
    }

    Ok(out)
}
