//! Constants used throughout secretcrypt.
//!
//! Centralizes magic strings and configuration values.

/// Separates backend name, params and ciphertext in an encoded secret.
pub const FIELD_DELIMITER: char = ':';

/// Separates `key=value` pairs inside the params field.
pub const PARAM_SEPARATOR: char = '&';

/// Separates a param key from its value.
pub const PARAM_ASSIGN: char = '=';

/// Name of the built-in local backend.
pub const LOCAL_BACKEND: &str = "local";

/// Name of the identity backend (testing and fixtures).
pub const PLAIN_BACKEND: &str = "plain";

/// Name of the AWS KMS backend.
pub const KMS_BACKEND: &str = "kms";

/// Directory name under the platform data directory holding the local key.
pub const KEY_DIR_NAME: &str = "secretcrypt";

/// Local key file name.
pub const KEY_FILE_NAME: &str = "key";

/// Local key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Configuration file name.
pub const CONFIG_FILE: &str = "secretcrypt.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "SECRETCRYPT_CONFIG";

/// Environment variable overriding the local key directory.
pub const KEY_DIR_ENV: &str = "SECRETCRYPT_KEY_DIR";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SECRETCRYPT_LOG";

/// kms param naming the AWS region.
pub const KMS_REGION_PARAM: &str = "region";

/// kms param naming the key used for encryption.
pub const KMS_KEY_ID_PARAM: &str = "key_id";
