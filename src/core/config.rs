//! Configuration file management.
//!
//! Handles reading and validating `secretcrypt.toml`:
//!
//! ```toml
//! # Directory holding the local backend key (default: <data_dir>/secretcrypt)
//! key_dir = "/var/lib/myapp/secretcrypt"
//!
//! # Default encrypt params for the kms backend
//! [kms]
//! region = "us-east-1"
//! key_id = "alias/myapp"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{
    self, FIELD_DELIMITER, KMS_KEY_ID_PARAM, KMS_REGION_PARAM, PARAM_SEPARATOR,
};
use crate::core::types::DecryptParams;
use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Local backend key directory override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_dir: Option<PathBuf>,
    /// Default params for the kms backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms: Option<KmsConfig>,
}

/// Default encrypt params for the kms backend.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KmsConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub key_id: Option<String>,
}

impl Config {
    /// Default config location: `<config_dir>/secretcrypt/secretcrypt.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::KEY_DIR_NAME).join(constants::CONFIG_FILE))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or
    /// `ConfigError::Parse` if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Resolve configuration for this process.
    ///
    /// Uses `explicit` if given, else `$SECRETCRYPT_CONFIG`, else the default
    /// path when that file exists, else defaults. `$SECRETCRYPT_KEY_DIR`
    /// overrides `key_dir` in every case.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(constants::CONFIG_ENV).map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_from(&path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::load_from(&path)?,
                None => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        if let Some(dir) = std::env::var_os(constants::KEY_DIR_ENV) {
            config.key_dir = Some(PathBuf::from(dir));
            config.validate()?;
        }

        Ok(config)
    }

    /// Local backend key directory, if overridden.
    pub fn key_dir(&self) -> Option<&Path> {
        self.key_dir.as_deref()
    }

    /// Default encrypt params for the kms backend.
    pub fn kms_params(&self) -> DecryptParams {
        let mut params = DecryptParams::new();
        if let Some(kms) = &self.kms {
            if let Some(region) = &kms.region {
                params.insert(KMS_REGION_PARAM.to_string(), region.clone());
            }
            if let Some(key_id) = &kms.key_id {
                params.insert(KMS_KEY_ID_PARAM.to_string(), key_id.clone());
            }
        }
        params
    }

    /// Validate the configuration contents.
    ///
    /// Checks:
    /// - `key_dir`, when set, is not empty
    /// - kms values can be carried in an encoded secret
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.key_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "key_dir",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if let Some(kms) = &self.kms {
            // The region is written into encoded secrets; the key id is not.
            let reserved = |c: char| c == FIELD_DELIMITER || c == PARAM_SEPARATOR;
            if let Some(region) = &kms.region {
                if region.is_empty() || region.contains(reserved) {
                    return Err(ConfigError::InvalidValue {
                        field: "kms.region",
                        reason: format!("'{}' must be non-empty and free of ':' and '&'", region),
                    }
                    .into());
                }
            }
            if kms.key_id.as_deref() == Some("") {
                return Err(ConfigError::InvalidValue {
                    field: "kms.key_id",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
