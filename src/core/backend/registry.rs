//! Backend registry.
//!
//! Maps a backend name found in an encoded secret to the backend instance
//! that can decrypt it. Populated once while the process is being configured,
//! then only read; share it behind an `Arc` for concurrent decrypts.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{Backend, LocalBackend};
use crate::core::config::Config;
use crate::core::types::{Ciphertext, DecryptParams};
use crate::error::{BackendError, Result};

#[derive(Debug, Default, Clone)]
pub struct Registry {
    backends: HashMap<String, Arc<dyn Backend>>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in backends, configured from `config`.
    ///
    /// - `local`, keyed at `config.key_dir()` when set, else the platform default
    /// - `kms`, when compiled with the `aws` feature
    pub fn from_config(config: &Config) -> Self {
        let local = match config.key_dir() {
            Some(dir) => LocalBackend::in_dir(dir),
            None => LocalBackend::new(),
        };

        let mut registry = Self::new();
        registry.register(local);

        #[cfg(feature = "aws")]
        registry.register(super::KmsBackend::new());

        registry
    }

    /// Register `backend` under its own name.
    ///
    /// Returns the backend previously registered under that name, if any.
    pub fn register(&mut self, backend: impl Backend + 'static) -> Option<Arc<dyn Backend>> {
        self.register_shared(Arc::new(backend))
    }

    /// Register an already shared backend under its own name.
    pub fn register_shared(&mut self, backend: Arc<dyn Backend>) -> Option<Arc<dyn Backend>> {
        let name = backend.name().to_string();
        debug!(backend = %name, "registering backend");

        let previous = self.backends.insert(name.clone(), backend);
        if previous.is_some() {
            warn!(backend = %name, "replaced previously registered backend");
        }
        previous
    }

    /// Look up a backend by name.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unknown` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Backend>> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::Unknown(name.to_string()).into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Registered backend names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve `name` and decrypt with it.
    pub fn decrypt(
        &self,
        name: &str,
        ciphertext: &Ciphertext,
        params: &DecryptParams,
    ) -> Result<String> {
        self.get(name)?.decrypt(ciphertext, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::PlainBackend;
    use crate::error::Error;

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        assert!(registry.register(PlainBackend).is_none());

        let backend = registry.get("plain").unwrap();
        assert_eq!(backend.name(), "plain");
        assert!(registry.contains("plain"));
    }

    #[test]
    fn test_unknown_backend() {
        let registry = Registry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(Error::Backend(BackendError::Unknown(name))) if name == "nope"
        ));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::new();
        registry.register(PlainBackend);
        assert!(registry.register(PlainBackend).is_some());
        assert_eq!(registry.names(), vec!["plain"]);
    }

    #[test]
    fn test_from_config_has_local() {
        let registry = Registry::from_config(&Config::default());
        assert!(registry.contains("local"));
    }
}
