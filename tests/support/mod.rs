//! Test support utilities for secretcrypt integration tests.
//!
//! Provides an isolated key directory and helpers for driving the binary.

#![allow(dead_code)]

use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// The binary is pointed at the temp key dir through `SECRETCRYPT_KEY_DIR`
/// and at an empty home, so no user config or key is ever read.
pub struct Test {
    /// Directory holding the local key
    pub keys: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let keys = TempDir::new().expect("failed to create temp key dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { keys, home }
    }

    /// Path of the local key file.
    pub fn key_file(&self) -> std::path::PathBuf {
        self.keys.path().join("key")
    }

    /// A secretcrypt command with an isolated environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secretcrypt").expect("failed to find secretcrypt binary");
        cmd.env("SECRETCRYPT_KEY_DIR", self.keys.path());
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("XDG_DATA_HOME", self.home.path().join(".local/share"));
        cmd.env_remove("SECRETCRYPT_CONFIG");
        cmd.env_remove("SECRETCRYPT_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `secretcrypt encrypt <plaintext>`.
    pub fn encrypt(&self, plaintext: &str) -> Output {
        self.cmd()
            .args(["encrypt", plaintext])
            .output()
            .expect("failed to run secretcrypt encrypt")
    }

    /// Shortcut for `secretcrypt decrypt <encoded>`.
    pub fn decrypt(&self, encoded: &str) -> Output {
        self.cmd()
            .args(["decrypt", encoded])
            .output()
            .expect("failed to run secretcrypt decrypt")
    }

    /// Encrypt `plaintext` and return the encoded secret.
    pub fn encoded(&self, plaintext: &str) -> String {
        let output = self.encrypt(plaintext);
        assert_success(&output);
        stdout(&output).trim_end().to_string()
    }
}

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!("Command failed:\n{}", stderr(output));
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
