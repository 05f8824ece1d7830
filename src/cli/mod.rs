//! Command-line interface.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod input;
pub mod inspect;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::constants::LOCAL_BACKEND;
use crate::core::types::DecryptParams;
use crate::error::Result;

/// Secretcrypt - self-describing encrypted secrets.
#[derive(Parser)]
#[command(
    name = "secretcrypt",
    about = "Encrypt and decrypt self-describing secrets for configuration files",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to secretcrypt.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a value and print the encoded secret
    Encrypt {
        /// Backend to encrypt with
        #[arg(short, long, default_value = LOCAL_BACKEND)]
        backend: String,
        /// Encrypt parameter, repeatable (e.g., region=us-east-1)
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Value to encrypt (prompted for, or read from stdin, when omitted)
        plaintext: Option<String>,
    },

    /// Decrypt an encoded secret and print the plaintext
    Decrypt {
        /// Encoded secret (read from stdin when omitted)
        encoded: Option<String>,
    },

    /// Show the parts of an encoded secret without decrypting it
    Inspect {
        /// Encoded secret
        encoded: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_param(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}

/// Execute a command.
pub fn execute(command: Command, config: Option<&Path>) -> Result<()> {
    use Command::*;

    match command {
        Encrypt {
            backend,
            params,
            plaintext,
        } => {
            let params: DecryptParams = params.into_iter().collect();
            encrypt::execute(config, &backend, params, plaintext)
        }
        Decrypt { encoded } => decrypt::execute(config, encoded),
        Inspect { encoded, json } => inspect::execute(&encoded, json),
        Completions { shell } => completions::execute(shell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("region=us-east-1").unwrap(),
            ("region".to_string(), "us-east-1".to_string())
        );
        assert_eq!(
            parse_param("token=a=b").unwrap(),
            ("token".to_string(), "a=b".to_string())
        );
        assert!(parse_param("region").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
