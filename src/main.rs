//! Secretcrypt - self-describing encrypted secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secretcrypt::cli::output;
use secretcrypt::cli::{execute, Cli};
use secretcrypt::core::constants::{KEY_DIR_ENV, KMS_BACKEND, LOG_ENV};
use secretcrypt::error::{BackendError, CipherError, Error, KeyError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secretcrypt=debug")
        } else {
            EnvFilter::new("secretcrypt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.config.as_deref()) {
        let suggestion = match &e {
            Error::Key(KeyError::Missing(_)) => Some(format!(
                "point {} at the directory holding the key used for encryption",
                KEY_DIR_ENV
            )),
            Error::Key(KeyError::NoDataDir) => Some(format!("set {}", KEY_DIR_ENV)),
            Error::Cipher(CipherError::Integrity) => {
                Some("the secret was encrypted under a different key".to_string())
            }
            Error::Backend(BackendError::Unknown(name))
                if name == KMS_BACKEND && !cfg!(feature = "aws") =>
            {
                Some("the kms backend requires a build with --features aws".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
