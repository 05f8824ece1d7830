//! Reading values that were not given on the command line.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;

use crate::error::Result;

/// Return `value`, or prompt for it with hidden input on a terminal, or read
/// all of stdin when it is piped.
///
/// Piped input loses a single trailing newline.
pub fn value_or_stdin(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    if io::stdin().is_terminal() {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        return Ok(value);
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(strip_newline(input))
}

fn strip_newline(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}
