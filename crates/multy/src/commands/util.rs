//! Shared helpers for command handlers.

use std::io::IsTerminal;

use serde_json::Value;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Report a completed write action on stderr.
pub fn done(message: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Parse an optional `--payload` argument.
pub fn parse_payload(raw: Option<&str>) -> Result<Option<Value>, CliError> {
    raw.map(serde_json::from_str).transpose().map_err(CliError::from)
}
