//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the plaintext password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(placement) = p.token_placement {
            let _ = writeln!(out, "token_placement = \"{}\"", placement.as_str());
        }
        if let Some(shape) = p.login_shape {
            let _ = writeln!(out, "login_shape = \"{}\"", shape.as_str());
        }
    }

    out
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Store the password in the keyring, or hand it back for plaintext config.
fn store_password(profile_name: &str, password: String) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        multy_config::store_password(profile_name, &password)?;
        eprintln!("   ✓ password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let mut cfg = config::load_config_or_default();
            eprintln!("multy configuration");
            eprintln!("   Config path: {}\n", config::config_path().display());

            let profile_name: String = match global.profile {
                Some(ref name) => name.clone(),
                None => Input::new()
                    .with_prompt("Profile name")
                    .default("default".into())
                    .interact_text()
                    .map_err(prompt_err)?,
            };

            let host: String = match global.host {
                Some(ref host) => host.clone(),
                None => Input::new()
                    .with_prompt("Router address")
                    .default("192.168.212.1".into())
                    .interact_text()
                    .map_err(prompt_err)?,
            };

            let username: String = match global.username {
                Some(ref user) => user.clone(),
                None => Input::new()
                    .with_prompt("Username")
                    .default("admin".into())
                    .interact_text()
                    .map_err(prompt_err)?,
            };

            let password = rpassword::prompt_password("Password: ")?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            let password = store_password(&profile_name, password)?;

            let insecure = global.insecure
                || dialoguer::Confirm::new()
                    .with_prompt("Accept the router's self-signed certificate?")
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;

            let profile = Profile {
                host,
                username: Some(username),
                password,
                insecure: Some(insecure),
                timeout: global.timeout,
                token_placement: global.token_placement.map(Into::into),
                ..Profile::default()
            };

            if cfg.profiles.is_empty() {
                cfg.default_profile = Some(profile_name.clone());
            }
            cfg.profiles.insert(profile_name.clone(), profile);
            config::save_config(&cfg)?;

            eprintln!(
                "\n✓ Profile '{profile_name}' saved to {}",
                config::config_path().display()
            );
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            cfg.profile(&profile_name)?;

            let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            multy_config::store_password(&profile_name, &password)?;
            eprintln!("✓ Password for '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multy_api::TokenPlacement;

    #[test]
    fn redacted_config_hides_password() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                host: "192.168.212.1".into(),
                username: Some("admin".into()),
                password: Some("hunter2".into()),
                token_placement: Some(TokenPlacement::Cookie),
                ..Profile::default()
            },
        );

        let out = format_config_redacted(&cfg);
        assert!(out.contains("[profiles.home]"));
        assert!(out.contains("password = \"****\""));
        assert!(out.contains("token_placement = \"cookie\""));
        assert!(!out.contains("hunter2"));
    }
}
