//! CLI configuration: thin wrapper around `multy_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides (--host,
//! --username, --insecure, ...).

use multy_api::TokenPlacement;
use multy_config::Connection;

use crate::cli::{GlobalOpts, PlacementArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use multy_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

impl From<PlacementArg> for TokenPlacement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Auto => Self::Auto,
            PlacementArg::Header => Self::Header,
            PlacementArg::Cookie => Self::Cookie,
        }
    }
}

/// Layer flag overrides on top of a profile.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(placement) = global.token_placement {
        profile.token_placement = Some(placement.into());
    }
    profile
}

/// Resolve the profile and flags into connection inputs.
///
/// A profile named explicitly must exist. Without one, `--host` alone is
/// enough to build an ad-hoc profile.
pub fn resolve_connection(global: &GlobalOpts, config: &Config) -> Result<Connection, CliError> {
    let name = active_profile_name(global, config);

    let base = match config.profiles.get(&name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        None if global.host.is_some() => Profile::default(),
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    let profile = apply_overrides(base, global);
    Ok(multy_config::profile_to_connection(
        &profile,
        &name,
        &config.defaults,
    )?)
}
