//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use multy_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the router")]
    #[diagnostic(
        code(multy::connection_failed),
        help(
            "Check that the router is reachable on this network.\n\
             Try: multy system info --insecure"
        )
    )]
    ConnectionFailed {
        #[source]
        source: multy_api::Error,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(multy::tls_error),
        help(
            "The router serves a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(multy::auth_failed),
        help(
            "Verify the router's admin credentials.\n\
             Run: multy config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(multy::no_credentials),
        help(
            "Configure credentials with: multy config init\n\
             Or set MULTY_USERNAME and MULTY_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Router ───────────────────────────────────────────────────────
    #[error("Router error {code}{}", .tag.as_deref().map(|t| format!(" (tag={t})")).unwrap_or_default())]
    #[diagnostic(code(multy::router_error))]
    RouterError { code: String, tag: Option<String> },

    #[error("Router rejected the request ({code}): {message}")]
    #[diagnostic(
        code(multy::malformed_request),
        help("This firmware may not support the operation.")
    )]
    MalformedRequest { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(multy::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(multy::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: multy config init --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No router configured")]
    #[diagnostic(
        code(multy::no_config),
        help(
            "Create a profile with: multy config init\n\
             Or pass --host. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(multy::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(multy::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {millis}ms")]
    #[diagnostic(
        code(multy::timeout),
        help("Increase timeout with --timeout or check router responsiveness.")
    )]
    Timeout { millis: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(multy::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Name the active profile in authentication failures.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: name.into(),
                message,
            },
            other => other,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<multy_api::Error> for CliError {
    fn from(err: multy_api::Error) -> Self {
        use multy_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::AuthFailed {
                profile: "current".into(),
                message,
            },
            ApiError::Rpc { code, tag, .. } => Self::RouterError {
                code,
                tag: Some(tag).filter(|t| !t.is_empty()),
            },
            ApiError::MalformedRequest { code, message } => Self::MalformedRequest { code, message },
            ApiError::Timeout { timeout_ms } => Self::Timeout { millis: timeout_ms },
            ApiError::Tls(message) => Self::TlsError { message },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            other => Self::ConnectionFailed { source: other },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::ProfileNotFound { name } => Self::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => Self::Config(other),
        }
    }
}
