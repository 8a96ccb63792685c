use thiserror::Error;

/// Top-level error type for the `multy-api` crate.
///
/// Variants fall into three classes, queried with [`Error::is_auth`],
/// [`Error::is_protocol`] and [`Error::is_transport`]. Only the auth class
/// is retried (once, after re-authenticating); everything else reaches the
/// caller untouched.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected, no token in the login reply, or the router
    /// reported an access-denied failure for an authenticated call.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Protocol ────────────────────────────────────────────────────
    /// The reply envelope was well formed but `result` was not `"ok"`.
    #[error("ZAPI error {code} (tag={tag})")]
    Rpc {
        code: String,
        tag: String,
        message: Option<String>,
    },

    /// The router refused to parse the request itself (e.g. a `get-config`
    /// filter without the empty root entry).
    #[error("Request rejected by router ({code}): {message}")]
    MalformedRequest { code: String, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured host does not form a valid ZAPI endpoint URL.
    #[error("Invalid router address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// TLS configuration error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx status that is not an authentication failure.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body could not be decoded as a reply envelope, even tolerantly.
    #[error("Non-JSON response (HTTP {status}): {message}")]
    Deserialization {
        status: u16,
        message: String,
        body: String,
    },
}

impl Error {
    /// Returns `true` for the authentication class. These errors clear the
    /// session and are the only ones retried by the client.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` when the router answered with a protocol-level error.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Rpc { .. } | Self::MalformedRequest { .. })
    }

    /// Returns `true` for connection, timeout, HTTP status and decoding
    /// failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::InvalidUrl(_)
                | Self::Timeout { .. }
                | Self::Tls(_)
                | Self::Http { .. }
                | Self::Deserialization { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying on the
    /// next poll.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The router's error code, if the router produced one.
    pub fn zapi_code(&self) -> Option<&str> {
        match self {
            Self::Rpc { code, .. } | Self::MalformedRequest { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Cut a response body down to something fit for an error message.
pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
