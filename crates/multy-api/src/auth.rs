use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Header carrying the bearer token on firmware that accepts it there.
pub const TOKEN_HEADER: &str = "ZAPI_TOKEN";

/// Cookie carrying the token on cookie-only firmware.
pub const TOKEN_COOKIE: &str = "ZAPI_TOKEN";

/// Session cookie set by the login reply on some firmware.
pub const SYSAUTH_COOKIE: &str = "sysauth";

/// Router login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Where the bearer token travels on authenticated requests.
///
/// Firmware revisions disagree: some want a `ZAPI_TOKEN` header next to the
/// `sysauth` cookie, others only read the token from a cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPlacement {
    /// Decide after each login: `Header` when the router handed out a
    /// `sysauth` cookie, `Cookie` otherwise.
    #[default]
    Auto,
    /// `ZAPI_TOKEN` header, plus the `sysauth` cookie when one is held.
    Header,
    /// `ZAPI_TOKEN` cookie, plus the `sysauth` cookie when one is held.
    Cookie,
}

impl TokenPlacement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }

    /// Collapse `Auto` into a concrete placement given what the login
    /// reply contained.
    pub fn resolve(self, has_sysauth: bool) -> Self {
        match self {
            Self::Auto if has_sysauth => Self::Header,
            Self::Auto => Self::Cookie,
            other => other,
        }
    }
}

/// Shape of the `authentication` RPC input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginShape {
    /// `{"input": {"name": .., "password": ..}}`
    #[default]
    NamePassword,
    /// `{"input": {"credential-order": [..], "user": [{"name": .., "password": ..}]}}`
    UserList,
}

impl LoginShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NamePassword => "name-password",
            Self::UserList => "user-list",
        }
    }

    /// Build the payload nested under the `authentication` root.
    pub(crate) fn payload(self, credentials: &Credentials) -> Value {
        let name = credentials.username.as_str();
        let password = credentials.password.expose_secret();
        match self {
            Self::NamePassword => json!({
                "input": { "name": name, "password": password }
            }),
            Self::UserList => json!({
                "input": {
                    "credential-order": ["name", "password"],
                    "user": [{ "name": name, "password": password }],
                }
            }),
        }
    }
}
