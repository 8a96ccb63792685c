// Session credentials
//
// The token and the optional `sysauth` cookie always move together: they
// are set by one successful login and cleared together on any auth failure.

use reqwest::RequestBuilder;
use reqwest::header::COOKIE;
use secrecy::{ExposeSecret, SecretString};

use crate::auth::{SYSAUTH_COOKIE, TOKEN_COOKIE, TOKEN_HEADER, TokenPlacement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Credentials held between calls.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<SecretString>,
    sysauth: Option<SecretString>,
    placement: TokenPlacement,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn has_sysauth(&self) -> bool {
        self.sysauth.is_some()
    }

    /// The concrete placement in use; `Auto` until a login resolves it.
    pub fn placement(&self) -> TokenPlacement {
        self.placement
    }

    /// Store the credentials of a successful login.
    pub(crate) fn establish(
        &mut self,
        token: String,
        sysauth: Option<String>,
        placement: TokenPlacement,
    ) {
        self.placement = placement.resolve(sysauth.is_some());
        self.token = Some(SecretString::from(token));
        self.sysauth = sysauth.map(SecretString::from);
    }

    /// Forget both credentials.
    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.sysauth = None;
        self.placement = TokenPlacement::Auto;
    }

    /// Attach whichever credentials are held to an outgoing request.
    pub(crate) fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        let mut cookies = Vec::with_capacity(2);

        if let Some(ref token) = self.token {
            match self.placement {
                TokenPlacement::Header => {
                    builder = builder.header(TOKEN_HEADER, token.expose_secret());
                }
                TokenPlacement::Cookie | TokenPlacement::Auto => {
                    cookies.push(format!("{TOKEN_COOKIE}={}", token.expose_secret()));
                }
            }
        }
        if let Some(ref sysauth) = self.sysauth {
            cookies.push(format!("{SYSAUTH_COOKIE}={}", sysauth.expose_secret()));
        }

        if cookies.is_empty() {
            builder
        } else {
            builder.header(COOKIE, cookies.join("; "))
        }
    }
}
