// ZAPI HTTP client
//
// Wraps `reqwest::Client` with envelope construction, session handling and
// reply checking. All subsystem operations (system, mesh, firmware, ...)
// are inherent methods defined in sibling files; this module only deals
// with transport mechanics and the authentication state machine.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};
use url::Url;

use super::envelope::{MessageIds, Operation, RequestEnvelope};
use super::reply::{check_reply, decode_body, extract_token, unwrap_payload};
use super::session::{Session, SessionState};
use super::{ZAPI_PATH, ns};
use crate::auth::{Credentials, LoginShape, SYSAUTH_COOKIE, TokenPlacement};
use crate::error::{Error, snippet};
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};

const CONTENT_TYPE_ZAPI: &str = "application/json;charset=UTF-8";

/// Root of the login RPC.
const AUTH_ROOT: &str = "authentication";

/// What one request/response round trip produced.
struct Exchange {
    response: Value,
    sysauth: Option<String>,
}

/// Client for one router's ZAPI endpoint.
///
/// Holds a single session. Every authenticated call runs under one lock
/// covering "check token, call, re-authenticate, retry", so concurrent
/// callers never race each other's logins.
pub struct MultyClient {
    http: reqwest::Client,
    owns_http: bool,
    endpoint: Url,
    credentials: Credentials,
    login_shape: LoginShape,
    token_placement: TokenPlacement,
    timeout: Duration,
    ids: MessageIds,
    session: Mutex<Session>,
}

impl MultyClient {
    /// Create a client with its own connection pool built from `transport`.
    ///
    /// `host` is the router address (`192.168.212.1`) or a full base URL
    /// (`https://192.168.212.1:8443`).
    pub fn new(
        host: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::from_parts(http, host, credentials)?;
        client.owns_http = true;
        client.timeout = transport.timeout;
        Ok(client)
    }

    /// Create a client on top of a caller-owned `reqwest::Client`.
    ///
    /// The pool stays the caller's: closing this client only drops its
    /// handle. TLS settings are whatever the shared client was built with.
    pub fn with_client(
        http: reqwest::Client,
        host: &str,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        Self::from_parts(http, host, credentials)
    }

    fn from_parts(http: reqwest::Client, host: &str, credentials: Credentials) -> Result<Self, Error> {
        Ok(Self {
            http,
            owns_http: false,
            endpoint: endpoint_url(host)?,
            credentials,
            login_shape: LoginShape::default(),
            token_placement: TokenPlacement::default(),
            timeout: DEFAULT_TIMEOUT,
            ids: MessageIds::new(),
            session: Mutex::new(Session::new()),
        })
    }

    /// Force where the token travels instead of detecting it at login.
    pub fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = placement;
        self
    }

    /// Select the login payload layout for the router's firmware.
    pub fn with_login_shape(mut self, shape: LoginShape) -> Self {
        self.login_shape = shape;
        self
    }

    /// Per-request timeout, applied even on a shared `reqwest::Client`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The `/zapi` URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `true` when the connection pool belongs to the caller
    /// (built with [`MultyClient::with_client`]).
    pub fn shares_connection(&self) -> bool {
        !self.owns_http
    }

    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log in, replacing whatever session was held.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let mut session = self.session.lock().await;
        self.login(&mut session).await
    }

    /// Drop the session and release the client.
    ///
    /// An owned connection pool goes away with the client; a shared one is
    /// left to its owner.
    pub fn close(self) {
        let Self {
            session, owns_http, ..
        } = self;
        let mut session = session.into_inner();
        session.clear();
        debug!(owns_http, "ZAPI client closed");
    }

    async fn login(&self, session: &mut Session) -> Result<(), Error> {
        session.clear();
        debug!(user = %self.credentials.username, shape = ?self.login_shape, "authenticating");

        let payload = self.login_shape.payload(&self.credentials);
        let exchange = self
            .exchange(Operation::Rpc, ns::AUTH, AUTH_ROOT, Some(payload), None)
            .await
            .map_err(|e| match e {
                Error::Rpc { code, tag, .. } => Error::Authentication {
                    message: format!("login rejected ({code}, tag={tag})"),
                },
                other => other,
            })?;

        let token = extract_token(&exchange.response).ok_or_else(|| Error::Authentication {
            message: format!(
                "no token in auth response: {}",
                snippet(&exchange.response.to_string())
            ),
        })?;

        let prefix: String = token.chars().take(8).collect();
        session.establish(token, exchange.sysauth, self.token_placement);
        info!(
            token_prefix = %prefix,
            sysauth = session.has_sysauth(),
            placement = ?session.placement(),
            "authenticated with router"
        );
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Authenticated call returning the raw reply.
    ///
    /// Logs in first when no token is held. An auth-class failure clears
    /// the session, triggers one fresh login and one retry; a second auth
    /// failure is returned with the session cleared.
    pub(crate) async fn call(
        &self,
        operation: Operation,
        namespace: &str,
        root: &str,
        payload: Option<Value>,
    ) -> Result<Value, Error> {
        let mut session = self.session.lock().await;

        if !session.is_authenticated() {
            self.login(&mut session).await?;
        }

        let first = self
            .exchange(operation, namespace, root, payload.clone(), Some(&*session))
            .await;

        let result = match first {
            Err(e) if e.is_auth() => {
                warn!(root, error = %e, "session rejected, re-authenticating");
                session.clear();
                self.login(&mut session).await?;
                self.exchange(operation, namespace, root, payload, Some(&*session))
                    .await
            }
            other => other,
        };

        match result {
            Ok(exchange) => Ok(exchange.response),
            Err(e) => {
                if e.is_auth() {
                    session.clear();
                }
                Err(e)
            }
        }
    }

    /// Authenticated call returning the unwrapped payload.
    pub(crate) async fn query(
        &self,
        operation: Operation,
        namespace: &str,
        root: &str,
        payload: Option<Value>,
    ) -> Result<Value, Error> {
        let response = self.call(operation, namespace, root, payload).await?;
        Ok(unwrap_payload(&response, root))
    }

    /// Issue an arbitrary `rpc` and unwrap its payload.
    pub async fn rpc(
        &self,
        namespace: &str,
        root: &str,
        payload: Option<Value>,
    ) -> Result<Value, Error> {
        self.query(Operation::Rpc, namespace, root, payload).await
    }

    /// Read the running configuration subtree under `root`.
    pub async fn get_config(&self, namespace: &str, root: &str) -> Result<Value, Error> {
        self.query(Operation::GetConfig, namespace, root, None).await
    }

    /// Write `payload` under `root` in the running configuration.
    pub async fn edit_config(
        &self,
        namespace: &str,
        root: &str,
        payload: Option<Value>,
    ) -> Result<Value, Error> {
        self.call(Operation::EditConfig, namespace, root, payload)
            .await
    }

    /// One POST to `/zapi`: build, send, decode, check.
    async fn exchange(
        &self,
        operation: Operation,
        namespace: &str,
        root: &str,
        payload: Option<Value>,
        session: Option<&Session>,
    ) -> Result<Exchange, Error> {
        let envelope =
            RequestEnvelope::build(operation, namespace, root, payload, self.ids.next());
        debug!(
            operation = %operation,
            root,
            message_id = envelope.message_id(),
            "ZAPI request"
        );

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .header(CONTENT_TYPE, CONTENT_TYPE_ZAPI)
            .json(&envelope);
        if let Some(session) = session {
            builder = session.apply(builder);
        }

        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();

        let sysauth = resp
            .cookies()
            .find(|c| c.name() == SYSAUTH_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty());

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "HTTP 401 from router".into(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(status = status.as_u16(), body = %snippet(&body), "ZAPI response");

        let decoded = decode_body(status.as_u16(), &body);

        if !status.is_success() {
            // A router error inside a non-2xx body says more than the status.
            if let Ok(response) = &decoded {
                if response.get("rpc-reply").is_some() {
                    check_reply(status.as_u16(), response)?;
                }
            }
            return Err(Error::Http {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let response = decoded?;
        check_reply(status.as_u16(), &response)?;

        Ok(Exchange { response, sysauth })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Turn a host or base URL into the `/zapi` endpoint.
fn endpoint_url(host: &str) -> Result<Url, Error> {
    let host = host.trim();
    let base = if host.contains("://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };
    let mut url = Url::parse(&base)?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl(url::ParseError::EmptyHost));
    }
    url.set_path(ZAPI_PATH);
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(
            endpoint_url("192.168.212.1").unwrap().as_str(),
            "https://192.168.212.1/zapi"
        );
    }

    #[test]
    fn base_url_keeps_scheme_and_port() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:8080/").unwrap().as_str(),
            "http://127.0.0.1:8080/zapi"
        );
    }

    #[test]
    fn garbage_host_is_rejected() {
        assert!(matches!(endpoint_url("https://"), Err(Error::InvalidUrl(_))));
        assert!(matches!(endpoint_url("  "), Err(Error::InvalidUrl(_))));
        assert!(matches!(endpoint_url("http://"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn base_path_is_replaced() {
        assert_eq!(
            endpoint_url("https://router.lan/cgi-bin//").unwrap().as_str(),
            "https://router.lan/zapi"
        );
    }
}
