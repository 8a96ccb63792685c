#![allow(clippy::unwrap_used)]
// Integration tests for `MultyClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use multy_api::zapi::{NETCONF_XMLNS, ns};
use multy_api::{
    Credentials, Error, LoginShape, MultyClient, SessionState, TokenPlacement, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, MultyClient) {
    let server = MockServer::start().await;
    let client = MultyClient::with_client(
        reqwest::Client::new(),
        &server.uri(),
        Credentials::new("admin", "hunter2"),
    )
    .unwrap();
    (server, client)
}

/// Matches any `rpc` or `edit-config` request addressed to `root`.
fn rpc_root(root: &str) -> impl wiremock::Match {
    body_partial_json(json!({ "rpc": { "params": { "root": root } } }))
}

/// Matches a `get-config` request whose filter targets `root`.
fn filter_root(root: &str) -> impl wiremock::Match {
    body_partial_json(json!({
        "rpc": { "operation": "get-config", "params": { "filter": [{ "root": root }] } }
    }))
}

fn ok_reply(root: &str, payload: Value) -> Value {
    json!({
        "rpc-reply": {
            "result": "ok",
            "data": [{ "xmlns": "urn:test", "root": root, root: payload }]
        }
    })
}

fn login_reply(token: &str) -> Value {
    ok_reply("authentication", json!({ "output": { "token": token } }))
}

fn access_denied() -> Value {
    json!({
        "rpc-reply": {
            "result": "error",
            "rpc-error": { "error-tag": "operation-failed", "error-message": { "text": "2002" } }
        }
    })
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("authentication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_reply(token)))
        .mount(server)
        .await;
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_then_list_devices_with_both_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(header("content-type", "application/json;charset=UTF-8"))
        .and(body_partial_json(json!({
            "rpc": {
                "xmlns": NETCONF_XMLNS,
                "operation": "rpc",
                "params": {
                    "xmlns": ns::AUTH,
                    "root": "authentication",
                    "authentication": { "input": { "name": "admin", "password": "hunter2" } }
                }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sysauth=sess-1; Path=/; HttpOnly")
                .set_body_json(login_reply("abc123")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(filter_root("network-devices"))
        .and(header("ZAPI_TOKEN", "abc123"))
        .and(header("cookie", "sysauth=sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_reply(
            "network-devices",
            json!({ "device": [
                { "mac": "aa:bb:cc:dd:ee:01", "name": "laptop" },
                { "mac": "aa:bb:cc:dd:ee:02", "name": "phone" }
            ] }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    client.authenticate().await.unwrap();
    let session = client.session().await;
    assert_eq!(session.state(), SessionState::Authenticated);
    assert!(session.has_sysauth());
    assert_eq!(session.placement(), TokenPlacement::Header);

    let devices = client.get_network_devices().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[1]["name"], "phone");
}

#[tokio::test]
async fn test_first_call_logs_in_lazily() {
    let (server, client) = setup().await;
    mount_login(&server, "lazy").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("api-version"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_reply("api-version", json!({ "version": "1.2" }))),
        )
        .mount(&server)
        .await;

    assert_eq!(client.session_state().await, SessionState::Unauthenticated);
    let version = client.get_api_version().await.unwrap();
    assert_eq!(version, json!({ "version": "1.2" }));
    assert_eq!(client.session_state().await, SessionState::Authenticated);
}

#[tokio::test]
async fn test_cookie_only_placement_without_sysauth() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-9").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(filter_root("system-state"))
        .and(header("cookie", "ZAPI_TOKEN=tok-9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_reply("system-state", json!({ "uptime": 42 }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = client.get_system_state().await.unwrap();
    assert_eq!(state["uptime"], 42);
    assert_eq!(client.session().await.placement(), TokenPlacement::Cookie);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[1].headers.get("ZAPI_TOKEN").is_none());
}

#[tokio::test]
async fn test_user_list_login_shape() {
    let server = MockServer::start().await;
    let client = MultyClient::with_client(
        reqwest::Client::new(),
        &server.uri(),
        Credentials::new("admin", "hunter2"),
    )
    .unwrap()
    .with_login_shape(LoginShape::UserList);

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(body_partial_json(json!({
            "rpc": { "params": { "authentication": { "input": {
                "credential-order": ["name", "password"],
                "user": [{ "name": "admin", "password": "hunter2" }]
            } } } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_reply("u-1")))
        .expect(1)
        .mount(&server)
        .await;

    client.authenticate().await.unwrap();
}

#[tokio::test]
async fn test_login_without_token_is_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_reply("authentication", json!({ "output": {} }))),
        )
        .mount(&server)
        .await;

    let result = client.authenticate().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert_eq!(client.session_state().await, SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_rejected_login_is_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": {
                "result": "error",
                "rpc-error": { "error-tag": "invalid-value", "error-message": "1003" }
            }
        })))
        .mount(&server)
        .await;

    let err = client.authenticate().await.unwrap_err();
    assert!(err.is_auth(), "expected auth error, got: {err:?}");
}

// ── Re-authentication ───────────────────────────────────────────────

#[tokio::test]
async fn test_expired_session_is_renewed_once() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("authentication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_reply("fresh")))
        .expect(2)
        .mount(&server)
        .await;

    // First data call hits an expired token, the retry succeeds.
    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("test-result"))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_denied()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("test-result"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_reply("test-result", json!({ "download": 512 }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client.get_speed_test_result().await.unwrap();
    assert_eq!(result["download"], 512);
    assert_eq!(client.session_state().await, SessionState::Authenticated);
}

#[tokio::test]
async fn test_second_auth_failure_surfaces_and_clears_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("authentication"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sysauth=s-2")
                .set_body_json(login_reply("doomed")),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("current-band-width"))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_denied()))
        .expect(2)
        .mount(&server)
        .await;

    let err = client.get_current_bandwidth().await.unwrap_err();
    assert!(err.is_auth(), "expected auth error, got: {err:?}");

    let session = client.session().await;
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(!session.has_sysauth());
}

#[tokio::test]
async fn test_http_401_triggers_reauthentication() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("current-port-state"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("current-port-state"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_reply("current-port-state", json!({ "wan": "up" }))),
        )
        .mount(&server)
        .await;

    assert_eq!(client.get_port_state().await.unwrap()["wan"], "up");
}

#[tokio::test]
async fn test_protocol_errors_are_not_retried() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("authentication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_reply("t")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("system-restart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": {
                "result": "error",
                "rpc-error": { "error-tag": "operation-failed", "error-message": { "text": "1001" } }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.system_restart().await.unwrap_err();
    assert!(err.is_protocol());
    assert_eq!(err.zapi_code(), Some("1001"));
    assert_eq!(client.session_state().await, SessionState::Authenticated);
}

// ── Envelopes ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_block_device_envelope() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(body_partial_json(json!({
            "rpc": {
                "xmlns": NETCONF_XMLNS,
                "operation": "rpc",
                "params": {
                    "xmlns": ns::FIREWALL_V4,
                    "root": "block",
                    "block": { "input": { "mac-address": "aa:bb:cc:dd:ee:ff", "lasting-time": 30 } }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": { "result": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client.block_device("aa:bb:cc:dd:ee:ff", 30).await.unwrap();
    assert_eq!(reply["rpc-reply"]["result"], "ok");
}

#[tokio::test]
async fn test_unblock_device_sends_string_index() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(body_partial_json(json!({
            "rpc": { "params": {
                "xmlns": ns::FIREWALL_V4,
                "root": "unblock",
                "unblock": { "input": { "index": "3" } }
            } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": { "result": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.unblock_device("3").await.unwrap();
}

#[tokio::test]
async fn test_parental_actions_send_string_index() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    for (root, input) in [
        ("block", json!({ "index": "2" })),
        ("unblock", json!({ "index": "2" })),
        ("bonus", json!({ "index": "2", "minute": 15 })),
    ] {
        Mock::given(method("POST"))
            .and(path("/zapi"))
            .and(body_partial_json(json!({
                "rpc": { "params": { "xmlns": ns::PARENTAL, "root": root, root: { "input": input } } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rpc-reply": { "result": "ok" }
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.parental_block("2").await.unwrap();
    client.parental_unblock("2").await.unwrap();
    client.parental_bonus("2", 15).await.unwrap();

    let bodies = request_bodies(&server).await;
    let bonus = &bodies.last().unwrap()["rpc"]["params"]["bonus"]["input"];
    assert!(bonus["index"].is_string());
    assert!(bonus["minute"].is_number());
}

#[tokio::test]
async fn test_remove_port_forward_sends_numeric_index() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("remove-rule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": { "result": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.remove_port_forward(4).await.unwrap();

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.last().unwrap()["rpc"]["params"]["remove-rule"]["input"]["index"], json!(4));
}

#[tokio::test]
async fn test_get_config_filter_carries_empty_root() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(body_partial_json(json!({
            "rpc": {
                "operation": "get-config",
                "params": {
                    "source": "running",
                    "filter": [{
                        "xmlns": ns::SYSTEM,
                        "root": "basic-system-info",
                        "type": "subtree",
                        "basic-system-info": {}
                    }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_reply(
            "basic-system-info",
            json!({ "model-name": "WSQ50" }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.get_system_info().await.unwrap();
    assert_eq!(info["model-name"], "WSQ50");
}

#[tokio::test]
async fn test_edit_config_envelope() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(body_partial_json(json!({
            "rpc": {
                "operation": "edit-config",
                "params": {
                    "target": "running",
                    "error-option": "stop-on-error",
                    "config": [{ "root": "dns", "dns": { "server": "1.1.1.1" } }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": { "result": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .edit_config(ns::SYSTEM, "dns", Some(json!({ "server": "1.1.1.1" })))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_message_ids_strictly_increase() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("access-internet-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_reply(
            "access-internet-status",
            json!({ "status": true }),
        )))
        .mount(&server)
        .await;

    for _ in 0..3 {
        client.get_internet_status().await.unwrap();
    }

    let ids: Vec<u64> = request_bodies(&server)
        .await
        .iter()
        .map(|b| b["rpc"]["message-id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not increasing: {ids:?}");
}

#[tokio::test]
async fn test_speed_test_start_sends_unix_test_id() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(body_partial_json(json!({
            "rpc": { "params": { "root": "speed-test", "speed-test": { "input": {
                "originator": 1, "device-mac": "", "target": "Internet"
            } } } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rpc-reply": { "result": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.start_speed_test().await.unwrap();

    let bodies = request_bodies(&server).await;
    let test_id = bodies[1]["rpc"]["params"]["speed-test"]["input"]["test-id"]
        .as_str()
        .unwrap();
    assert!(test_id.parse::<i64>().unwrap() > 1_600_000_000);
}

// ── Transport failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_html_body_is_transport_error() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("get-device-statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Login</html>"))
        .mount(&server)
        .await;

    let err = client.get_device_statistics().await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_server_error_status_is_http_error() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("on-line-check"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client.firmware_check().await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 500, .. }), "got: {err:?}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_slow_router_times_out() {
    let (server, client) = setup().await;
    let client = client.with_timeout(Duration::from_millis(200));
    mount_login(&server, "t").await;

    Mock::given(method("POST"))
        .and(path("/zapi"))
        .and(rpc_root("on-line-check-status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "rpc-reply": { "result": "ok" } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.firmware_check_status().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 200 }), "got: {err:?}");
    assert_eq!(err.to_string(), "Request timed out after 200ms");
}

#[tokio::test]
async fn test_close_leaves_shared_pool_usable() {
    let server = MockServer::start().await;
    mount_login(&server, "t").await;

    let http = reqwest::Client::new();
    let client = MultyClient::with_client(
        http.clone(),
        &server.uri(),
        Credentials::new("admin", "hunter2"),
    )
    .unwrap();
    assert!(client.shares_connection());

    client.authenticate().await.unwrap();
    client.close();

    let resp = http
        .post(format!("{}/zapi", server.uri()))
        .json(&json!({ "rpc": { "params": { "root": "authentication" } } }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[test]
fn test_owned_pool_is_not_shared() {
    let client = MultyClient::new(
        "192.168.212.1",
        Credentials::new("admin", "hunter2"),
        &TransportConfig::default(),
    )
    .unwrap();
    assert!(!client.shares_connection());
}

#[tokio::test]
async fn test_close_consumes_client() {
    let (server, client) = setup().await;
    mount_login(&server, "t").await;

    client.authenticate().await.unwrap();
    client.close();
}
