// Reply envelope handling
//
// Decoding is tolerant (the router sometimes mangles its own bodies),
// classification maps `rpc-error` onto the crate's error classes, and
// unwrapping digests the several payload layouts seen across firmware.

use serde_json::{Map, Value};
use tracing::trace;

use super::codes;
use crate::error::{Error, snippet};

/// Keys in `data[0]` that describe the reply rather than carry payload.
pub const METADATA_KEYS: &[&str] = &["xmlns", "type", "timestamp", "root", "not-modified"];

/// Decode a response body into JSON without trusting the content type.
///
/// A leading BOM and whitespace are skipped and anything after the first
/// complete JSON value is ignored.
pub fn decode_body(status: u16, body: &str) -> Result<Value, Error> {
    let trimmed = body.trim_start_matches('\u{feff}').trim();
    let mut values = serde_json::Deserializer::from_str(trimmed).into_iter::<Value>();

    match values.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(Error::Deserialization {
            status,
            message: format!("{e} (body preview: {:?})", snippet(body)),
            body: body.to_owned(),
        }),
        None => Err(Error::Deserialization {
            status,
            message: "empty body".into(),
            body: String::new(),
        }),
    }
}

/// Check the `rpc-reply` envelope and turn a failed `result` into an error.
///
/// A reply without `result` is accepted; only an explicit non-`"ok"`
/// value is a failure.
pub fn check_reply(status: u16, response: &Value) -> Result<(), Error> {
    let Some(reply) = response.get("rpc-reply").and_then(Value::as_object) else {
        return Err(Error::Deserialization {
            status,
            message: "missing rpc-reply envelope".into(),
            body: snippet(&response.to_string()),
        });
    };

    let rpc_error = reply.get("rpc-error");
    match reply.get("result") {
        None => Ok(()),
        Some(Value::String(result)) if result.is_empty() || result == "ok" => Ok(()),
        Some(Value::String(result)) => Err(classify(result, rpc_error)),
        Some(other) => Err(classify(&other.to_string(), rpc_error)),
    }
}

/// Map a failed reply onto an error kind.
fn classify(result: &str, rpc_error: Option<&Value>) -> Error {
    let tag = rpc_error
        .and_then(|e| e.get("error-tag"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let code = rpc_error
        .and_then(|e| e.get("error-message"))
        .and_then(error_code)
        .unwrap_or_else(|| result.to_owned());

    if is_auth_failure(&code, &tag) {
        return Error::Authentication {
            message: format!("access denied ({code}, tag={tag})"),
        };
    }

    match code.as_str() {
        codes::FILTER_MISSING_ROOT => Error::MalformedRequest {
            code,
            message: "get-config filter is missing the empty root entry".into(),
        },
        codes::PARSE_REQUEST => Error::MalformedRequest {
            code,
            message: "request format rejected by router".into(),
        },
        _ => Error::Rpc {
            message: (result != code).then(|| result.to_owned()),
            code,
            tag,
        },
    }
}

/// `error-message` is either `{"text": <code>}` or the code itself.
fn error_code(message: &Value) -> Option<String> {
    let text = match message {
        Value::Object(map) => map.get("text")?,
        other => other,
    };
    match text {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Auth-class predicate. Firmware variants signal an expired or rejected
/// session either through code 2002 or through an `error-tag` mentioning
/// auth/access; both count.
pub fn is_auth_failure(code: &str, tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    code == codes::ACCESS_DENIED || tag.contains("auth") || tag.contains("access")
}

/// Pull the semantic payload out of `rpc-reply.data[0]`.
///
/// Order: the `root` key; the first non-metadata key holding an object;
/// the element itself. An empty or missing `data` yields `{}`.
pub fn unwrap_payload(response: &Value, root: &str) -> Value {
    let Some(element) = response.pointer("/rpc-reply/data/0") else {
        return Value::Object(Map::new());
    };
    let Some(fields) = element.as_object() else {
        return element.clone();
    };

    if let Some(value) = fields.get(root) {
        return value.clone();
    }

    fields
        .iter()
        .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()))
        .find(|(_, value)| value.is_object())
        .map_or_else(
            || element.clone(),
            |(key, value)| {
                trace!(root, key = %key, "payload found under fallback key");
                value.clone()
            },
        )
}

// ── Token extraction ────────────────────────────────────────────────

type TokenStrategy = fn(&Value) -> Option<&str>;

/// Places a login reply has been seen to keep the token, most specific
/// first. Each strategy receives `data[0]`.
const TOKEN_STRATEGIES: &[(&str, TokenStrategy)] = &[
    ("authentication.output.token", authentication_output_token),
    ("output.token", output_token),
    ("*.output.token", any_output_token),
];

fn authentication_output_token(element: &Value) -> Option<&str> {
    element.pointer("/authentication/output/token")?.as_str()
}

fn output_token(element: &Value) -> Option<&str> {
    element.pointer("/output/token")?.as_str()
}

fn any_output_token(element: &Value) -> Option<&str> {
    element
        .as_object()?
        .values()
        .find_map(|v| v.get("output")?.get("token")?.as_str().filter(|t| !t.is_empty()))
}

/// Run the token strategies in order against a login reply.
pub fn extract_token(response: &Value) -> Option<String> {
    let element = response.pointer("/rpc-reply/data/0")?;
    TOKEN_STRATEGIES.iter().find_map(|(name, strategy)| {
        let token = strategy(element).filter(|t| !t.is_empty())?;
        trace!(strategy = *name, "token extracted");
        Some(token.to_owned())
    })
}
