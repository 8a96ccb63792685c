// Request envelope construction
//
// The operation tag decides the shape of `params`, not just its meaning.
// Building is pure apart from the message-id counter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::{Map, Value};

use super::NETCONF_XMLNS;

/// NETCONF-style operation carried in the `rpc` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Rpc,
    GetConfig,
    EditConfig,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::GetConfig => "get-config",
            Self::EditConfig => "edit-config",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of `message-id` values. Strictly increasing, starting at 1.
#[derive(Debug, Default)]
pub struct MessageIds(AtomicU64);

impl MessageIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// A fully built request body, ready to be POSTed to `/zapi`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    rpc: RpcFrame,
}

#[derive(Debug, Clone, Serialize)]
struct RpcFrame {
    xmlns: &'static str,
    #[serde(rename = "message-id")]
    message_id: u64,
    operation: Operation,
    params: Map<String, Value>,
}

impl RequestEnvelope {
    /// Build the envelope for `(operation, namespace, root, payload)`.
    ///
    /// `payload` is ignored for `get-config`: the filter always selects the
    /// whole subtree under `root`.
    pub fn build(
        operation: Operation,
        namespace: &str,
        root: &str,
        payload: Option<Value>,
        message_id: u64,
    ) -> Self {
        let mut params = Map::new();

        match operation {
            Operation::GetConfig => {
                // The router answers 5156 unless `<root>: {}` is in the filter.
                let mut filter = Map::new();
                filter.insert("xmlns".into(), namespace.into());
                filter.insert("root".into(), root.into());
                filter.insert("type".into(), "subtree".into());
                filter.insert(root.into(), Value::Object(Map::new()));

                params.insert("source".into(), "running".into());
                params.insert("filter".into(), Value::Array(vec![Value::Object(filter)]));
            }
            Operation::EditConfig => {
                let mut config = Map::new();
                config.insert("xmlns".into(), namespace.into());
                config.insert("root".into(), root.into());
                if let Some(payload) = payload.filter(|p| !is_empty(p)) {
                    config.insert(root.into(), payload);
                }

                params.insert("target".into(), "running".into());
                params.insert("error-option".into(), "stop-on-error".into());
                params.insert("config".into(), Value::Array(vec![Value::Object(config)]));
            }
            Operation::Rpc => {
                params.insert("xmlns".into(), namespace.into());
                params.insert("root".into(), root.into());
                params.insert(
                    root.into(),
                    payload.unwrap_or_else(|| Value::Object(Map::new())),
                );
            }
        }

        Self {
            rpc: RpcFrame {
                xmlns: NETCONF_XMLNS,
                message_id,
                operation,
                params,
            },
        }
    }

    pub fn message_id(&self) -> u64 {
        self.rpc.message_id
    }

    pub fn operation(&self) -> Operation {
        self.rpc.operation
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.rpc.params
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
