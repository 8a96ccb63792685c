// ZAPI NAT (port forwarding) endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

/// Transport protocol of a forwarding rule, as the router spells it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardProtocol {
    #[default]
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "ALL")]
    All,
}

/// One port forwarding rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortForwardRule {
    pub service: String,
    #[serde(default)]
    pub protocol: ForwardProtocol,
    pub external_port: u16,
    /// Last port of an external range; `None` forwards a single port.
    #[serde(default)]
    pub external_port_end: Option<u16>,
    pub internal_port: u16,
    pub local_ip: String,
}

impl PortForwardRule {
    fn input(&self) -> Value {
        json!({
            "service": self.service,
            "service-index": 0,
            "protocol": self.protocol,
            "external-port": self.external_port,
            "external-port-end": self.external_port_end.unwrap_or(self.external_port),
            "internal-port": self.internal_port,
            "local-ip": self.local_ip,
        })
    }
}

impl MultyClient {
    /// Create a forwarding rule. Returns the raw reply.
    pub async fn add_port_forward(&self, rule: &PortForwardRule) -> Result<Value, Error> {
        debug!(
            service = %rule.service,
            external_port = rule.external_port,
            local_ip = %rule.local_ip,
            "adding port forward"
        );
        self.call(
            Operation::Rpc,
            ns::NAT_GENERAL,
            "add-rule",
            Some(json!({ "input": rule.input() })),
        )
        .await
    }

    /// Delete the forwarding rule at `index`.
    pub async fn remove_port_forward(&self, index: u32) -> Result<Value, Error> {
        debug!(index, "removing port forward");
        self.call(
            Operation::Rpc,
            ns::NAT_GENERAL,
            "remove-rule",
            Some(json!({ "input": { "index": index } })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ssh_rule() -> PortForwardRule {
        PortForwardRule {
            service: "ssh".into(),
            protocol: ForwardProtocol::Tcp,
            external_port: 2222,
            external_port_end: None,
            internal_port: 22,
            local_ip: "192.168.212.10".into(),
        }
    }

    #[test]
    fn single_port_rule_repeats_external_port() {
        assert_eq!(
            ssh_rule().input(),
            json!({
                "service": "ssh",
                "service-index": 0,
                "protocol": "TCP",
                "external-port": 2222,
                "external-port-end": 2222,
                "internal-port": 22,
                "local-ip": "192.168.212.10",
            })
        );
    }

    #[test]
    fn port_range_keeps_its_end() {
        let rule = PortForwardRule {
            protocol: ForwardProtocol::Udp,
            external_port_end: Some(2230),
            ..ssh_rule()
        };
        let input = rule.input();
        assert_eq!(input["external-port-end"], 2230);
        assert_eq!(input["protocol"], "UDP");
    }
}
