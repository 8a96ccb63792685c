// ZAPI easy-setup ("easy123") endpoints
//
// WAN link and internet reachability checks, and the simplified Wi-Fi
// read/write pair used by the router's setup wizard.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

/// Wi-Fi network addressed when none is given.
pub const DEFAULT_NETWORK: &str = "main";

/// Changes for `set-wifi`. Unset fields are left as they are on the router.
#[derive(Debug, Clone, Serialize)]
pub struct WifiSettings {
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(rename = "ssid-5g", skip_serializing_if = "Option::is_none")]
    pub ssid_5g: Option<String>,
    #[serde(rename = "psk", skip_serializing_if = "Option::is_none")]
    pub psk: Option<PreSharedKey>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreSharedKey {
    pub key: String,
}

impl Default for WifiSettings {
    fn default() -> Self {
        Self::for_network(DEFAULT_NETWORK)
    }
}

impl WifiSettings {
    pub fn for_network(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ssid: None,
            ssid_5g: None,
            psk: None,
        }
    }

    pub fn ssid(mut self, ssid: impl Into<String>) -> Self {
        self.ssid = Some(ssid.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn ssid_5g(mut self, ssid: impl Into<String>) -> Self {
        self.ssid_5g = Some(ssid.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.psk = Some(password.into())
            .filter(|p: &String| !p.is_empty())
            .map(|key| PreSharedKey { key });
        self
    }
}

impl MultyClient {
    /// Whether a cable is plugged into the WAN port.
    pub async fn is_wan_connected(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::EASY123, "is-wan-port-connected", None)
            .await
    }

    /// Whether the router can reach the internet.
    pub async fn get_internet_status(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::EASY123, "access-internet-status", None)
            .await
    }

    /// SSIDs and security settings of `network` (`"main"`, `"guest"`, ...).
    pub async fn get_wifi_config(&self, network: &str) -> Result<Value, Error> {
        debug!(network, "fetching wifi configuration");
        self.query(
            Operation::Rpc,
            ns::EASY123,
            "get-wifi-configuration",
            Some(json!({ "input": { "network": network } })),
        )
        .await
    }

    /// Apply Wi-Fi changes. Returns the raw reply.
    pub async fn set_wifi(&self, settings: &WifiSettings) -> Result<Value, Error> {
        debug!(network = %settings.network, "updating wifi settings");
        self.call(
            Operation::Rpc,
            ns::EASY123,
            "set-wifi",
            Some(json!({ "input": settings })),
        )
        .await
    }
}
