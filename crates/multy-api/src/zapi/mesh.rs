// ZAPI mesh (wifi-system) endpoints
//
// Satellite nodes of the mesh are addressed by MAC address.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

/// Status LED switch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for LedState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl MultyClient {
    /// State of every node in the mesh: role, link quality, firmware.
    pub async fn get_mesh_devices_state(&self) -> Result<Value, Error> {
        debug!("fetching mesh node state");
        self.get_config(ns::WIFI_SYSTEM, "system-devices-state")
            .await
    }

    /// Reboot one mesh node.
    pub async fn restart_mesh_node(&self, mac: &str) -> Result<Value, Error> {
        debug!(mac, "restarting mesh node");
        self.call(
            Operation::Rpc,
            ns::WIFI_SYSTEM,
            "restart",
            Some(json!({ "input": { "mac": mac } })),
        )
        .await
    }

    /// Switch a node's status LED and set its brightness level.
    pub async fn switch_led(
        &self,
        mac: &str,
        state: LedState,
        brightness: u8,
    ) -> Result<Value, Error> {
        debug!(mac, %state, brightness, "switching mesh node LED");
        self.call(
            Operation::Rpc,
            ns::WIFI_SYSTEM,
            "switch-led",
            Some(json!({
                "input": {
                    "mac": mac,
                    "led-switch": state.as_str(),
                    "led-brightness-level": brightness,
                }
            })),
        )
        .await
    }

    pub async fn rename_mesh_node(&self, mac: &str, name: &str) -> Result<Value, Error> {
        debug!(mac, name, "renaming mesh node");
        self.call(
            Operation::Rpc,
            ns::WIFI_SYSTEM,
            "naming",
            Some(json!({ "input": { "mac": mac, "name": name } })),
        )
        .await
    }
}
