// ZAPI system endpoints
//
// Router identity and health (system info/state, API version, live
// bandwidth, port state) plus power actions: restart, shutdown and
// wake-on-LAN.

use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

impl MultyClient {
    /// Model name, serial number, MAC and firmware identity.
    ///
    /// `get-config` on `basic-system-info`.
    pub async fn get_system_info(&self) -> Result<Value, Error> {
        debug!("fetching basic system info");
        self.get_config(ns::SYSTEM, "basic-system-info").await
    }

    /// Uptime, firmware version, CPU and memory usage.
    ///
    /// `get-config` on `system-state`.
    pub async fn get_system_state(&self) -> Result<Value, Error> {
        debug!("fetching system state");
        self.get_config(ns::SYSTEM, "system-state").await
    }

    /// ZAPI version supported by the firmware.
    pub async fn get_api_version(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::SYSTEM, "api-version", None)
            .await
    }

    /// Current WAN throughput.
    pub async fn get_current_bandwidth(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::SYSTEM, "current-band-width", None)
            .await
    }

    /// Link state of the physical ports.
    pub async fn get_port_state(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::SYSTEM, "current-port-state", None)
            .await
    }

    /// Reboot the router. Returns the raw reply.
    pub async fn system_restart(&self) -> Result<Value, Error> {
        debug!("restarting router");
        self.call(Operation::Rpc, ns::SYSTEM, "system-restart", None)
            .await
    }

    /// Power the router off. Returns the raw reply.
    pub async fn system_shutdown(&self) -> Result<Value, Error> {
        debug!("shutting down router");
        self.call(Operation::Rpc, ns::SYSTEM, "system-shutdown", None)
            .await
    }

    /// Send a magic packet to `mac_address` from the router.
    pub async fn wake_on_lan(&self, mac_address: &str) -> Result<Value, Error> {
        debug!(mac_address, "sending wake-on-LAN");
        self.call(
            Operation::Rpc,
            ns::SYSTEM,
            "system-wake-on-lan",
            Some(json!({ "input": { "mac-address": mac_address } })),
        )
        .await
    }
}
