// ZAPI IPv4 firewall endpoints

use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

impl MultyClient {
    /// Block internet access for `mac_address`.
    ///
    /// `lasting_time` is passed through as the router expects it (minutes;
    /// `0` blocks until explicitly unblocked).
    pub async fn block_device(&self, mac_address: &str, lasting_time: u32) -> Result<Value, Error> {
        debug!(mac_address, lasting_time, "blocking device");
        self.call(
            Operation::Rpc,
            ns::FIREWALL_V4,
            "block",
            Some(json!({
                "input": { "mac-address": mac_address, "lasting-time": lasting_time }
            })),
        )
        .await
    }

    /// Lift the block rule at `index`.
    ///
    /// The router keys block rules by a string index, unlike NAT rules.
    pub async fn unblock_device(&self, index: &str) -> Result<Value, Error> {
        debug!(index, "unblocking device");
        self.call(
            Operation::Rpc,
            ns::FIREWALL_V4,
            "unblock",
            Some(json!({ "input": { "index": index } })),
        )
        .await
    }
}
